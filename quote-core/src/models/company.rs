use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shop profile printed on every quotation.
///
/// Every field carries a serde default so a record saved by an older build
/// is topped up field by field instead of being thrown away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDetails {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_tagline")]
    pub tagline: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,

    // Banking block, shown on the printed quote
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub ifsc: String,
    #[serde(default)]
    pub upi_id: String,

    /// Payment QR image as a `data:` URI, ready to inline into HTML.
    #[serde(default)]
    pub payment_qr: Option<String>,

    #[serde(default = "default_tax_rate")]
    pub default_tax_rate: Decimal,
    #[serde(default = "default_notes")]
    pub default_notes: String,

    /// App lock password. `None` disables the lock screen entirely.
    #[serde(default)]
    pub password: Option<String>,
}

fn default_name() -> String {
    "Tyre Point".to_string()
}

fn default_tagline() -> String {
    "Tyres, Wheels & Service".to_string()
}

fn default_tax_rate() -> Decimal {
    Decimal::from(18)
}

fn default_notes() -> String {
    "Prices include GST where applicable.\nQuotation valid for 7 days.".to_string()
}

impl Default for CompanyDetails {
    fn default() -> Self {
        Self {
            name: default_name(),
            tagline: default_tagline(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            bank_name: String::new(),
            account_name: String::new(),
            account_number: String::new(),
            ifsc: String::new(),
            upi_id: String::new(),
            payment_qr: None,
            default_tax_rate: default_tax_rate(),
            default_notes: default_notes(),
            password: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn partial_record_is_topped_up_with_defaults() {
        // Only the fields an early build knew about.
        let raw = r#"{"name": "Sharma Tyres", "phone": "080-1234567"}"#;

        let company: CompanyDetails = serde_json::from_str(raw).unwrap();

        assert_eq!(company.name, "Sharma Tyres");
        assert_eq!(company.phone, "080-1234567");
        assert_eq!(company.default_tax_rate, dec!(18));
        assert_eq!(company.tagline, "Tyres, Wheels & Service");
        assert_eq!(company.password, None);
    }

    #[test]
    fn empty_object_deserializes_to_defaults() {
        let company: CompanyDetails = serde_json::from_str("{}").unwrap();

        assert_eq!(company, CompanyDetails::default());
    }

    #[test]
    fn saved_fields_survive_a_round_trip() {
        let mut company = CompanyDetails::default();
        company.name = "Sharma Tyres".to_string();
        company.upi_id = "sharmatyres@upi".to_string();
        company.password = Some("wheels".to_string());

        let raw = serde_json::to_string(&company).unwrap();
        let restored: CompanyDetails = serde_json::from_str(&raw).unwrap();

        assert_eq!(restored, company);
    }
}
