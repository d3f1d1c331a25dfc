use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{LineItem, QuoteStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    pub id: Uuid,
    pub quote_number: String,
    pub date: NaiveDate,

    // Customer block
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_address: Option<String>,

    // Vehicle block
    #[serde(default)]
    pub vehicle_make: Option<String>,
    #[serde(default)]
    pub vehicle_model: Option<String>,
    #[serde(default)]
    pub vehicle_registration: Option<String>,

    /// Display order is insertion order; rows are never sorted.
    pub line_items: Vec<LineItem>,
    /// Fixed amount off the tax-inclusive total, not a percentage.
    #[serde(default)]
    pub discount: Decimal,
    /// Percent, e.g. 18 for 18% GST.
    #[serde(default)]
    pub tax_rate: Decimal,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: QuoteStatus,
}

impl Quotation {
    /// Case-insensitive substring match over the fields the search box
    /// covers: quote number, customer name, phone, and the vehicle block.
    /// An empty query matches everything.
    pub fn matches(
        &self,
        query: &str,
    ) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let fixed = [Some(self.quote_number.as_str()), Some(self.customer_name.as_str())];
        let optional = [
            self.customer_phone.as_deref(),
            self.vehicle_make.as_deref(),
            self.vehicle_model.as_deref(),
            self.vehicle_registration.as_deref(),
        ];

        fixed
            .into_iter()
            .chain(optional)
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Replaces the quotation carrying the same id, or appends when none does.
pub fn upsert_quote(
    quotes: &mut Vec<Quotation>,
    quote: Quotation,
) {
    match quotes.iter_mut().find(|q| q.id == quote.id) {
        Some(slot) => *slot = quote,
        None => quotes.push(quote),
    }
}

/// Removes the quotation with the given id.
/// Returns `true` when something was actually removed.
pub fn remove_quote(
    quotes: &mut Vec<Quotation>,
    id: Uuid,
) -> bool {
    let before = quotes.len();
    quotes.retain(|q| q.id != id);
    quotes.len() != before
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample_quote(number: &str, customer: &str) -> Quotation {
        Quotation {
            id: Uuid::new_v4(),
            quote_number: number.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 8, 22).unwrap(),
            customer_name: customer.to_string(),
            customer_phone: Some("9876543210".to_string()),
            customer_email: None,
            customer_address: None,
            vehicle_make: Some("Maruti".to_string()),
            vehicle_model: Some("Swift".to_string()),
            vehicle_registration: Some("KA01AB1234".to_string()),
            line_items: vec![LineItem::new("185/65 R15", dec!(4), dec!(3200))],
            discount: Decimal::ZERO,
            tax_rate: dec!(18),
            notes: String::new(),
            status: QuoteStatus::Draft,
        }
    }

    // =========================================================================
    // matches tests
    // =========================================================================

    #[test]
    fn matches_empty_query_matches_everything() {
        let quote = sample_quote("QT-220825-0001", "Ramesh Kumar");

        assert!(quote.matches(""));
        assert!(quote.matches("   "));
    }

    #[test]
    fn matches_is_case_insensitive() {
        let quote = sample_quote("QT-220825-0001", "Ramesh Kumar");

        assert!(quote.matches("ramesh"));
        assert!(quote.matches("RAMESH"));
        assert!(quote.matches("qt-220825"));
    }

    #[test]
    fn matches_searches_vehicle_fields() {
        let quote = sample_quote("QT-220825-0001", "Ramesh Kumar");

        assert!(quote.matches("swift"));
        assert!(quote.matches("ka01ab"));
    }

    #[test]
    fn matches_searches_phone() {
        let quote = sample_quote("QT-220825-0001", "Ramesh Kumar");

        assert!(quote.matches("98765"));
    }

    #[test]
    fn matches_rejects_unrelated_query() {
        let quote = sample_quote("QT-220825-0001", "Ramesh Kumar");

        assert!(!quote.matches("suresh"));
    }

    #[test]
    fn matches_skips_absent_optional_fields() {
        let mut quote = sample_quote("QT-220825-0001", "Ramesh Kumar");
        quote.vehicle_make = None;
        quote.vehicle_model = None;
        quote.vehicle_registration = None;
        quote.customer_phone = None;

        assert!(!quote.matches("swift"));
        assert!(quote.matches("ramesh"));
    }

    // =========================================================================
    // upsert_quote / remove_quote tests
    // =========================================================================

    #[test]
    fn upsert_appends_new_quote() {
        let mut quotes = vec![sample_quote("QT-220825-0001", "Ramesh Kumar")];
        let fresh = sample_quote("QT-220825-0002", "Suresh Rao");

        upsert_quote(&mut quotes, fresh);

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[1].quote_number, "QT-220825-0002");
    }

    #[test]
    fn upsert_replaces_quote_with_same_id_in_place() {
        let mut quotes = vec![
            sample_quote("QT-220825-0001", "Ramesh Kumar"),
            sample_quote("QT-220825-0002", "Suresh Rao"),
        ];
        let mut edited = quotes[0].clone();
        edited.customer_name = "Ramesh K".to_string();
        edited.discount = dec!(500);

        upsert_quote(&mut quotes, edited);

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].customer_name, "Ramesh K");
        assert_eq!(quotes[0].discount, dec!(500));
        // The other entry is untouched.
        assert_eq!(quotes[1].customer_name, "Suresh Rao");
    }

    #[test]
    fn remove_drops_only_the_matching_quote() {
        let mut quotes = vec![
            sample_quote("QT-220825-0001", "Ramesh Kumar"),
            sample_quote("QT-220825-0002", "Suresh Rao"),
        ];
        let target = quotes[0].id;

        let removed = remove_quote(&mut quotes, target);

        assert!(removed);
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].quote_number, "QT-220825-0002");
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut quotes = vec![sample_quote("QT-220825-0001", "Ramesh Kumar")];

        let removed = remove_quote(&mut quotes, Uuid::new_v4());

        assert!(!removed);
        assert_eq!(quotes.len(), 1);
    }

    // =========================================================================
    // serde tests
    // =========================================================================

    #[test]
    fn deserializes_record_with_missing_optional_fields() {
        // A record written before the vehicle block existed.
        let raw = r#"{
            "id": "b3c94b9e-9d58-4c54-9b5c-0717ab1d2e3f",
            "quote_number": "QT-010125-0001",
            "date": "2025-01-01",
            "customer_name": "Walk-in",
            "line_items": []
        }"#;

        let quote: Quotation = serde_json::from_str(raw).unwrap();

        assert_eq!(quote.customer_name, "Walk-in");
        assert_eq!(quote.vehicle_make, None);
        assert_eq!(quote.discount, Decimal::ZERO);
        assert_eq!(quote.status, QuoteStatus::Draft);
    }
}
