use std::ffi::OsStr;
use std::process::Command;

use anyhow::Context;
use rust_decimal::Decimal;
use thiserror::Error;

use quote_core::calculations::common::round_half_up;
use quote_core::models::Quotation;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Formats an amount as `₹1,23,456.78` with Indian digit grouping.
///
/// The value is rounded to paise first; negative amounts keep a leading
/// minus before the currency symbol.
pub fn format_money(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}₹{}.{frac_part}", group_indian(int_part))
}

/// Formats a whole-rupee figure such as a grand total: `₹9,500`.
pub fn format_rupees(value: Decimal) -> String {
    let text = format!("{:.0}", value.abs());
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}₹{}", group_indian(&text))
}

/// Round-off display keeps its sign: `+₹0.01` or `-₹0.49`.
pub fn format_signed_money(value: Decimal) -> String {
    if value.is_sign_negative() && !value.is_zero() {
        format_money(value)
    } else {
        format!("+{}", format_money(value))
    }
}

/// Indian grouping: the last three digits, then pairs.
/// `1234567` becomes `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups = Vec::new();
    let head_bytes = head.as_bytes();
    let mut end = head_bytes.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

/// One-line vehicle description: "Maruti Swift (KA01AB1234)".
/// `None` when no vehicle field is filled in.
pub fn vehicle_label(quote: &Quotation) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(make) = &quote.vehicle_make {
        parts.push(make);
    }
    if let Some(model) = &quote.vehicle_model {
        parts.push(model);
    }
    let name = parts.join(" ");

    match (&quote.vehicle_registration, name.is_empty()) {
        (Some(reg), true) => Some(reg.clone()),
        (Some(reg), false) => Some(format!("{name} ({reg})")),
        (None, true) => None,
        (None, false) => Some(name),
    }
}

/// Hands a file path or URL to the platform opener. Fire and forget: the
/// spawned process is not waited on and its exit status is not checked.
pub fn open_external(target: impl AsRef<OsStr>) -> anyhow::Result<()> {
    let target = target.as_ref();

    #[cfg(target_os = "macos")]
    let mut command = Command::new("open");
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    };
    #[cfg(all(unix, not(target_os = "macos")))]
    let mut command = Command::new("xdg-open");

    command
        .arg(target)
        .spawn()
        .with_context(|| format!("launching opener for {}", target.to_string_lossy()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // parse_decimal tests
    // =========================================================================

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("12,34,567.89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_decimal_trims_whitespace() {
        assert_eq!(parse_decimal("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        assert!(parse_decimal("four").is_err());
    }

    // =========================================================================
    // formatting tests
    // =========================================================================

    #[test]
    fn format_money_groups_indian_style() {
        assert_eq!(format_money(dec!(1234567.89)), "₹12,34,567.89");
        assert_eq!(format_money(dec!(100000)), "₹1,00,000.00");
        assert_eq!(format_money(dec!(999)), "₹999.00");
    }

    #[test]
    fn format_money_rounds_to_paise() {
        assert_eq!(format_money(dec!(8474.575)), "₹8,474.58");
    }

    #[test]
    fn format_money_keeps_minus_in_front() {
        assert_eq!(format_money(dec!(-400)), "-₹400.00");
    }

    #[test]
    fn format_rupees_drops_the_paise() {
        assert_eq!(format_rupees(dec!(9500)), "₹9,500");
        assert_eq!(format_rupees(dec!(-400)), "-₹400");
    }

    #[test]
    fn format_signed_money_marks_positive_round_off() {
        assert_eq!(format_signed_money(dec!(0.01)), "+₹0.01");
        assert_eq!(format_signed_money(dec!(-0.49)), "-₹0.49");
        assert_eq!(format_signed_money(dec!(0)), "+₹0.00");
    }

    #[test]
    fn group_indian_handles_boundaries() {
        assert_eq!(group_indian("1"), "1");
        assert_eq!(group_indian("123"), "123");
        assert_eq!(group_indian("1234"), "1,234");
        assert_eq!(group_indian("12345"), "12,345");
        assert_eq!(group_indian("123456"), "1,23,456");
        assert_eq!(group_indian("10000000"), "1,00,00,000");
    }

    // =========================================================================
    // vehicle label tests
    // =========================================================================

    fn quote_with_vehicle(
        make: Option<&str>,
        model: Option<&str>,
        registration: Option<&str>,
    ) -> Quotation {
        Quotation {
            vehicle_make: make.map(str::to_string),
            vehicle_model: model.map(str::to_string),
            vehicle_registration: registration.map(str::to_string),
            ..sample_quote()
        }
    }

    fn sample_quote() -> Quotation {
        Quotation {
            id: uuid::Uuid::new_v4(),
            quote_number: "QT-220825-0001".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2025, 8, 22).unwrap(),
            customer_name: "Ramesh Kumar".to_string(),
            customer_phone: None,
            customer_email: None,
            customer_address: None,
            vehicle_make: None,
            vehicle_model: None,
            vehicle_registration: None,
            line_items: Vec::new(),
            discount: Decimal::ZERO,
            tax_rate: Decimal::ZERO,
            notes: String::new(),
            status: quote_core::models::QuoteStatus::Draft,
        }
    }

    #[test]
    fn vehicle_label_combines_the_filled_fields() {
        assert_eq!(
            vehicle_label(&quote_with_vehicle(Some("Maruti"), Some("Swift"), Some("KA01AB1234"))),
            Some("Maruti Swift (KA01AB1234)".to_string())
        );
        assert_eq!(
            vehicle_label(&quote_with_vehicle(Some("Maruti"), None, None)),
            Some("Maruti".to_string())
        );
        assert_eq!(
            vehicle_label(&quote_with_vehicle(None, None, Some("KA01AB1234"))),
            Some("KA01AB1234".to_string())
        );
        assert_eq!(vehicle_label(&quote_with_vehicle(None, None, None)), None);
    }
}
