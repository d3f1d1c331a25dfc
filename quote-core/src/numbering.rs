//! Quote number generation.
//!
//! Numbers look like `QT-220825-0003`: a prefix built from the quote date
//! (day, month, two-digit year) and a four-digit serial scoped to that date.
//! The serial is derived by counting the quotes already carrying the same
//! prefix, so it resets every day and is only as unique as the collection it
//! was counted against: deleting a quote frees its serial for reuse, and two
//! unsaved drafts opened back to back receive the same number.

use chrono::NaiveDate;

use crate::models::Quotation;

/// Builds the quote number for a new draft dated `date`.
///
/// Called exactly once when a draft is opened; editing an existing
/// quotation never regenerates its number.
pub fn next_quote_number(
    existing: &[Quotation],
    date: NaiveDate,
) -> String {
    let prefix = date_prefix(date);
    let serial = existing
        .iter()
        .filter(|q| q.quote_number.starts_with(&prefix))
        .count()
        + 1;
    format!("{prefix}{serial:04}")
}

/// `QT-DDMMYY-` for the given date.
fn date_prefix(date: NaiveDate) -> String {
    format!("QT-{}-", date.format("%d%m%y"))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::*;
    use crate::models::{QuoteStatus, Quotation};

    fn quote_numbered(number: &str) -> Quotation {
        Quotation {
            id: Uuid::new_v4(),
            quote_number: number.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 8, 22).unwrap(),
            customer_name: "Walk-in".to_string(),
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
            status: QuoteStatus::Draft,
        }
    }

    fn aug_22() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 22).unwrap()
    }

    #[test]
    fn first_quote_of_the_day_gets_serial_0001() {
        let number = next_quote_number(&[], aug_22());

        assert_eq!(number, "QT-220825-0001");
    }

    #[test]
    fn serial_counts_quotes_with_the_same_prefix() {
        let existing = vec![
            quote_numbered("QT-220825-0001"),
            quote_numbered("QT-220825-0002"),
        ];

        let number = next_quote_number(&existing, aug_22());

        assert_eq!(number, "QT-220825-0003");
    }

    #[test]
    fn quotes_from_other_days_are_ignored() {
        let existing = vec![
            quote_numbered("QT-210825-0001"),
            quote_numbered("QT-210825-0002"),
            quote_numbered("QT-220825-0001"),
        ];

        let number = next_quote_number(&existing, aug_22());

        assert_eq!(number, "QT-220825-0002");
    }

    #[test]
    fn serial_is_zero_padded_to_four_digits() {
        let existing: Vec<_> = (1..=11)
            .map(|n| quote_numbered(&format!("QT-220825-{n:04}")))
            .collect();

        let number = next_quote_number(&existing, aug_22());

        assert_eq!(number, "QT-220825-0012");
    }

    #[test]
    fn serial_widens_past_9999() {
        let existing = vec![quote_numbered("QT-220825-0001"); 9999];

        let number = next_quote_number(&existing, aug_22());

        assert_eq!(number, "QT-220825-10000");
    }

    #[test]
    fn deleting_a_quote_frees_its_serial() {
        // 0001 and 0002 existed; 0001 was deleted.
        let existing = vec![quote_numbered("QT-220825-0002")];

        let number = next_quote_number(&existing, aug_22());

        // Count-based numbering reissues 0002.
        assert_eq!(number, "QT-220825-0002");
    }

    #[test]
    fn single_digit_day_and_month_are_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();

        let number = next_quote_number(&[], date);

        assert_eq!(number, "QT-050125-0001");
    }
}
