//! Totals computation for a quotation.
//!
//! Unit prices are entered tax inclusive, the way tyre counters quote them.
//! The subtotal and tax figures are therefore backed OUT of the gross with a
//! divisor instead of being added on top of a net price.
//!
//! # Computation steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Gross total: Σ quantity × unit price across the rows |
//! | 2    | Tax divisor: 1 + rate ÷ 100 when the rate is positive, else 1 |
//! | 3    | Subtotal: gross ÷ divisor, the pre-tax value (rounded to paise) |
//! | 4    | Total tax: gross − subtotal, so the split reconciles exactly |
//! | 5    | Total after discount: gross − discount (discount is a flat amount) |
//! | 6    | Grand total: step 5 rounded to the whole rupee |
//! | 7    | Round-off: grand total − total after discount (signed) |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::calculations::QuoteTotals;
//! use quote_core::models::LineItem;
//!
//! let items = vec![LineItem::new("195/65 R15 tubeless", dec!(4), dec!(2500))];
//!
//! let totals = QuoteTotals::calculate(&items, dec!(0), dec!(18));
//!
//! assert_eq!(totals.gross_total, dec!(10000));
//! assert_eq!(totals.subtotal, dec!(8474.58));
//! assert_eq!(totals.total_tax, dec!(1525.42));
//! assert_eq!(totals.grand_total, dec!(10000));
//! assert_eq!(totals.round_off, dec!(0));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{round_half_up, round_rupee};
use crate::models::{LineItem, Quotation};

/// Computed pricing figures for one quotation.
///
/// The computation is pure: the editing screen and the read-only preview
/// both derive these from the same inputs and always agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    /// Sum of quantity × unit price across the rows, tax included.
    pub gross_total: Decimal,

    /// Pre-tax value backed out of the gross.
    /// Equals the gross when no tax rate is set.
    pub subtotal: Decimal,

    /// Tax portion of the gross. Always `gross_total − subtotal`, so
    /// subtotal plus tax reconciles to the gross to the paisa.
    pub total_tax: Decimal,

    /// Gross minus the flat discount. May go negative when the discount
    /// exceeds the gross; nothing clamps it.
    pub total_after_discount: Decimal,

    /// Total after discount rounded to the whole rupee.
    pub grand_total: Decimal,

    /// Signed difference between the grand total and the unrounded total,
    /// shown on the quote so the figures visibly add up.
    pub round_off: Decimal,
}

impl QuoteTotals {
    /// Computes every figure from the raw inputs.
    pub fn calculate(
        line_items: &[LineItem],
        discount: Decimal,
        tax_rate: Decimal,
    ) -> Self {
        let gross_total = gross_total(line_items);

        // Back the tax out of the tax-inclusive gross
        let divisor = tax_divisor(tax_rate);
        let subtotal = subtotal(gross_total, divisor);
        let total_tax = gross_total - subtotal;

        // The discount applies to the gross, not the pre-tax subtotal
        let total_after_discount = gross_total - discount;
        let grand_total = round_rupee(total_after_discount);
        let round_off = grand_total - total_after_discount;

        Self {
            gross_total,
            subtotal,
            total_tax,
            total_after_discount,
            grand_total,
            round_off,
        }
    }

    /// Convenience wrapper taking the inputs straight from a quotation.
    pub fn for_quote(quote: &Quotation) -> Self {
        Self::calculate(&quote.line_items, quote.discount, quote.tax_rate)
    }
}

/// Sums quantity × unit price across the rows.
fn gross_total(line_items: &[LineItem]) -> Decimal {
    line_items.iter().map(LineItem::amount).sum()
}

/// 1 + rate ÷ 100 for a positive rate, 1 otherwise.
fn tax_divisor(tax_rate: Decimal) -> Decimal {
    if tax_rate > Decimal::ZERO {
        Decimal::ONE + tax_rate / Decimal::ONE_HUNDRED
    } else {
        Decimal::ONE
    }
}

/// Backs the pre-tax value out of the gross.
/// With a divisor of 1 the gross passes through untouched.
fn subtotal(
    gross_total: Decimal,
    divisor: Decimal,
) -> Decimal {
    if divisor > Decimal::ONE {
        round_half_up(gross_total / divisor)
    } else {
        gross_total
    }
}
