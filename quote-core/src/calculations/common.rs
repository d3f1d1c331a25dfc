//! Common utility functions for pricing calculations.
//!
//! This module provides the rounding helpers shared by the totals
//! calculation and anything else that formats money.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(8474.574)), dec!(8474.57));
/// assert_eq!(round_half_up(dec!(8474.575)), dec!(8474.58));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a decimal value to the nearest whole rupee, half away from zero.
///
/// Grand totals are always whole-rupee figures; the difference between the
/// rounded and unrounded value is reported separately as the round-off.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_rupee;
///
/// assert_eq!(round_rupee(dec!(9499.49)), dec!(9499));
/// assert_eq!(round_rupee(dec!(9499.50)), dec!(9500));
/// assert_eq!(round_rupee(dec!(-10.5)), dec!(-11)); // Away from zero
/// ```
pub fn round_rupee(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
