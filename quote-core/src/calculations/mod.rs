//! Pricing computations for quotations.
//!
//! This module turns a quotation's line items, discount, and tax rate into
//! the figures shown on screen and on the printed quote. Prices are entered
//! tax inclusive, so tax is backed out of the gross rather than added on top.

pub mod common;
pub mod totals;

pub use totals::QuoteTotals;
