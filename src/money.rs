//! Monetary rounding shared by the whole engine.
//!
//! Currency in this domain has no sub-unit, so every figure that leaves the
//! engine is rounded to a whole unit. All rounding goes through [`round_money`]
//! so rows and totals can never disagree on the mode.

use rust_decimal::{Decimal, RoundingStrategy};

/// Monetary amounts.
pub type Money = Decimal;

/// Rates as plain fractions (0.01 = 1% per period).
pub type Rate = Decimal;

/// Rounds a monetary value to a whole currency unit, ties to even.
pub fn round_money(value: Money) -> Money {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}
