//! Monetary rounding.
//!
//! Every monetary quantity is rounded to two decimals before it is stored in
//! a line or fed into the next step, so rounding error compounds step by
//! step exactly as the funnel prescribes.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to two decimal places, midpoints away from zero.
///
/// The result always carries a scale of exactly two and zero is never
/// negative.
///
/// # Examples
///
/// ```
/// use fickpengar::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("0.125").unwrap()).to_string(), "0.13");
/// assert_eq!(round_money(Decimal::from_str("-0.125").unwrap()).to_string(), "-0.13");
/// assert_eq!(round_money(Decimal::from(1000)).to_string(), "1000.00");
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Flips an already rounded amount into an outflow (or back).
pub fn negate(amount: Decimal) -> Decimal {
    round_money(-amount)
}
