//! Overflow-checked decimal arithmetic for the funnel steps.
//!
//! Each helper names the step it computes so an overflow surfaces as
//! [`EngineError::AmountOutOfRange`] for that step instead of a panic.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

fn out_of_range(step: &str) -> EngineError {
    EngineError::AmountOutOfRange {
        step: step.to_string(),
    }
}

pub(crate) fn mul(lhs: Decimal, rhs: Decimal, step: &str) -> EngineResult<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| out_of_range(step))
}

/// Fails on overflow as well as on a zero divisor.
pub(crate) fn div(lhs: Decimal, rhs: Decimal, step: &str) -> EngineResult<Decimal> {
    lhs.checked_div(rhs).ok_or_else(|| out_of_range(step))
}

pub(crate) fn sum(terms: &[Decimal], step: &str) -> EngineResult<Decimal> {
    terms
        .iter()
        .try_fold(Decimal::ZERO, |acc, term| acc.checked_add(*term))
        .ok_or_else(|| out_of_range(step))
}

/// Subtracts every amount in `subtrahends` from `minuend`, left to right.
pub(crate) fn minus_all(
    minuend: Decimal,
    subtrahends: &[Decimal],
    step: &str,
) -> EngineResult<Decimal> {
    subtrahends
        .iter()
        .try_fold(minuend, |acc, term| acc.checked_sub(*term))
        .ok_or_else(|| out_of_range(step))
}
