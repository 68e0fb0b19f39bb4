//! Swedish amount and percentage formatting.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::calculation::round_money;

/// Thousands separator used by the Swedish locale.
pub const GROUP_SEPARATOR: char = '\u{a0}';

/// Formats an amount in kronor the Swedish way.
///
/// Two decimals after a decimal comma, non-breaking spaces between
/// thousands groups and a ` kr` suffix. Negative amounts get a leading
/// `-` in front of the absolute value.
///
/// # Example
///
/// ```
/// use fickpengar::export::format_sek;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = Decimal::from_str("-12345.6").unwrap();
/// assert_eq!(format_sek(amount), "-12\u{a0}345,60 kr");
/// ```
pub fn format_sek(amount: Decimal) -> String {
    let rounded = round_money(amount);
    let digits = rounded.abs().to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("{sign}{grouped},{fraction} kr")
}

/// Formats `amount` as a share of `gross`: absolute value, one decimal,
/// `%` suffix. Returns an empty string when gross is zero or the share does
/// not fit in a decimal.
pub fn format_pct_of_gross(amount: Decimal, gross: Decimal) -> String {
    let Some(share) = amount
        .abs()
        .checked_div(gross)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    else {
        return String::new();
    };

    let mut pct = share.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    pct.rescale(1);
    if pct.is_zero() {
        pct.set_sign_positive(true);
    }
    format!("{pct}%")
}
