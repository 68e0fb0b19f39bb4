//! Swish payment links.
//!
//! Builds the Swish deep link a parent scans to pay out the take-home
//! amount of a calculation. Rendering the link as a QR image is left to the
//! caller.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::round_money;
use crate::error::{EngineError, EngineResult};
use crate::models::CalculationResult;

/// Base URL of the Swish payment deep link.
pub const SWISH_BASE_URL: &str = "https://app.swish.nu/1/p/sw/";

/// Message attached to every payment.
pub const PAYMENT_MESSAGE: &str = "Fickpengar efter skatt";

/// A Swish payment link for a positive amount.
///
/// # Example
///
/// ```
/// use fickpengar::payment::PaymentLink;
/// use rust_decimal::Decimal;
///
/// let link = PaymentLink::new(" 0701234567 ", Decimal::from(110), "Gräsklippning").unwrap();
/// assert_eq!(
///     link.url,
///     "https://app.swish.nu/1/p/sw/?sw=0701234567&amt=110.00&msg=Fickpengar%20efter%20skatt%3A%20Gr%C3%A4sklippning"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLink {
    /// The full deep-link URL.
    pub url: String,
    /// The amount to pay, rounded to two decimals.
    pub amount: Decimal,
}

impl PaymentLink {
    /// Builds a payment link.
    ///
    /// The phone number is trimmed and inserted as-is. The message is
    /// "Fickpengar efter skatt", followed by `: <task>` when the task name is
    /// not empty.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPaymentRequest`] when the trimmed phone
    /// number is empty or the amount is not positive.
    pub fn new(phone: &str, amount: Decimal, task_name: &str) -> EngineResult<Self> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(EngineError::InvalidPaymentRequest {
                message: "Ange ett Swish-nummer.".to_string(),
            });
        }

        if amount <= Decimal::ZERO {
            return Err(EngineError::InvalidPaymentRequest {
                message: "Beloppet är 0 kr. Kontrollera dina inställningar.".to_string(),
            });
        }

        let message = if task_name.is_empty() {
            PAYMENT_MESSAGE.to_string()
        } else {
            format!("{PAYMENT_MESSAGE}: {task_name}")
        };

        let amount = round_money(amount);
        let url = format!(
            "{SWISH_BASE_URL}?sw={phone}&amt={amount}&msg={}",
            encode_uri_component(&message)
        );

        Ok(Self { url, amount })
    }

    /// Builds a payment link for the take-home amount of a result.
    pub fn for_result(phone: &str, result: &CalculationResult) -> EngineResult<Self> {
        Self::new(phone, result.final_net, &result.task.task_name)
    }
}

/// Percent-encodes everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`,
/// byte by byte over the UTF-8 encoding.
fn encode_uri_component(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(char::from(byte)),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}
