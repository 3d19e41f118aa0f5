//! Checkout flow models and card validation.

use chrono::{Datelike, Utc};
use ridgeline_core::{CheckoutId, Money, OrderId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the order will be paid. The backend currently accepts cards only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
        }
    }
}

/// A priced, single-use checkout session returned by the backend.
///
/// Paying consumes it; abandoning it leaves it to expire server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub id: CheckoutId,
    pub subtotal: Money,
    pub tax: Money,
    pub shipping: Money,
    pub total: Money,
}

/// Confirmation returned by a successful payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub order_id: OrderId,
    pub message: Option<String>,
}

/// Errors from local card validation. Nothing is sent to the backend until
/// these pass.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("card number must be 16 digits")]
    InvalidNumber,
    #[error("expiry must be in MM/YY format")]
    MalformedExpiry,
    #[error("card is expired")]
    Expired,
    #[error("security code must be 3 or 4 digits")]
    InvalidCvv,
}

/// Card details as typed by the user.
///
/// Implements `Debug` manually to keep card data out of logs.
#[derive(Clone)]
pub struct CardDetails {
    /// Card number, spaces allowed.
    pub number: String,
    /// Expiry in MM/YY format.
    pub expiry: String,
    /// 3- or 4-digit security code.
    pub cvv: String,
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &"[REDACTED]")
            .field("expiry", &self.expiry)
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

impl CardDetails {
    /// Validate the card locally against the current date.
    ///
    /// # Errors
    ///
    /// Returns an error if the number is not 16 digits (ignoring spaces),
    /// the expiry is malformed or in the past, or the security code is not
    /// 3-4 digits. A card expiring this month is still valid.
    pub fn validate(&self) -> Result<(), CardError> {
        let now = Utc::now();
        self.validate_at(now.year(), now.month())
    }

    fn validate_at(&self, current_year: i32, current_month: u32) -> Result<(), CardError> {
        let digits: String = self
            .number
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if digits.len() != 16 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CardError::InvalidNumber);
        }

        let (month, year) = parse_expiry(&self.expiry).ok_or(CardError::MalformedExpiry)?;
        if (year, month) < (current_year, current_month) {
            return Err(CardError::Expired);
        }

        if !(3..=4).contains(&self.cvv.len()) || !self.cvv.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CardError::InvalidCvv);
        }

        Ok(())
    }
}

/// Parse a strict MM/YY expiry into `(month, full_year)`.
fn parse_expiry(expiry: &str) -> Option<(u32, i32)> {
    let (month_str, year_str) = expiry.split_once('/')?;
    if month_str.len() != 2 || year_str.len() != 2 {
        return None;
    }
    if !month_str.bytes().all(|b| b.is_ascii_digit())
        || !year_str.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let month: u32 = month_str.parse().ok()?;
    let year: i32 = year_str.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }

    Some((month, 2000 + year))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn card(number: &str, expiry: &str, cvv: &str) -> CardDetails {
        CardDetails {
            number: number.to_string(),
            expiry: expiry.to_string(),
            cvv: cvv.to_string(),
        }
    }

    #[test]
    fn test_valid_card_with_spaces() {
        let card = card("4111 1111 1111 1111", "12/26", "123");
        assert!(card.validate_at(2026, 8).is_ok());
    }

    #[test]
    fn test_number_must_be_sixteen_digits() {
        assert!(matches!(
            card("4111 1111 1111 111", "12/26", "123").validate_at(2026, 8),
            Err(CardError::InvalidNumber)
        ));
        assert!(matches!(
            card("4111-1111-1111-1111", "12/26", "123").validate_at(2026, 8),
            Err(CardError::InvalidNumber)
        ));
    }

    #[test]
    fn test_expiry_must_be_mm_slash_yy() {
        for expiry in ["1/26", "12/2026", "13/26", "00/26", "12-26", "ab/cd"] {
            assert!(
                matches!(
                    card("4111111111111111", expiry, "123").validate_at(2026, 8),
                    Err(CardError::MalformedExpiry)
                ),
                "expiry {expiry:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_expired_card_is_rejected() {
        assert!(matches!(
            card("4111111111111111", "07/26", "123").validate_at(2026, 8),
            Err(CardError::Expired)
        ));
        assert!(matches!(
            card("4111111111111111", "12/25", "123").validate_at(2026, 8),
            Err(CardError::Expired)
        ));
    }

    #[test]
    fn test_card_expiring_this_month_is_valid() {
        assert!(card("4111111111111111", "08/26", "123")
            .validate_at(2026, 8)
            .is_ok());
    }

    #[test]
    fn test_cvv_must_be_three_or_four_digits() {
        assert!(matches!(
            card("4111111111111111", "12/26", "12").validate_at(2026, 8),
            Err(CardError::InvalidCvv)
        ));
        assert!(matches!(
            card("4111111111111111", "12/26", "12345").validate_at(2026, 8),
            Err(CardError::InvalidCvv)
        ));
        assert!(card("4111111111111111", "12/26", "1234")
            .validate_at(2026, 8)
            .is_ok());
    }

    #[test]
    fn test_debug_redacts_card_data() {
        let card = card("4111111111111111", "12/26", "123");
        let debug_output = format!("{card:?}");

        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("4111111111111111"));
        assert!(!debug_output.contains("123\""));
    }
}
