//! Monetary amount type.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Money`] value.
#[derive(thiserror::Error, Debug, Clone)]
pub enum MoneyError {
    /// The amount is negative.
    #[error("money amount cannot be negative")]
    Negative,
}

/// A non-negative monetary amount in the store currency.
///
/// Backed by [`Decimal`] so arithmetic on prices, line totals, and order
/// totals stays exact. Values received from the backend are trusted as-is;
/// [`Money::new`] validates amounts constructed locally.
///
/// ## Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use ridgeline_core::Money;
///
/// let price = Money::new(Decimal::new(2999, 2)).unwrap();
/// assert_eq!(price.to_string(), "$29.99");
/// assert_eq!(price.times(3).to_string(), "$89.97");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new `Money` from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`] if the amount is less than zero.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative);
        }
        Ok(Self(amount))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiply the amount by a unit count, e.g. for cart line totals.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.amount()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(mantissa: i64, scale: u32) -> Decimal {
        Decimal::new(mantissa, scale)
    }

    #[test]
    fn test_new_accepts_non_negative() {
        assert!(Money::new(dec(2999, 2)).is_ok());
        assert!(Money::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(
            Money::new(dec(-1, 2)),
            Err(MoneyError::Negative)
        ));
    }

    #[test]
    fn test_times() {
        let price = Money::new(dec(1050, 2)).unwrap();
        assert_eq!(price.times(3).amount(), dec(3150, 2));
        assert_eq!(price.times(0), Money::ZERO);
    }

    #[test]
    fn test_add_and_sum() {
        let a = Money::new(dec(1000, 2)).unwrap();
        let b = Money::new(dec(550, 2)).unwrap();
        assert_eq!((a + b).amount(), dec(1550, 2));

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.amount(), dec(2100, 2));
    }

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Money::new(dec(2999, 2)).unwrap().to_string(), "$29.99");
        assert_eq!(Money::new(dec(5, 0)).unwrap().to_string(), "$5.00");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_serde_uses_plain_numbers() {
        let money: Money = serde_json::from_str("29.99").unwrap();
        assert_eq!(money.amount(), dec(2999, 2));

        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, "29.99");
    }

    #[test]
    fn test_ordering() {
        let cheap = Money::new(dec(999, 2)).unwrap();
        let pricey = Money::new(dec(10000, 2)).unwrap();
        assert!(cheap < pricey);
    }
}
