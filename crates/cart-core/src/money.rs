//! Money type for representing monetary values.
//!
//! Uses integer minor units (cents) to avoid floating-point precision
//! issues. All supported currencies use two decimal places; displayed and
//! transmitted amounts are always rendered with exactly two decimals.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CartError;

/// Supported currencies. All are two-decimal currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounding to cents.
    ///
    /// ```
    /// use servicecart_core::money::{Currency, Money};
    /// let price = Money::from_decimal(4.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 499);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * 100.0).round() as i64, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format the bare amount with exactly two decimals (e.g., "14.97").
    ///
    /// This is the form sent to the payment provider.
    pub fn format_amount(&self) -> String {
        let cents = self.amount_cents.abs();
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, cents / 100, cents % 100)
    }

    /// Format as a display string (e.g., "$14.97").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.format_amount())
    }

    /// Try to add another Money value.
    ///
    /// Fails on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Result<Money, CartError> {
        if self.currency != other.currency {
            return Err(CartError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        let sum = self
            .amount_cents
            .checked_add(other.amount_cents)
            .ok_or(CartError::Overflow)?;
        Ok(Money::new(sum, self.currency))
    }

    /// Try to multiply by a scalar quantity.
    pub fn try_mul(&self, factor: i64) -> Result<Money, CartError> {
        let product = self
            .amount_cents
            .checked_mul(factor)
            .ok_or(CartError::Overflow)?;
        Ok(Money::new(product, self.currency))
    }

    /// Sum an iterator of Money values in the given currency.
    pub fn try_sum<'a>(
        iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CartError> {
        let mut total = Money::zero(currency);
        for m in iter {
            total = total.try_add(m)?;
        }
        Ok(total)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let m = Money::new(499, Currency::USD);
        assert_eq!(m.amount_cents, 499);
        assert_eq!(m.currency, Currency::USD);
    }

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(4.99, Currency::USD);
        assert_eq!(m.amount_cents, 499);

        let m = Money::from_decimal(19.0, Currency::USD);
        assert_eq!(m.amount_cents, 1900);
    }

    #[test]
    fn test_format_amount_two_decimals() {
        assert_eq!(Money::new(1497, Currency::USD).format_amount(), "14.97");
        assert_eq!(Money::new(500, Currency::USD).format_amount(), "5.00");
        assert_eq!(Money::new(5, Currency::USD).format_amount(), "0.05");
        assert_eq!(Money::new(-499, Currency::USD).format_amount(), "-4.99");
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.display(), "$49.99");

        let m = Money::new(4999, Currency::GBP);
        assert_eq!(m.display(), "\u{00a3}49.99");
    }

    #[test]
    fn test_money_try_add() {
        let a = Money::new(1000, Currency::USD);
        let b = Money::new(497, Currency::USD);
        assert_eq!(a.try_add(&b).unwrap().amount_cents, 1497);
    }

    #[test]
    fn test_money_currency_mismatch() {
        let usd = Money::new(1000, Currency::USD);
        let eur = Money::new(1000, Currency::EUR);
        assert!(matches!(
            usd.try_add(&eur),
            Err(CartError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_money_overflow() {
        let a = Money::new(i64::MAX, Currency::USD);
        let b = Money::new(1, Currency::USD);
        assert!(matches!(a.try_add(&b), Err(CartError::Overflow)));
        assert!(matches!(a.try_mul(2), Err(CartError::Overflow)));
    }

    #[test]
    fn test_money_try_sum() {
        let values = vec![
            Money::new(499, Currency::USD),
            Money::new(998, Currency::USD),
        ];
        let total = Money::try_sum(values.iter(), Currency::USD).unwrap();
        assert_eq!(total.amount_cents, 1497);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("JPY"), None);
    }
}
