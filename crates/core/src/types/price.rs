//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog data and browsers hand prices around as display strings
//! (`"₹1,299"`, `"899"`, `"Rs. 799.50"`). Those are parsed once at the
//! boundary into [`Price`], which stores an exact [`Decimal`] amount rounded
//! to two places together with its currency.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// No digits were supplied.
    #[error("price cannot be empty")]
    Empty,
    /// The amount is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount is above [`Price::MAX_AMOUNT`].
    #[error("price cannot exceed {}", Price::MAX_AMOUNT)]
    TooLarge,
}

/// ISO 4217 currency codes the store can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol placed before the amount.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }

    /// Strip a leading currency marker, returning the currency it names.
    fn strip_prefix(input: &str) -> (Self, &str) {
        const MARKERS: &[(&str, CurrencyCode)] = &[
            ("₹", CurrencyCode::INR),
            ("Rs.", CurrencyCode::INR),
            ("Rs", CurrencyCode::INR),
            ("INR", CurrencyCode::INR),
            ("$", CurrencyCode::USD),
            ("USD", CurrencyCode::USD),
            ("€", CurrencyCode::EUR),
            ("EUR", CurrencyCode::EUR),
            ("£", CurrencyCode::GBP),
            ("GBP", CurrencyCode::GBP),
        ];

        for (marker, currency) in MARKERS {
            if let Some(rest) = input.strip_prefix(marker) {
                return (*currency, rest.trim_start());
            }
        }
        (Self::default(), input)
    }
}

/// A non-negative price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Largest amount [`Price::parse`] accepts (one crore).
    pub const MAX_AMOUNT: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

    /// Create a new price, rounding the amount to two decimal places.
    #[must_use]
    pub fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount: amount.round_dp(2),
            currency_code,
        }
    }

    /// Create a price in the store's default currency (INR).
    #[must_use]
    pub fn inr(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::INR)
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency_code,
        }
    }

    /// Parse a display string such as `"₹1,299"`, `"899"` or `"Rs. 799.50"`.
    ///
    /// Thousands separators are ignored. Inputs without a currency marker
    /// are taken to be INR.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError`] if the input is empty, not a number, negative,
    /// or above [`Price::MAX_AMOUNT`].
    ///
    /// # Examples
    ///
    /// ```
    /// use armour_core::{CurrencyCode, Price};
    ///
    /// let price = Price::parse("₹1,299").unwrap();
    /// assert_eq!(price.amount.to_string(), "1299");
    /// assert_eq!(price.currency_code, CurrencyCode::INR);
    /// assert!(Price::parse("free").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let (currency, rest) = CurrencyCode::strip_prefix(trimmed);
        let digits: String = rest.chars().filter(|c| *c != ',' && *c != '_').collect();
        if digits.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount =
            Decimal::from_str(&digits).map_err(|_| PriceError::Invalid(input.to_owned()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        if amount > Self::MAX_AMOUNT {
            return Err(PriceError::TooLarge);
        }

        Ok(Self::new(amount, currency))
    }

    /// Multiply by a quantity (line totals).
    ///
    /// Returns `None` if the amount overflows.
    #[must_use]
    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.amount
            .checked_mul(Decimal::from(quantity))
            .map(|amount| Self::new(amount, self.currency_code))
    }

    /// Add another price of the same currency.
    ///
    /// Returns `None` on a currency mismatch or overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        if self.currency_code != other.currency_code {
            return None;
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Self::new(amount, self.currency_code))
    }

    /// Format for display, e.g. `₹1299` or `₹799.50`.
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.currency_code.symbol();
        if self.amount.fract().is_zero() {
            write!(f, "{symbol}{}", self.amount.trunc())
        } else {
            write!(f, "{symbol}{:.2}", self.amount)
        }
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain_number() {
        let price = Price::parse("899").unwrap();
        assert_eq!(price.amount, dec("899"));
        assert_eq!(price.currency_code, CurrencyCode::INR);
    }

    #[test]
    fn test_parse_rupee_symbol_and_separators() {
        assert_eq!(Price::parse("₹1,299").unwrap().amount, dec("1299"));
        assert_eq!(Price::parse("₹ 3,899").unwrap().amount, dec("3899"));
    }

    #[test]
    fn test_parse_rs_prefix_with_paise() {
        let price = Price::parse("Rs. 799.50").unwrap();
        assert_eq!(price.amount, dec("799.50"));
        assert_eq!(price.currency_code, CurrencyCode::INR);
    }

    #[test]
    fn test_parse_other_currency() {
        let price = Price::parse("$19.99").unwrap();
        assert_eq!(price.currency_code, CurrencyCode::USD);
        assert_eq!(price.amount, dec("19.99"));
    }

    #[test]
    fn test_parse_rounds_to_two_places() {
        assert_eq!(Price::parse("10.005").unwrap().amount, dec("10.00"));
        assert_eq!(Price::parse("10.015").unwrap().amount, dec("10.02"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("₹"), Err(PriceError::Empty));
        assert!(matches!(Price::parse("abc"), Err(PriceError::Invalid(_))));
        assert_eq!(Price::parse("-5"), Err(PriceError::Negative));
    }

    #[test]
    fn test_parse_bounds_amount() {
        assert_eq!(Price::parse("10,000,000").unwrap().amount, Price::MAX_AMOUNT);
        assert_eq!(Price::parse("10000000.01"), Err(PriceError::TooLarge));
        assert_eq!(
            Price::parse("79228162514264337593543950335"),
            Err(PriceError::TooLarge)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::inr(dec("799")).to_string(), "₹799");
        assert_eq!(Price::inr(dec("799.5")).to_string(), "₹799.50");
        assert_eq!(Price::inr(dec("799.00")).to_string(), "₹799");
    }

    #[test]
    fn test_times_and_add() {
        let tee = Price::inr(dec("899"));
        let line = tee.checked_times(3).unwrap();
        assert_eq!(line.amount, dec("2697"));

        let total = line.checked_add(Price::inr(dec("3"))).unwrap();
        assert_eq!(total.amount, dec("2700"));

        let dollars = Price::new(dec("1"), CurrencyCode::USD);
        assert!(total.checked_add(dollars).is_none());
    }

    #[test]
    fn test_arithmetic_overflow_is_none() {
        let huge = Price::inr(Decimal::MAX);
        assert!(huge.checked_times(2).is_none());
        assert!(huge.checked_add(huge).is_none());
        assert_eq!(huge.checked_times(1), Some(huge));
    }

    #[test]
    fn test_serde_roundtrip_keeps_exact_amount() {
        let price = Price::parse("₹1,299.75").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }
}
