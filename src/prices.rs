//! Prices

use std::{fmt, ops::Deref, str::FromStr};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors that can occur while constructing a [`Price`].
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// Unit prices can not be negative.
    #[error("price can not be negative: {0}")]
    Negative(Decimal),

    /// The amount is not a decimal number.
    #[error("invalid price amount: {0}")]
    InvalidAmount(String),
}

/// A non-negative unit price in major currency units (e.g. `40.50`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Price {
    value: Decimal,
}

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self {
        value: Decimal::ZERO,
    };

    /// Creates a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `value` is below zero.
    pub fn new(value: Decimal) -> Result<Self, PriceError> {
        if value < Decimal::ZERO {
            return Err(PriceError::Negative(value));
        }

        Ok(Self { value })
    }

    /// Creates a price from a whole number of major units.
    pub fn from_units(units: u32) -> Self {
        Self {
            value: Decimal::from(units),
        }
    }

    /// Returns the price as money in the given currency.
    pub fn to_money(self, currency: &Currency) -> Money<'_, Currency> {
        Money::from_decimal(self.value, currency)
    }
}

impl Deref for Price {
    type Target = Decimal;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| PriceError::InvalidAmount(s.to_string()))?;

        Self::new(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_price() -> TestResult {
        let price = Price::new(Decimal::new(4050, 2))?;

        assert_eq!(price.value, Decimal::new(4050, 2));

        Ok(())
    }

    #[test]
    fn new_rejects_negative_values() {
        let result = Price::new(Decimal::new(-1, 0));

        assert_eq!(result, Err(PriceError::Negative(Decimal::new(-1, 0))));
    }

    #[test]
    fn new_accepts_zero() -> TestResult {
        let price = Price::new(Decimal::ZERO)?;

        assert_eq!(price, Price::ZERO);

        Ok(())
    }

    #[test]
    fn price_derefs_to_decimal() {
        let price = Price::from_units(40);

        assert_eq!(*price, Decimal::from(40));
    }

    #[test]
    fn parses_from_str() -> TestResult {
        let price: Price = " 12.75 ".parse()?;

        assert_eq!(*price, Decimal::new(1275, 2));

        Ok(())
    }

    #[test]
    fn parse_rejects_garbage() {
        let result = "twelve".parse::<Price>();

        assert!(matches!(result, Err(PriceError::InvalidAmount(_))));
    }

    #[test]
    fn displays_two_decimal_places() {
        assert_eq!(Price::from_units(40).to_string(), "40.00");
    }

    #[test]
    fn converts_to_money() {
        let money = Price::from_units(50).to_money(iso::RUB);

        assert_eq!(money, Money::from_major(50, iso::RUB));
    }
}
