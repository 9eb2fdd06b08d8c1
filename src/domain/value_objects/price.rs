//! # Price Value Object
//!
//! Non-negative decimal amount in the single implicit currency.

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A non-negative monetary amount.
///
/// Used both for quote prices and for the insurable value of a package.
/// No currency conversion is performed anywhere in the crate.
///
/// # Examples
///
/// ```
/// use shipquote::domain::value_objects::Price;
///
/// let price = Price::from_units(1500);
/// let total = price + Price::from_units(500);
/// assert_eq!(total, Price::from_units(2000));
/// assert!(Price::new(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest representable amount.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Creates a price from a float.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the value is negative or not finite.
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::invalid_price("value must be finite"));
        }
        let decimal = Decimal::from_f64(value)
            .ok_or_else(|| DomainError::invalid_price(format!("{value} is out of range")))?;
        Self::from_decimal(decimal)
    }

    /// Creates a price from a decimal.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the value is negative.
    pub fn from_decimal(value: Decimal) -> DomainResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::invalid_price(format!("{value} is negative")));
        }
        Ok(Self(value))
    }

    /// Creates a price from whole currency units.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Returns the inner decimal.
    #[inline]
    #[must_use]
    pub fn get(self) -> Decimal {
        self.0
    }

    /// Returns the amount as a float, for wire formats that need one.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Multiplies by a non-negative factor, saturating at the largest
    /// representable amount. A negative factor is taken by magnitude.
    #[must_use]
    pub fn saturating_mul(self, factor: Decimal) -> Self {
        Self(self.0.saturating_mul(factor.abs()))
    }

    /// Rounds to whole units, halves away from zero.
    #[must_use]
    pub fn round(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl TryFrom<Decimal> for Price {
    type Error = DomainError;

    fn try_from(value: Decimal) -> DomainResult<Self> {
        Self::from_decimal(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_and_nan() {
        assert!(Price::new(-0.5).is_err());
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(f64::INFINITY).is_err());
    }

    #[test]
    fn accepts_zero() {
        assert_eq!(Price::new(0.0).unwrap(), Price::ZERO);
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(Price::new(2699.5).unwrap().round(), Price::from_units(2700));
        assert_eq!(Price::new(2699.49).unwrap().round(), Price::from_units(2699));
    }

    #[test]
    fn scaling_saturates_instead_of_overflowing() {
        assert_eq!(Price::MAX.saturating_mul(Decimal::from(2)), Price::MAX);
        assert_eq!(
            Price::from_units(1000).saturating_mul(Decimal::new(15, 1)),
            Price::from_units(1500)
        );
    }

    #[test]
    fn display_is_normalized() {
        assert_eq!(Price::new(1200.0).unwrap().to_string(), "1200");
        assert_eq!(Price::new(12.50).unwrap().to_string(), "12.5");
    }

    #[test]
    fn deserialization_rejects_negative() {
        assert!(serde_json::from_str::<Price>(r#""-90000""#).is_err());
        assert!(serde_json::from_str::<Price>("-1.5").is_err());
        assert_eq!(
            serde_json::from_str::<Price>(r#""1250.50""#).unwrap(),
            Price::new(1250.5).unwrap()
        );
    }

    #[test]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_string(&Price::from_units(700)).unwrap();
        assert_eq!(json, r#""700""#);
        assert_eq!(serde_json::from_str::<Price>(&json).unwrap(), Price::from_units(700));
    }

    #[test]
    fn ordering_follows_amount() {
        assert!(Price::from_units(100) < Price::from_units(200));
    }
}
