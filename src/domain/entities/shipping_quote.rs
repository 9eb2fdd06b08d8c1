//! # Shipping Quote
//!
//! One priced service tier offered by one carrier.

use crate::domain::value_objects::{CarrierId, Price};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A priced service tier from a carrier.
///
/// Quotes are produced fresh per request and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use shipquote::domain::entities::ShippingQuote;
/// use shipquote::domain::value_objects::{CarrierId, Price};
///
/// let quote = ShippingQuote::new(
///     CarrierId::new("local"),
///     "Standard Delivery",
///     Price::from_units(2200),
///     2,
///     true,
/// );
/// assert_eq!(quote.estimated_days(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingQuote {
    carrier: CarrierId,
    service_type: String,
    price: Price,
    estimated_days: u32,
    tracking_available: bool,
}

impl ShippingQuote {
    /// Creates a new quote.
    #[must_use]
    pub fn new(
        carrier: CarrierId,
        service_type: impl Into<String>,
        price: Price,
        estimated_days: u32,
        tracking_available: bool,
    ) -> Self {
        Self {
            carrier,
            service_type: service_type.into(),
            price,
            estimated_days,
            tracking_available,
        }
    }

    /// Returns the carrier that offered this quote.
    #[inline]
    #[must_use]
    pub fn carrier(&self) -> &CarrierId {
        &self.carrier
    }

    /// Returns the service tier label.
    #[inline]
    #[must_use]
    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    /// Returns the price.
    #[inline]
    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Returns the estimated delivery time in days.
    #[inline]
    #[must_use]
    pub fn estimated_days(&self) -> u32 {
        self.estimated_days
    }

    /// Returns true if the carrier provides tracking for this tier.
    #[inline]
    #[must_use]
    pub fn tracking_available(&self) -> bool {
        self.tracking_available
    }
}

impl fmt::Display for ShippingQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ {} ({} days)",
            self.carrier, self.service_type, self.price, self.estimated_days
        )
    }
}
