//! # Shipment Request
//!
//! The unit of work handed to every carrier and to the shipping service.

use crate::domain::entities::address::DeliveryAddress;
use crate::domain::entities::package::PackageDetails;
use crate::domain::value_objects::CarrierId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A request to quote or book a shipment.
///
/// Built once per operation and only read afterwards: carriers borrow it
/// and produce their own output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    pickup: DeliveryAddress,
    delivery: DeliveryAddress,
    package: PackageDetails,
    preferred_provider: Option<CarrierId>,
    insurance_required: Option<bool>,
}

impl ShipmentRequest {
    /// Creates a request with no provider preference and no explicit
    /// insurance flag.
    #[must_use]
    pub fn new(pickup: DeliveryAddress, delivery: DeliveryAddress, package: PackageDetails) -> Self {
        Self {
            pickup,
            delivery,
            package,
            preferred_provider: None,
            insurance_required: None,
        }
    }

    /// Sets the preferred provider used when booking without an explicit one.
    #[must_use]
    pub fn with_preferred_provider(mut self, provider: impl Into<CarrierId>) -> Self {
        self.preferred_provider = Some(provider.into());
        self
    }

    /// Sets the explicit insurance flag.
    #[must_use]
    pub fn with_insurance(mut self, required: bool) -> Self {
        self.insurance_required = Some(required);
        self
    }

    /// Returns the pickup address.
    #[inline]
    #[must_use]
    pub fn pickup(&self) -> &DeliveryAddress {
        &self.pickup
    }

    /// Returns the delivery address.
    #[inline]
    #[must_use]
    pub fn delivery(&self) -> &DeliveryAddress {
        &self.delivery
    }

    /// Returns the package details.
    #[inline]
    #[must_use]
    pub fn package(&self) -> &PackageDetails {
        &self.package
    }

    /// Returns the preferred provider.
    #[inline]
    #[must_use]
    pub fn preferred_provider(&self) -> Option<&CarrierId> {
        self.preferred_provider.as_ref()
    }

    /// Returns the explicit insurance flag, if the caller set one.
    #[inline]
    #[must_use]
    pub fn insurance_flag(&self) -> Option<bool> {
        self.insurance_required
    }

    /// Returns whether the shipment must be insured.
    ///
    /// The explicit flag wins; otherwise the package category policy decides.
    #[must_use]
    pub fn requires_insurance(&self) -> bool {
        self.insurance_required.unwrap_or_else(|| {
            self.package
                .category_defaults()
                .is_some_and(|d| d.insurance_required)
        })
    }
}

impl fmt::Display for ShipmentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ShipmentRequest({} -> {}, {})",
            self.pickup.state, self.delivery.state, self.package
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{PackageCategory, Price};

    fn address(state: &str) -> DeliveryAddress {
        DeliveryAddress::builder()
            .street("1 Road")
            .city("City")
            .state(state)
            .country("Nigeria")
            .phone("+234")
            .recipient_name("R")
            .build()
            .unwrap()
    }

    fn request(category: PackageCategory, value: u32) -> ShipmentRequest {
        let package = PackageDetails::new(1.0, 10.0, 10.0, 10.0, Price::from_units(value))
            .unwrap()
            .with_category(category);
        ShipmentRequest::new(address("Lagos"), address("Kano"), package)
    }

    #[test]
    fn insurance_follows_policy_when_unset() {
        assert!(request(PackageCategory::Art, 60_000).requires_insurance());
        assert!(!request(PackageCategory::Art, 40_000).requires_insurance());
        assert!(!request(PackageCategory::Other, 10_000_000).requires_insurance());
    }

    #[test]
    fn explicit_insurance_flag_wins() {
        let r = request(PackageCategory::Art, 60_000).with_insurance(false);
        assert!(!r.requires_insurance());
        assert_eq!(r.insurance_flag(), Some(false));
        assert!(request(PackageCategory::Other, 1).with_insurance(true).requires_insurance());
    }

    #[test]
    fn preferred_provider_is_stored() {
        let r = request(PackageCategory::Other, 1).with_preferred_provider("kwik");
        assert_eq!(r.preferred_provider().unwrap(), "kwik");
    }
}
