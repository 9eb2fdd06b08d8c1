//! # Application Errors
//!
//! Error types surfaced by the shipping service.
//!
//! # Error Hierarchy
//!
//! ```text
//! ShippingError
//! ├── ProviderNotFound(String)     - Tracking/cancelling on an unknown carrier
//! ├── ShipmentFailed { .. }        - Booking failed after failover
//! ├── NoCarriers                   - Registry is empty
//! ├── Carrier(CarrierError)        - Carrier call failed (tracking, setup)
//! └── Domain(DomainError)          - Invalid domain value
//! ```
//!
//! # Examples
//!
//! ```
//! use shipquote::application::error::ShippingError;
//!
//! let err = ShippingError::provider_not_found("dhl");
//! assert_eq!(err.to_string(), "provider not found: dhl");
//! ```

use crate::domain::errors::DomainError;
use crate::domain::value_objects::CarrierId;
use crate::infrastructure::carriers::error::CarrierError;
use thiserror::Error;

/// Error type for shipping service operations.
#[derive(Debug, Error)]
pub enum ShippingError {
    /// No configured carrier has the given name.
    #[error("provider not found: {0}")]
    ProviderNotFound(String),

    /// Shipment creation failed on the selected carrier and on the failover
    /// carrier, if one was available.
    #[error("shipment creation failed via {carrier}: {source}")]
    ShipmentFailed {
        /// The last carrier tried.
        carrier: CarrierId,
        /// Why it failed.
        #[source]
        source: CarrierError,
    },

    /// The registry holds no carriers.
    #[error("no carriers configured")]
    NoCarriers,

    /// Carrier call failed.
    #[error("carrier error: {0}")]
    Carrier(#[from] CarrierError),

    /// Domain validation failed.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
}

impl ShippingError {
    /// Creates a provider not found error.
    #[must_use]
    pub fn provider_not_found(name: impl Into<String>) -> Self {
        Self::ProviderNotFound(name.into())
    }

    /// Returns true if the caller named a carrier that isn't configured.
    #[must_use]
    pub fn is_provider_not_found(&self) -> bool {
        matches!(self, Self::ProviderNotFound(_))
    }

    /// Returns true if the underlying carrier failure is transient, so the
    /// same call may succeed later.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ShipmentFailed { source, .. } | Self::Carrier(source) => source.is_retryable(),
            Self::ProviderNotFound(_) | Self::NoCarriers | Self::Domain(_) => false,
        }
    }
}

/// Result type for shipping service operations.
pub type ShippingResult<T> = Result<T, ShippingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn shipment_failed_exposes_source() {
        let err = ShippingError::ShipmentFailed {
            carrier: CarrierId::new("kwik"),
            source: CarrierError::timeout("slow"),
        };
        assert!(err.to_string().contains("kwik"));
        assert!(err.source().is_some());
        assert!(err.is_retryable());
    }

    #[test]
    fn retryability_follows_carrier_error() {
        let err = ShippingError::ShipmentFailed {
            carrier: CarrierId::new("sendbox"),
            source: CarrierError::shipment_rejected("wallet empty"),
        };
        assert!(!err.is_retryable());
        let err: ShippingError = CarrierError::rate_limited_with_retry("slow down", 1000).into();
        assert!(err.is_retryable());
        assert!(!ShippingError::provider_not_found("dhl").is_retryable());
    }

    #[test]
    fn converts_from_carrier_error() {
        let err: ShippingError = CarrierError::not_found("X").into();
        assert!(matches!(err, ShippingError::Carrier(_)));
        assert!(!err.is_provider_not_found());
    }
}
