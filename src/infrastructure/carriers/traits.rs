//! # Carrier Adapter Trait
//!
//! Port definition for carrier integrations.
//!
//! Every carrier, whether it calls a remote API or prices locally,
//! implements [`CarrierAdapter`] so the shipping service can treat them
//! uniformly. New carriers are added by implementing the trait; existing
//! ones are never touched.
//!
//! # Examples
//!
//! ```ignore
//! use shipquote::infrastructure::carriers::traits::CarrierAdapter;
//!
//! struct MyCarrier { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl CarrierAdapter for MyCarrier {
//!     // ... implement required methods
//! }
//! ```

use crate::domain::entities::{ShipmentConfirmation, ShipmentRequest, ShippingQuote, TrackingInfo};
use crate::domain::value_objects::CarrierId;
use crate::infrastructure::carriers::error::CarrierResult;
use async_trait::async_trait;
use std::fmt;

/// Trait defining the interface for carrier adapters.
///
/// # Error Handling
///
/// The four operations fail differently on purpose:
///
/// - `get_quote` never fails. Carrier-side problems are logged and yield an
///   empty list so one broken carrier cannot abort aggregation.
/// - `create_shipment` fails loudly; the shipping service fails over around it.
/// - `track_shipment` fails on transport errors, but unknown carrier statuses
///   map to `pending` instead of failing.
/// - `cancel_shipment` reports success as a boolean.
#[async_trait]
pub trait CarrierAdapter: Send + Sync + fmt::Debug {
    /// Returns the carrier id.
    fn carrier_id(&self) -> &CarrierId;

    /// Returns one quote per service tier the carrier offers for this request.
    async fn get_quote(&self, request: &ShipmentRequest) -> Vec<ShippingQuote>;

    /// Books the shipment.
    ///
    /// # Errors
    ///
    /// - `CarrierError::ShipmentRejected` - Carrier declined the booking
    /// - `CarrierError::Timeout` / `Connection` - Carrier unreachable
    /// - `CarrierError::Authentication` - Credential rejected
    async fn create_shipment(&self, request: &ShipmentRequest)
    -> CarrierResult<ShipmentConfirmation>;

    /// Fetches the current tracking state.
    ///
    /// # Errors
    ///
    /// - `CarrierError::NotFound` - Tracking number unknown to the carrier
    /// - `CarrierError::Timeout` / `Connection` - Carrier unreachable
    async fn track_shipment(&self, tracking_number: &str) -> CarrierResult<TrackingInfo>;

    /// Cancels the shipment; returns true on success.
    async fn cancel_shipment(&self, tracking_number: &str) -> bool;
}
