//! # Shipments
//!
//! What a carrier hands back after booking, and the record the shipping
//! service returns to callers.

use crate::domain::value_objects::CarrierId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A carrier's booking confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentConfirmation {
    /// Carrier-assigned or synthesized tracking number.
    pub tracking_number: String,
    /// Printable label, when the carrier issues one.
    pub label_url: Option<String>,
}

impl ShipmentConfirmation {
    /// Creates a confirmation without a label.
    #[must_use]
    pub fn new(tracking_number: impl Into<String>) -> Self {
        Self {
            tracking_number: tracking_number.into(),
            label_url: None,
        }
    }

    /// Sets the label URL.
    #[must_use]
    pub fn with_label_url(mut self, url: impl Into<String>) -> Self {
        self.label_url = Some(url.into());
        self
    }
}

/// A booked shipment: the confirmation plus the carrier that fulfilled it.
///
/// This is the one artifact callers are expected to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    /// Tracking number to poll with.
    pub tracking_number: String,
    /// Carrier that accepted the booking.
    pub carrier: CarrierId,
    /// Printable label, when the carrier issues one.
    pub label_url: Option<String>,
}

impl ShipmentRecord {
    /// Combines a confirmation with the carrier that produced it.
    #[must_use]
    pub fn from_confirmation(carrier: CarrierId, confirmation: ShipmentConfirmation) -> Self {
        Self {
            tracking_number: confirmation.tracking_number,
            carrier,
            label_url: confirmation.label_url,
        }
    }
}

impl fmt::Display for ShipmentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shipment({} via {})", self.tracking_number, self.carrier)
    }
}
