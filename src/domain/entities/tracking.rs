//! # Tracking
//!
//! Normalized tracking state and carrier event history.

use crate::domain::value_objects::TrackingStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of a carrier's tracking history.
///
/// `status` keeps the carrier's raw wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
    /// Raw carrier status string.
    pub status: String,
    /// Where the event happened.
    pub location: Option<String>,
    /// Human-readable description.
    pub description: String,
}

impl TrackingEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(
        timestamp: DateTime<Utc>,
        status: impl Into<String>,
        location: Option<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            status: status.into(),
            location,
            description: description.into(),
        }
    }
}

/// Current tracking state of a shipment.
///
/// The history is owned by the carrier; this crate only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingInfo {
    /// Tracking number this state belongs to.
    pub tracking_number: String,
    /// Canonical status.
    pub status: TrackingStatus,
    /// Last known location.
    pub current_location: Option<String>,
    /// Carrier's delivery estimate.
    pub estimated_delivery: Option<DateTime<Utc>>,
    /// Events in the order the carrier reported them.
    pub history: Vec<TrackingEvent>,
}

impl TrackingInfo {
    /// Creates tracking info with an empty history.
    #[must_use]
    pub fn new(tracking_number: impl Into<String>, status: TrackingStatus) -> Self {
        Self {
            tracking_number: tracking_number.into(),
            status,
            current_location: None,
            estimated_delivery: None,
            history: Vec::new(),
        }
    }

    /// Returns the most recent event, if any.
    #[must_use]
    pub fn latest_event(&self) -> Option<&TrackingEvent> {
        self.history.iter().max_by_key(|e| e.timestamp)
    }

    /// Returns true if the shipment reached a terminal state.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status.is_terminal()
    }
}

impl fmt::Display for TrackingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracking({}: {})", self.tracking_number, self.status)?;
        if let Some(location) = &self.current_location {
            write!(f, " at {location}")?;
        }
        Ok(())
    }
}
