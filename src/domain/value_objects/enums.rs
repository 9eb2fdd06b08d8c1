//! # Domain Enums
//!
//! Enumeration types for shipping concepts.
//!
//! - [`PackageCategory`] - Item category driving packaging policy
//! - [`TrackingStatus`] - Canonical shipment lifecycle state
//!
//! Both enums implement `Display`, `FromStr`, and Serde traits using the
//! same lowercase snake_case vocabulary.

use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of the item being shipped.
///
/// Art, book, and fashion items carry category packaging defaults; see
/// [`category_policy`](crate::domain::services::category_policy).
///
/// # Examples
///
/// ```
/// use shipquote::domain::value_objects::PackageCategory;
///
/// let art: PackageCategory = "ART".parse().unwrap();
/// assert_eq!(art, PackageCategory::Art);
/// assert_eq!(art.to_string(), "art");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageCategory {
    /// Artwork: paintings, sculptures, prints.
    Art,
    /// Books and printed matter.
    Book,
    /// Clothing and accessories.
    Fashion,
    /// Anything without a dedicated policy.
    #[default]
    Other,
}

impl PackageCategory {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Art => "art",
            Self::Book => "book",
            Self::Fashion => "fashion",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PackageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "art" => Ok(Self::Art),
            "book" | "books" => Ok(Self::Book),
            "fashion" => Ok(Self::Fashion),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::ParseEnum {
                kind: "PackageCategory",
                value: s.to_string(),
            }),
        }
    }
}

/// Canonical tracking state.
///
/// Every carrier's native status vocabulary is mapped onto these five
/// states. Carriers that report something unrecognized map to
/// [`TrackingStatus::Pending`].
///
/// # Examples
///
/// ```
/// use shipquote::domain::value_objects::TrackingStatus;
///
/// let status: TrackingStatus = "in_transit".parse().unwrap();
/// assert_eq!(status, TrackingStatus::InTransit);
/// assert!(!status.is_terminal());
/// assert!(TrackingStatus::Delivered.is_terminal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStatus {
    /// Booked but not yet collected.
    #[default]
    Pending,
    /// Collected from the pickup address.
    PickedUp,
    /// Moving through the carrier network.
    InTransit,
    /// Handed to the recipient.
    Delivered,
    /// Delivery failed or was cancelled.
    Failed,
}

impl TrackingStatus {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PickedUp => "picked_up",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
        }
    }

    /// Returns true if no further transitions are expected.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Failed)
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(Self::Pending),
            "picked_up" => Ok(Self::PickedUp),
            "in_transit" => Ok(Self::InTransit),
            "delivered" => Ok(Self::Delivered),
            "failed" => Ok(Self::Failed),
            _ => Err(DomainError::ParseEnum {
                kind: "TrackingStatus",
                value: s.to_string(),
            }),
        }
    }
}
