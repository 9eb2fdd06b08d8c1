//! # Identifiers
//!
//! String-based identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a carrier (shipping provider).
///
/// Carrier ids are the names callers use to select a provider when booking,
/// tracking, or cancelling.
///
/// # Examples
///
/// ```
/// use shipquote::domain::value_objects::CarrierId;
///
/// let id = CarrierId::new("kwik");
/// assert_eq!(id.as_str(), "kwik");
/// assert_eq!(id, "kwik");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarrierId(String);

impl CarrierId {
    /// Creates a new carrier id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CarrierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CarrierId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CarrierId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for CarrierId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CarrierId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
