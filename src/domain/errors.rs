//! # Domain Errors
//!
//! Validation failures raised while constructing domain values.

use thiserror::Error;

/// Error type for domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Package weight or dimensions are invalid.
    #[error("invalid package: {0}")]
    InvalidPackage(String),

    /// Monetary amount is invalid.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// Address is missing required fields.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// A string could not be parsed into a domain enum.
    #[error("invalid {kind} value: {value}")]
    ParseEnum {
        /// Name of the enum being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}

impl DomainError {
    /// Creates an invalid package error.
    #[must_use]
    pub fn invalid_package(message: impl Into<String>) -> Self {
        Self::InvalidPackage(message.into())
    }

    /// Creates an invalid price error.
    #[must_use]
    pub fn invalid_price(message: impl Into<String>) -> Self {
        Self::InvalidPrice(message.into())
    }

    /// Creates an invalid address error.
    #[must_use]
    pub fn invalid_address(message: impl Into<String>) -> Self {
        Self::InvalidAddress(message.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
