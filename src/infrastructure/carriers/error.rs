//! # Carrier Errors
//!
//! Error types for carrier adapter operations.
//!
//! Quote collection never surfaces these to callers (adapters swallow them
//! and return no quotes); booking and tracking do.
//!
//! # Examples
//!
//! ```
//! use shipquote::infrastructure::carriers::error::CarrierError;
//!
//! let error = CarrierError::timeout("no response after 15000ms");
//! assert!(error.is_retryable());
//!
//! let error = CarrierError::authentication("invalid API key");
//! assert!(!error.is_retryable());
//! ```

use thiserror::Error;

/// Error type for carrier adapter operations.
#[derive(Debug, Clone, Error)]
pub enum CarrierError {
    /// Request timed out.
    #[error("carrier timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error, including carrier 5xx responses.
    #[error("carrier connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Credentials rejected.
    #[error("carrier authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("carrier rate limit exceeded: {message}")]
    RateLimited {
        /// Error message.
        message: String,
        /// Retry after duration in milliseconds.
        retry_after_ms: Option<u64>,
    },

    /// Request rejected as malformed.
    #[error("carrier invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Carrier declined to book the shipment.
    #[error("carrier rejected shipment: {message}")]
    ShipmentRejected {
        /// Error message.
        message: String,
        /// Carrier-specific error code.
        error_code: Option<String>,
    },

    /// Tracking number or resource unknown to the carrier.
    #[error("carrier resource not found: {message}")]
    NotFound {
        /// Error message.
        message: String,
    },

    /// Response could not be understood.
    #[error("carrier protocol error: {message}")]
    ProtocolError {
        /// Error message.
        message: String,
    },

    /// Failure inside the adapter itself.
    #[error("carrier internal error: {message}")]
    InternalError {
        /// Error message.
        message: String,
    },
}

impl CarrierError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after_ms: None,
        }
    }

    /// Creates a rate limited error with retry duration.
    #[must_use]
    pub fn rate_limited_with_retry(message: impl Into<String>, retry_after_ms: u64) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after_ms: Some(retry_after_ms),
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a shipment rejected error.
    #[must_use]
    pub fn shipment_rejected(message: impl Into<String>) -> Self {
        Self::ShipmentRejected {
            message: message.into(),
            error_code: None,
        }
    }

    /// Creates a shipment rejected error with the carrier's error code.
    #[must_use]
    pub fn shipment_rejected_with_code(
        message: impl Into<String>,
        error_code: impl Into<String>,
    ) -> Self {
        Self::ShipmentRejected {
            message: message.into(),
            error_code: Some(error_code.into()),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol_error(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Returns true if this error is transient and may succeed on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Connection { .. } | Self::RateLimited { .. }
        )
    }

    /// Returns the retry delay in milliseconds, if applicable.
    #[must_use]
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_ms, .. } => *retry_after_ms,
            _ => None,
        }
    }

    /// Returns the carrier error code, if any.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::ShipmentRejected { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }
}

/// Result type for carrier operations.
pub type CarrierResult<T> = Result<T, CarrierError>;
