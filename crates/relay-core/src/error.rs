//! # Relay Error Types
//!
//! Typed error handling for boxpay-relay.
//! All relay operations return `Result<T, RelayError>`.

use thiserror::Error;

/// Core error type for all relay operations
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration errors (missing env vars, invalid values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Payment provider unreachable or answered with a non-2xx status
    #[error("{0}")]
    Upstream(String),

    /// Callback payload is not JSON or misses a required field
    #[error("Malformed callback: {0}")]
    MalformedCallback(String),

    /// `x-signature` header absent
    #[error("Signature header missing")]
    SignatureMissing,

    /// Computed digest differs from the header value
    #[error("Invalid signature")]
    SignatureMismatch,

    /// Persistence layer rejected the insert
    #[error("Storage error: {0}")]
    Storage(String),
}

impl RelayError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Configuration(_) => 500,
            RelayError::Upstream(_) => 500,
            RelayError::MalformedCallback(_) => 400,
            RelayError::SignatureMissing => 403,
            RelayError::SignatureMismatch => 403,
            RelayError::Storage(_) => 500,
        }
    }

    /// Short message returned to webhook callers
    pub fn public_message(&self) -> &'static str {
        match self {
            RelayError::MalformedCallback(_) => "Invalid payment data received",
            RelayError::SignatureMissing => "Signature header missing",
            RelayError::SignatureMismatch => "Invalid signature",
            RelayError::Storage(_) => "Failed to store payment data",
            RelayError::Configuration(_) | RelayError::Upstream(_) => "Internal server error",
        }
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
