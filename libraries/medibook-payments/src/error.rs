//! Error types for the payment gateway.

use medibook_core::BookingError;
use thiserror::Error;

/// Errors that can occur when talking to the payment provider.
#[derive(Error, Debug)]
pub enum PaymentError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider returned an error response
    #[error("Provider error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Provider is offline or unreachable
    #[error("Provider unreachable: {0}")]
    Unreachable(String),

    /// Failed to parse provider response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Missing or malformed credentials or endpoint
    #[error("Invalid payment configuration: {0}")]
    InvalidConfig(String),

    /// Checkout signature does not match
    #[error("Invalid payment signature")]
    InvalidSignature,
}

/// Result type for payment operations.
pub type Result<T> = std::result::Result<T, PaymentError>;

impl From<PaymentError> for BookingError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::InvalidSignature => BookingError::InvalidSignature,
            other => BookingError::provider(other.to_string()),
        }
    }
}
