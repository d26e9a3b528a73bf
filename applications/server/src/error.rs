/// Server error types
use medibook_core::BookingError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl ServerError {
    /// Whether the caller can fix this (bad input, missing record, bad token)
    pub fn is_client_error(&self) -> bool {
        match self {
            ServerError::Booking(e) => e.is_client_error(),
            ServerError::Auth(_) | ServerError::Jwt(_) => true,
            ServerError::Config(_) | ServerError::Io(_) | ServerError::Bcrypt(_) => false,
        }
    }

    /// The domain error, if this is one
    pub fn as_booking(&self) -> Option<&BookingError> {
        match self {
            ServerError::Booking(e) => Some(e),
            _ => None,
        }
    }
}

impl From<medibook_storage::StorageError> for ServerError {
    fn from(err: medibook_storage::StorageError) -> Self {
        // Convert StorageError -> BookingError -> ServerError
        ServerError::Booking(err.into())
    }
}

impl From<medibook_payments::PaymentError> for ServerError {
    fn from(err: medibook_payments::PaymentError) -> Self {
        ServerError::Booking(err.into())
    }
}
