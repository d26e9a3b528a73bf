/// Core error types for MediBook
use thiserror::Error;

/// Result type alias using `BookingError`
pub type Result<T> = std::result::Result<T, BookingError>;

/// Core error type for MediBook
#[derive(Error, Debug)]
pub enum BookingError {
    /// Referenced entity is absent
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Doctor is not accepting bookings
    #[error("Doctor not available")]
    DoctorUnavailable,

    /// Requested slot is already booked
    #[error("Slot not available")]
    SlotUnavailable,

    /// Caller is not the owner of the record
    #[error("Unauthorized action")]
    Unauthorized,

    /// Appointment was cancelled
    #[error("Appointment cancelled")]
    AlreadyCancelled,

    /// Payment signature did not match
    #[error("Invalid payment signature")]
    InvalidSignature,

    /// Email/password pair rejected
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Duplicate entry
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Persistence gateway failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Payment provider failure
    #[error("Payment provider error: {0}")]
    Provider(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl BookingError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a payment provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error is the caller's fault rather than an infrastructure failure
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            Self::Storage(_) | Self::Provider(_) | Self::Serialization(_)
        )
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for BookingError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
