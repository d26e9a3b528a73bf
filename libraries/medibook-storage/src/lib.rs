//! MediBook Storage
//!
//! `SQLite` implementation of the MediBook persistence gateway.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each record type owns its own queries
//! - **Atomic Slots**: A slot reservation is a single conditional insert on
//!   the `booked_slots` primary key, so concurrent bookings admit one winner
//! - **Transactional Lifecycle**: Booking and cancellation update the ledger
//!   and the appointment inside one transaction
//!
//! # Example
//!
//! ```rust,no_run
//! use medibook_core::BookingStore;
//! use medibook_storage::SqliteBookingStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteBookingStore::connect("sqlite://medibook.db").await?;
//!
//! let hospitals = store.get_hospitals().await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod appointments;
pub mod doctors;
pub mod hospitals;
pub mod slots;
pub mod users;

pub use context::SqliteBookingStore;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://medibook.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("SQLite pool created");

    Ok(pool)
}

/// Current time in Unix epoch seconds
pub(crate) fn now_seconds() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Convert a stored epoch-seconds column back into a timestamp
pub(crate) fn timestamp_from_seconds(
    secs: i64,
) -> medibook_core::Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| medibook_core::BookingError::storage("Invalid timestamp"))
}

/// Map a unique-constraint violation to `Duplicate`, everything else to `Storage`
pub(crate) fn map_unique_violation(err: sqlx::Error, what: &str) -> medibook_core::BookingError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            medibook_core::BookingError::Duplicate(what.to_string())
        }
        _ => err.into(),
    }
}
