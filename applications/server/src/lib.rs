//! MediBook Server Library
//!
//! Appointment booking services: accounts, profiles, the hospital/doctor
//! directory, slot ledger, appointment lifecycle and payments.
//!
//! This library exposes the core components for the CLI and for testing.

pub mod config;
pub mod error;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{
    AccountService, AppointmentService, AuthService, DirectoryService, ImageStorage,
    ImageUpload, PaymentService, ProfileService, SlotLedgerService,
};
pub use state::AppState;
