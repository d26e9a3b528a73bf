//! MediBook Core
//!
//! Storage-agnostic domain types, traits, and error handling for MediBook.
//!
//! This crate provides the building blocks shared by the storage layer, the
//! payment gateway client and the server services.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Doctor`, `Appointment`, `Hospital`, and the
//!   per-doctor `SlotLedger`
//! - **Core Traits**: `BookingStore` (persistence gateway) and
//!   `PaymentProvider` (payment gateway)
//! - **Error Handling**: Unified `BookingError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use medibook_core::types::{Slot, SlotLedger};
//!
//! let mut ledger = SlotLedger::new();
//! let slot = Slot::new("2024-01-10", "10:00").unwrap();
//!
//! ledger.reserve(&slot).unwrap();
//! assert!(ledger.is_booked(&slot));
//! assert!(ledger.reserve(&slot).is_err());
//!
//! ledger.release(&slot);
//! assert!(!ledger.is_booked(&slot));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{BookingError, Result};
pub use storage::BookingStore;
pub use traits::PaymentProvider;

pub use types::{
    Address, Appointment, AppointmentId, CreateDoctor, CreateHospital, Doctor, DoctorId,
    DoctorSnapshot, Hospital, HospitalId, NewAppointment, NewUser, OrderRequest,
    PaymentConfirmation, ProfileUpdate, ProviderOrder, Slot, SlotLedger, User, UserId,
    UserSnapshot,
};
