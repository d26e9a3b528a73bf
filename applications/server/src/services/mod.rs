/// Server services
pub mod accounts;
pub mod appointments;
pub mod auth;
pub mod directory;
pub mod image_storage;
pub mod payments;
pub mod profile;
pub mod slots;

pub use accounts::AccountService;
pub use appointments::AppointmentService;
pub use auth::AuthService;
pub use directory::DirectoryService;
pub use image_storage::{ImageStorage, ImageUpload};
pub use payments::PaymentService;
pub use profile::ProfileService;
pub use slots::SlotLedgerService;
