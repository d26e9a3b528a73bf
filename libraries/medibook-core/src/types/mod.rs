mod appointment;
mod doctor;
mod hospital;
mod ids;
mod payment;
mod slot;
mod user;

pub use appointment::{Appointment, NewAppointment, MAX_FEES, MINOR_UNITS_PER_MAJOR};
pub use doctor::{CreateDoctor, Doctor, DoctorSnapshot};
pub use hospital::{CreateHospital, Hospital};
pub use ids::{AppointmentId, DoctorId, HospitalId, UserId};
pub use payment::{OrderRequest, PaymentConfirmation, ProviderOrder};
pub use slot::{Slot, SlotLedger};
pub use user::{Address, NewUser, ProfileUpdate, User, UserSnapshot, DEFAULT_PHONE, NOT_SELECTED};
