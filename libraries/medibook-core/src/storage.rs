//! Persistence gateway trait

use crate::error::Result;
use crate::types::{
    Appointment, AppointmentId, CreateDoctor, CreateHospital, Doctor, DoctorId, Hospital,
    NewAppointment, NewUser, ProfileUpdate, Slot, User, UserId,
};
use async_trait::async_trait;

/// Key-by-id persistence for users, doctors, appointments and hospitals
///
/// Lookups return `Ok(None)` for missing records; mutations of a missing
/// record fail with `BookingError::NotFound`. Every method is strongly
/// consistent per record.
#[async_trait]
pub trait BookingStore: Send + Sync {
    // ========================================================================
    // Users
    // ========================================================================

    /// Insert a user together with its password hash
    ///
    /// Fails with `Duplicate` if the email is already registered.
    async fn create_user(&self, user: NewUser, password_hash: &str) -> Result<User>;

    /// Get user by ID
    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Find a user by login email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Get the stored password hash for a user
    async fn get_password_hash(&self, id: &UserId) -> Result<Option<String>>;

    /// Overwrite the editable profile fields
    async fn update_profile(&self, id: &UserId, update: ProfileUpdate) -> Result<()>;

    /// Set the profile image reference
    async fn set_user_image(&self, id: &UserId, image: &str) -> Result<()>;

    // ========================================================================
    // Hospitals
    // ========================================================================

    async fn create_hospital(&self, hospital: CreateHospital) -> Result<Hospital>;

    async fn get_hospitals(&self) -> Result<Vec<Hospital>>;

    // ========================================================================
    // Doctors
    // ========================================================================

    async fn create_doctor(&self, doctor: CreateDoctor) -> Result<Doctor>;

    /// Get doctor by ID, including the current slot ledger
    async fn get_doctor(&self, id: &DoctorId) -> Result<Option<Doctor>>;

    /// Doctors attached to the named hospital
    async fn find_doctors_by_hospital(&self, hospital: &str) -> Result<Vec<Doctor>>;

    async fn set_doctor_availability(&self, id: &DoctorId, available: bool) -> Result<()>;

    // ========================================================================
    // Slot ledger
    // ========================================================================

    /// Atomically book `slot` for the doctor
    ///
    /// Fails with `NotFound` for an unknown doctor, `DoctorUnavailable` when
    /// the doctor is not accepting bookings and `SlotUnavailable` when the
    /// slot is taken. Concurrent calls for the same slot admit one winner.
    async fn reserve_slot(&self, doctor_id: &DoctorId, slot: &Slot) -> Result<()>;

    /// Free `slot`; releasing a slot that is not booked is a no-op
    async fn release_slot(&self, doctor_id: &DoctorId, slot: &Slot) -> Result<()>;

    // ========================================================================
    // Appointments
    // ========================================================================

    /// Reserve the appointment's slot and insert the appointment as one unit
    async fn book_appointment(&self, appointment: NewAppointment) -> Result<Appointment>;

    async fn get_appointment(&self, id: &AppointmentId) -> Result<Option<Appointment>>;

    /// All appointments of a user, including cancelled ones, in insertion order
    async fn find_appointments_by_user(&self, user_id: &UserId) -> Result<Vec<Appointment>>;

    /// Mark the appointment cancelled and release its slot as one unit
    ///
    /// Returns the updated appointment. An appointment that is already
    /// cancelled is returned unchanged and the ledger is not touched.
    async fn cancel_appointment(&self, id: &AppointmentId) -> Result<Appointment>;

    /// Set the payment flag; a cancelled appointment fails `AlreadyCancelled`
    async fn mark_paid(&self, id: &AppointmentId) -> Result<()>;
}
