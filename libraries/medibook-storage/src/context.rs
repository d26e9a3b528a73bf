use crate::{appointments, doctors, hospitals, slots, users, StorageError};
use async_trait::async_trait;
use medibook_core::{error::Result, storage::BookingStore, types::*};
use sqlx::SqlitePool;

/// Booking store backed by `SQLite`
#[derive(Clone)]
pub struct SqliteBookingStore {
    pool: SqlitePool,
}

impl SqliteBookingStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and apply migrations
    pub async fn connect(database_url: &str) -> std::result::Result<Self, StorageError> {
        let pool = crate::create_pool(database_url)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        crate::run_migrations(&pool).await?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl BookingStore for SqliteBookingStore {
    // Users
    async fn create_user(&self, user: NewUser, password_hash: &str) -> Result<User> {
        users::create(&self.pool, user, password_hash).await
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        users::get_by_id(&self.pool, id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        users::find_by_email(&self.pool, email).await
    }

    async fn get_password_hash(&self, id: &UserId) -> Result<Option<String>> {
        users::get_password_hash(&self.pool, id).await
    }

    async fn update_profile(&self, id: &UserId, update: ProfileUpdate) -> Result<()> {
        users::update_profile(&self.pool, id, update).await
    }

    async fn set_user_image(&self, id: &UserId, image: &str) -> Result<()> {
        users::set_image(&self.pool, id, image).await
    }

    // Hospitals
    async fn create_hospital(&self, hospital: CreateHospital) -> Result<Hospital> {
        hospitals::create(&self.pool, hospital).await
    }

    async fn get_hospitals(&self) -> Result<Vec<Hospital>> {
        hospitals::get_all(&self.pool).await
    }

    // Doctors
    async fn create_doctor(&self, doctor: CreateDoctor) -> Result<Doctor> {
        doctors::create(&self.pool, doctor).await
    }

    async fn get_doctor(&self, id: &DoctorId) -> Result<Option<Doctor>> {
        doctors::get_by_id(&self.pool, id).await
    }

    async fn find_doctors_by_hospital(&self, hospital: &str) -> Result<Vec<Doctor>> {
        doctors::get_by_hospital(&self.pool, hospital).await
    }

    async fn set_doctor_availability(&self, id: &DoctorId, available: bool) -> Result<()> {
        doctors::set_availability(&self.pool, id, available).await
    }

    // Slot ledger
    async fn reserve_slot(&self, doctor_id: &DoctorId, slot: &Slot) -> Result<()> {
        slots::reserve(&self.pool, doctor_id, slot).await
    }

    async fn release_slot(&self, doctor_id: &DoctorId, slot: &Slot) -> Result<()> {
        slots::release(&self.pool, doctor_id, slot).await.map(|_| ())
    }

    // Appointments
    async fn book_appointment(&self, appointment: NewAppointment) -> Result<Appointment> {
        appointments::book(&self.pool, appointment).await
    }

    async fn get_appointment(&self, id: &AppointmentId) -> Result<Option<Appointment>> {
        appointments::get_by_id(&self.pool, id).await
    }

    async fn find_appointments_by_user(&self, user_id: &UserId) -> Result<Vec<Appointment>> {
        appointments::get_by_user(&self.pool, user_id).await
    }

    async fn cancel_appointment(&self, id: &AppointmentId) -> Result<Appointment> {
        appointments::cancel(&self.pool, id).await
    }

    async fn mark_paid(&self, id: &AppointmentId) -> Result<()> {
        appointments::mark_paid(&self.pool, id).await
    }
}
