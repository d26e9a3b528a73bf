//! Hospital and doctor directory, including operator seeding

use crate::error::Result;
use medibook_core::{
    BookingError, BookingStore, CreateDoctor, CreateHospital, Doctor, DoctorId, Hospital,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct DirectoryService {
    store: Arc<dyn BookingStore>,
}

impl DirectoryService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    pub async fn list_hospitals(&self) -> Result<Vec<Hospital>> {
        Ok(self.store.get_hospitals().await?)
    }

    /// Doctors attached to the named hospital
    pub async fn doctors_for_hospital(&self, hospital: &str) -> Result<Vec<Doctor>> {
        Ok(self.store.find_doctors_by_hospital(hospital.trim()).await?)
    }

    pub async fn add_hospital(&self, hospital: CreateHospital) -> Result<Hospital> {
        let hospital = self.store.create_hospital(hospital).await?;
        tracing::info!(hospital_id = %hospital.id, name = %hospital.name, "Hospital added");
        Ok(hospital)
    }

    /// Add a doctor to an existing hospital
    pub async fn add_doctor(&self, doctor: CreateDoctor) -> Result<Doctor> {
        doctor.validate()?;

        let hospital_known = self
            .store
            .get_hospitals()
            .await?
            .iter()
            .any(|h| h.name == doctor.hospital);
        if !hospital_known {
            return Err(BookingError::not_found("Hospital", doctor.hospital.as_str()).into());
        }

        let doctor = self.store.create_doctor(doctor).await?;
        tracing::info!(
            doctor_id = %doctor.id,
            hospital = %doctor.hospital,
            "Doctor added"
        );
        Ok(doctor)
    }

    pub async fn set_doctor_availability(&self, doctor_id: &DoctorId, available: bool) -> Result<()> {
        self.store.set_doctor_availability(doctor_id, available).await?;
        tracing::info!(doctor_id = %doctor_id, available, "Doctor availability changed");
        Ok(())
    }
}
