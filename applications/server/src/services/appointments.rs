//! Appointment lifecycle: book, cancel, list

use crate::error::Result;
use medibook_core::{
    Appointment, AppointmentId, BookingError, BookingStore, DoctorId, NewAppointment, Slot,
    UserId,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppointmentService {
    store: Arc<dyn BookingStore>,
}

impl AppointmentService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// Book `doctor_id` at `date`/`time` for `user_id`
    ///
    /// The reservation and the appointment are written together; a
    /// concurrent booking of the same slot loses with `SlotUnavailable`.
    pub async fn book(
        &self,
        user_id: &UserId,
        doctor_id: &DoctorId,
        date: &str,
        time: &str,
    ) -> Result<Appointment> {
        let slot = Slot::new(date, time)?;

        let doctor = self
            .store
            .get_doctor(doctor_id)
            .await?
            .ok_or_else(|| BookingError::not_found("Doctor", doctor_id.as_str()))?;

        if !doctor.available {
            return Err(BookingError::DoctorUnavailable.into());
        }
        if doctor.slots_booked.is_booked(&slot) {
            return Err(BookingError::SlotUnavailable.into());
        }

        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| BookingError::not_found("User", user_id.as_str()))?;

        let appointment = self
            .store
            .book_appointment(NewAppointment::snapshot(&user, &doctor, slot))
            .await?;

        tracing::info!(
            appointment_id = %appointment.id,
            user_id = %user_id,
            doctor_id = %doctor_id,
            slot = %appointment.slot(),
            amount = appointment.amount,
            "Appointment booked"
        );

        Ok(appointment)
    }

    /// Cancel one of the caller's appointments and free its slot
    ///
    /// Cancelling twice succeeds and leaves the ledger alone.
    pub async fn cancel(&self, user_id: &UserId, appointment_id: &AppointmentId) -> Result<Appointment> {
        let appointment = self
            .store
            .get_appointment(appointment_id)
            .await?
            .ok_or_else(|| BookingError::not_found("Appointment", appointment_id.as_str()))?;

        if !appointment.is_owned_by(user_id) {
            tracing::warn!(
                appointment_id = %appointment_id,
                user_id = %user_id,
                "Cancel attempted by non-owner"
            );
            return Err(BookingError::Unauthorized.into());
        }

        if appointment.cancelled {
            return Ok(appointment);
        }

        let appointment = self.store.cancel_appointment(appointment_id).await?;

        tracing::info!(
            appointment_id = %appointment_id,
            doctor_id = %appointment.doctor_id,
            slot = %appointment.slot(),
            "Appointment cancelled"
        );

        Ok(appointment)
    }

    /// All of the user's appointments in booking order, cancelled included
    pub async fn list(&self, user_id: &UserId) -> Result<Vec<Appointment>> {
        Ok(self.store.find_appointments_by_user(user_id).await?)
    }
}
