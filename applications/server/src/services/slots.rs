//! Slot ledger operations

use crate::error::Result;
use medibook_core::{BookingError, BookingStore, DoctorId, Slot, SlotLedger};
use std::sync::Arc;

#[derive(Clone)]
pub struct SlotLedgerService {
    store: Arc<dyn BookingStore>,
}

impl SlotLedgerService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// Mark a slot as taken
    ///
    /// Fails `NotFound`, `DoctorUnavailable` or `SlotUnavailable`; concurrent
    /// calls for the same slot admit one winner.
    pub async fn reserve(&self, doctor_id: &DoctorId, date: &str, time: &str) -> Result<()> {
        let slot = Slot::new(date, time)?;
        self.store.reserve_slot(doctor_id, &slot).await?;
        tracing::debug!(doctor_id = %doctor_id, slot = %slot, "Slot reserved");
        Ok(())
    }

    /// Free a slot; freeing an open slot is a no-op
    pub async fn release(&self, doctor_id: &DoctorId, date: &str, time: &str) -> Result<()> {
        let slot = Slot::new(date, time)?;
        self.store.release_slot(doctor_id, &slot).await?;
        tracing::debug!(doctor_id = %doctor_id, slot = %slot, "Slot released");
        Ok(())
    }

    /// Current ledger of a doctor
    pub async fn ledger(&self, doctor_id: &DoctorId) -> Result<SlotLedger> {
        let doctor = self
            .store
            .get_doctor(doctor_id)
            .await?
            .ok_or_else(|| BookingError::not_found("Doctor", doctor_id.as_str()))?;

        Ok(doctor.slots_booked)
    }
}
