/// Appointment domain types
use crate::error::{BookingError, Result};
use crate::types::{AppointmentId, Doctor, DoctorId, DoctorSnapshot, Slot, User, UserId, UserSnapshot};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Provider amounts are expressed in the currency's minor unit (paise, cents)
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Largest fee whose minor-unit amount still fits in an `i64`
pub const MAX_FEES: i64 = i64::MAX / MINOR_UNITS_PER_MAJOR;

/// A booked appointment
///
/// `cancelled` and `payment` only ever move from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,

    pub user_id: UserId,

    pub doctor_id: DoctorId,

    /// User details as they were at booking time
    pub user: UserSnapshot,

    /// Doctor details as they were at booking time
    pub doctor: DoctorSnapshot,

    pub slot_date: String,

    pub slot_time: String,

    /// Fee charged, in whole currency units
    pub amount: i64,

    /// Booking time in Unix epoch milliseconds
    pub created_at: i64,

    pub cancelled: bool,

    pub payment: bool,
}

impl Appointment {
    pub fn slot(&self) -> Slot {
        Slot {
            date: self.slot_date.clone(),
            time: self.slot_time.clone(),
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Amount to charge through the payment provider
    pub fn amount_minor_units(&self) -> Result<i64> {
        self.amount
            .checked_mul(MINOR_UNITS_PER_MAJOR)
            .ok_or_else(|| BookingError::invalid_input("Appointment amount is too large to charge"))
    }
}

/// An appointment about to be persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub id: AppointmentId,
    pub user: UserSnapshot,
    pub doctor: DoctorSnapshot,
    pub slot: Slot,
    pub amount: i64,
    pub created_at: i64,
}

impl NewAppointment {
    /// Snapshot the user and doctor for a booking at `slot`
    pub fn snapshot(user: &User, doctor: &Doctor, slot: Slot) -> Self {
        Self {
            id: AppointmentId::generate(),
            user: UserSnapshot::from(user),
            doctor: doctor.snapshot(),
            slot,
            amount: doctor.fees,
            created_at: Utc::now().timestamp_millis(),
        }
    }

    pub fn into_appointment(self) -> Appointment {
        Appointment {
            id: self.id,
            user_id: self.user.id.clone(),
            doctor_id: self.doctor.id.clone(),
            user: self.user,
            doctor: self.doctor,
            slot_date: self.slot.date,
            slot_time: self.slot.time,
            amount: self.amount,
            created_at: self.created_at,
            cancelled: false,
            payment: false,
        }
    }
}
