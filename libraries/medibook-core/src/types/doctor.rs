/// Doctor domain types
use crate::error::{BookingError, Result};
use crate::types::{Address, DoctorId, SlotLedger, MAX_FEES};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A doctor that patients can book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    /// Unique doctor identifier
    pub id: DoctorId,

    pub name: String,

    pub email: String,

    /// Profile image reference
    pub image: Option<String>,

    pub speciality: String,

    pub degree: String,

    /// Free-form experience, e.g. "4 Years"
    pub experience: String,

    pub about: String,

    /// Consultation fee in whole currency units
    pub fees: i64,

    /// Name of the hospital the doctor practices at
    pub hospital: String,

    /// Whether the doctor currently accepts bookings
    pub available: bool,

    pub address: Address,

    pub created_at: DateTime<Utc>,

    /// Currently booked slots
    pub slots_booked: SlotLedger,
}

impl Doctor {
    /// Copy of the doctor's details without the slot ledger
    pub fn snapshot(&self) -> DoctorSnapshot {
        DoctorSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            image: self.image.clone(),
            speciality: self.speciality.clone(),
            degree: self.degree.clone(),
            experience: self.experience.clone(),
            about: self.about.clone(),
            fees: self.fees,
            hospital: self.hospital.clone(),
            address: self.address.clone(),
        }
    }
}

/// Data needed to add a doctor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctor {
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub speciality: String,
    pub degree: String,
    pub experience: String,
    pub about: String,
    pub fees: i64,
    pub hospital: String,
    #[serde(default)]
    pub address: Address,
}

impl CreateDoctor {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BookingError::invalid_input("Doctor name cannot be empty"));
        }
        if self.hospital.trim().is_empty() {
            return Err(BookingError::invalid_input("Doctor hospital cannot be empty"));
        }
        if self.fees < 0 {
            return Err(BookingError::invalid_input("Doctor fees cannot be negative"));
        }
        if self.fees > MAX_FEES {
            return Err(BookingError::invalid_input("Doctor fees are too large"));
        }
        Ok(())
    }
}

/// Copy of a doctor's details embedded in an appointment at booking time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorSnapshot {
    pub id: DoctorId,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub speciality: String,
    pub degree: String,
    pub experience: String,
    pub about: String,
    pub fees: i64,
    pub hospital: String,
    pub address: Address,
}
