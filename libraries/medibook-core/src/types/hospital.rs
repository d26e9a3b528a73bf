/// Hospital domain types
use crate::types::HospitalId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A hospital doctors are attached to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: HospitalId,

    /// Unique hospital name, referenced by `Doctor::hospital`
    pub name: String,

    pub address: String,

    pub created_at: DateTime<Utc>,
}

/// Data needed to add a hospital
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHospital {
    pub name: String,
    #[serde(default)]
    pub address: String,
}
