/// User domain types
use crate::error::{BookingError, Result};
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder used for profile fields the user has not filled in yet
pub const NOT_SELECTED: &str = "Not Selected";

/// Placeholder phone number for new accounts
pub const DEFAULT_PHONE: &str = "000000000";

/// Two-line postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub line1: String,

    #[serde(default)]
    pub line2: String,
}

impl Address {
    pub fn new(line1: impl Into<String>, line2: impl Into<String>) -> Self {
        Self {
            line1: line1.into(),
            line2: line2.into(),
        }
    }
}

/// User account (credentials are stored separately and never carried here)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Login email, unique across users
    pub email: String,

    /// Profile image reference
    pub image: Option<String>,

    pub phone: String,

    pub address: Address,

    pub gender: String,

    /// Date of birth as entered by the user
    pub dob: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Data needed to register a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    /// Build the stored user with placeholder profile fields
    pub fn into_user(self) -> User {
        User {
            id: UserId::generate(),
            name: self.name,
            email: self.email,
            image: None,
            phone: DEFAULT_PHONE.to_string(),
            address: Address::default(),
            gender: NOT_SELECTED.to_string(),
            dob: NOT_SELECTED.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Editable profile fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub address: Address,
    pub dob: String,
    pub gender: String,
}

impl ProfileUpdate {
    /// Name, phone, date of birth and gender are mandatory
    pub fn validate(&self) -> Result<()> {
        let required = [&self.name, &self.phone, &self.dob, &self.gender];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(BookingError::invalid_input("Data missing"));
        }
        Ok(())
    }
}

/// Copy of a user's details embedded in an appointment at booking time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub phone: String,
    pub address: Address,
    pub gender: String,
    pub dob: String,
}

impl From<&User> for UserSnapshot {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            image: user.image.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            gender: user.gender.clone(),
            dob: user.dob.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update() -> ProfileUpdate {
        ProfileUpdate {
            name: "Asha".to_string(),
            phone: "9876543210".to_string(),
            address: Address::new("12 MG Road", "Pune"),
            dob: "1990-04-02".to_string(),
            gender: "Female".to_string(),
        }
    }

    #[test]
    fn new_user_gets_placeholder_profile() {
        let user = NewUser {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
        }
        .into_user();

        assert_eq!(user.phone, DEFAULT_PHONE);
        assert_eq!(user.gender, NOT_SELECTED);
        assert_eq!(user.dob, NOT_SELECTED);
        assert!(user.image.is_none());
    }

    #[test]
    fn profile_update_requires_core_fields() {
        assert!(update().validate().is_ok());

        let mut missing_phone = update();
        missing_phone.phone = String::new();
        assert!(matches!(
            missing_phone.validate(),
            Err(BookingError::InvalidInput(_))
        ));
    }

    #[test]
    fn address_is_optional_in_profile_update() {
        let mut no_address = update();
        no_address.address = Address::default();
        assert!(no_address.validate().is_ok());
    }
}
