//! Account registration, login and token authentication

use crate::error::Result;
use crate::services::AuthService;
use medibook_core::{BookingError, BookingStore, NewUser, UserId};
use regex::Regex;
use std::sync::{Arc, LazyLock};

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// local@domain.tld with hyphen-safe domain labels
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$")
        .expect("valid regex")
});

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn BookingStore>,
    auth: Arc<AuthService>,
}

impl AccountService {
    pub fn new(store: Arc<dyn BookingStore>, auth: Arc<AuthService>) -> Self {
        Self { store, auth }
    }

    /// Create an account and return an access token for it
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<String> {
        let name = name.trim();
        let email = email.trim();

        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(BookingError::invalid_input("Missing details").into());
        }
        if !is_valid_email(email) {
            return Err(BookingError::invalid_input("Please enter a valid email").into());
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(BookingError::invalid_input("Please enter a strong password").into());
        }

        let hash = self.auth.hash_password(password)?;
        let user = self
            .store
            .create_user(
                NewUser {
                    name: name.to_string(),
                    email: email.to_string(),
                },
                &hash,
            )
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        self.auth.create_token(&user.id)
    }

    /// Check credentials and return an access token
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let email = email.trim();

        let user = self
            .store
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| BookingError::not_found("User", email))?;

        let hash = self
            .store
            .get_password_hash(&user.id)
            .await?
            .ok_or(BookingError::InvalidCredentials)?;

        if !self.auth.verify_password(password, &hash)? {
            tracing::warn!(user_id = %user.id, "Login failed: invalid credentials");
            return Err(BookingError::InvalidCredentials.into());
        }

        tracing::debug!(user_id = %user.id, "Login successful");

        self.auth.create_token(&user.id)
    }

    /// Resolve the user behind an access token
    pub fn authenticate(&self, token: &str) -> Result<UserId> {
        self.auth.verify_access_token(token.trim())
    }
}

fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
