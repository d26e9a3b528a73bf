/// Server configuration
use crate::error::{Result, ServerError};
use medibook_payments::{RazorpayConfig, DEFAULT_API_BASE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_payments")]
    pub payments: PaymentSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_image_storage_path")]
    pub image_storage_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentSettings {
    /// ISO currency code used for every order
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub key_id: String,

    #[serde(default)]
    pub key_secret: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl PaymentSettings {
    /// Razorpay client settings
    pub fn razorpay(&self) -> RazorpayConfig {
        RazorpayConfig::new(self.key_id.clone(), self.key_secret.clone())
            .with_api_base(self.api_base.clone())
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `config.toml` in the working directory.
    /// Environment variables use the `MEDIBOOK_` prefix and `__` between
    /// sections, e.g. `MEDIBOOK_AUTH__JWT_SECRET`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                // Load from config file if it exists
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("MEDIBOOK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set MEDIBOOK_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if self.payments.key_id.is_empty() || self.payments.key_secret.is_empty() {
            return Err(ServerError::Config(
                "Razorpay credentials are required (set MEDIBOOK_PAYMENTS__KEY_ID and MEDIBOOK_PAYMENTS__KEY_SECRET)"
                    .to_string(),
            ));
        }

        let currency = &self.payments.currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ServerError::Config(format!(
                "Currency must be a three-letter ISO code, got {:?}",
                currency
            )));
        }

        Ok(())
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        image_storage_path: default_image_storage_path(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/medibook.db".to_string()
}

fn default_image_storage_path() -> PathBuf {
    PathBuf::from("./data/images")
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    24
}

fn default_payments() -> PaymentSettings {
    PaymentSettings {
        currency: default_currency(),
        key_id: String::new(),
        key_secret: String::new(),
        api_base: default_api_base(),
    }
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            auth: default_auth(),
            payments: default_payments(),
        }
    }
}
