//! Razorpay connection settings.

use serde::{Deserialize, Serialize};

/// Production API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.razorpay.com";

/// Credentials and endpoint for the Razorpay API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RazorpayConfig {
    /// Public key id, used as the basic-auth username
    pub key_id: String,

    /// Key secret; basic-auth password and HMAC key for signatures
    pub key_secret: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl RazorpayConfig {
    /// Config pointing at the production API.
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            api_base: default_api_base(),
        }
    }

    /// Override the API endpoint (sandbox proxies, tests).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_production_endpoint() {
        let config = RazorpayConfig::new("key", "secret");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_api_base_defaults_when_deserializing() {
        let config: RazorpayConfig =
            serde_json::from_str(r#"{"key_id":"key","key_secret":"secret"}"#).unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }
}
