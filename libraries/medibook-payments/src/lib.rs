//! MediBook Payments
//!
//! Razorpay integration for appointment payments.
//!
//! # Features
//!
//! - **Orders**: Create and fetch provider orders through the REST API
//! - **Signatures**: Verify the HMAC-SHA256 signature returned by checkout
//!
//! # Example
//!
//! ```ignore
//! use medibook_core::{OrderRequest, PaymentProvider};
//! use medibook_payments::{RazorpayClient, RazorpayConfig, SignatureVerifier};
//!
//! let config = RazorpayConfig::new("rzp_test_key", "secret");
//! let client = RazorpayClient::new(config.clone())?;
//!
//! let order = client
//!     .create_order(&OrderRequest {
//!         amount: 50_000,
//!         currency: "INR".to_string(),
//!         receipt: appointment_id.to_string(),
//!     })
//!     .await?;
//!
//! // Later, with the values returned by checkout
//! SignatureVerifier::new(&config.key_secret).verify(&order.id, &payment_id, &signature)?;
//! ```

mod client;
mod config;
mod error;
mod signature;

pub use client::RazorpayClient;
pub use config::{RazorpayConfig, DEFAULT_API_BASE};
pub use error::{PaymentError, Result};
pub use signature::SignatureVerifier;
