//! Checkout signature verification.
//!
//! Razorpay signs a completed payment as
//! `hex(HMAC-SHA256(key_secret, "{order_id}|{payment_id}"))`.

use crate::error::{PaymentError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verifies payment signatures against the shared key secret.
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: Vec<u8>,
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier").finish_non_exhaustive()
    }
}

impl SignatureVerifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Lowercase hex signature for an order/payment pair.
    pub fn sign(&self, order_id: &str, payment_id: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| PaymentError::InvalidConfig(e.to_string()))?;
        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());

        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Check `signature` in constant time.
    ///
    /// The signature must match byte for byte. Any mismatch, including case,
    /// padding or length, is `InvalidSignature`.
    pub fn verify(&self, order_id: &str, payment_id: &str, signature: &str) -> Result<()> {
        let expected = self.sign(order_id, payment_id)?;

        if expected.as_bytes().ct_eq(signature.as_bytes()).unwrap_u8() == 0 {
            return Err(PaymentError::InvalidSignature);
        }

        Ok(())
    }
}
