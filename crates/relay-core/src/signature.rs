//! # Webhook Signature Verification
//!
//! BoxPay signs each callback with a SHA-256 digest over the merchant salt
//! followed by a fixed sequence of callback fields:
//!
//! ```text
//! salt + legalEntityCode + orderId + transactionId + operationId
//!      + eventId + countryCode + status.status + money.currencyCode
//!      + money.amount
//! ```
//!
//! Fields are concatenated with no separators. The digest is sent as
//! lowercase hex in the `x-signature` header.

use crate::callback::PaymentCallback;
use crate::error::{RelayError, RelayResult};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Name of the header carrying the callback signature
pub const SIGNATURE_HEADER: &str = "x-signature";

/// Verifies callback signatures against the shared salt
#[derive(Clone)]
pub struct SignatureVerifier {
    salt: String,
}

impl SignatureVerifier {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Build the pre-image that gets hashed
    pub fn canonical_string(&self, callback: &PaymentCallback) -> String {
        let mut text = self.salt.clone();
        for field in callback.signed_fields() {
            text.push_str(field);
        }
        text
    }

    /// Lowercase hex SHA-256 of the canonical string
    pub fn compute(&self, callback: &PaymentCallback) -> String {
        let digest = Sha256::digest(self.canonical_string(callback).as_bytes());
        hex::encode(digest)
    }

    /// Check a header-supplied signature against the computed digest.
    pub fn verify(&self, callback: &PaymentCallback, signature: &str) -> RelayResult<()> {
        let expected = self.compute(callback);
        if constant_time_compare(expected.as_bytes(), signature.as_bytes()) {
            Ok(())
        } else {
            Err(RelayError::SignatureMismatch)
        }
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("salt", &"[redacted]")
            .finish()
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    // unequal lengths compare unequal
    a.ct_eq(b).into()
}
