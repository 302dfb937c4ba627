//! # relay-core
//!
//! Core types and traits for the boxpay-relay payment gateway integration.
//!
//! This crate provides:
//! - `PaymentCallback` for the webhook payload BoxPay delivers
//! - `SignatureVerifier` for the salted SHA-256 callback signature
//! - `CallbackProcessor` tying verification to an injected store
//! - `PaymentStore` and `SessionProvider` traits at the I/O seams
//! - `RelayError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use relay_core::{CallbackProcessor, SignatureVerifier};
//!
//! let processor = CallbackProcessor::new(SignatureVerifier::new(salt), Some(store));
//!
//! // In the webhook endpoint:
//! processor.process(headers.get("x-signature"), &body).await?;
//! ```

pub mod callback;
pub mod error;
pub mod processor;
pub mod session;
pub mod signature;
pub mod store;

// Re-exports for convenience
pub use callback::PaymentCallback;
pub use error::{RelayError, RelayResult};
pub use processor::{CallbackProcessor, ProcessOutcome};
pub use session::{
    BoxedSessionProvider, CallbackUrls, SessionProvider, FAILURE_PATH, NOTIFY_PATH, SUCCESS_PATH,
};
pub use signature::{SignatureVerifier, SIGNATURE_HEADER};
pub use store::{BoxedPaymentStore, MemoryPaymentStore, PaymentStore};
