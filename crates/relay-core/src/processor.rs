//! # Callback Processor
//!
//! Runs an inbound webhook through header check, shape validation,
//! signature verification and (optionally) storage.

use crate::callback::PaymentCallback;
use crate::error::{RelayError, RelayResult};
use crate::signature::SignatureVerifier;
use crate::store::BoxedPaymentStore;
use tracing::{debug, error, info, warn};

/// Outcome of a successfully processed callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Verified and written to the store
    Stored,
    /// Verified; no store configured
    Verified,
}

/// Verifies and stores payment callbacks.
#[derive(Clone)]
pub struct CallbackProcessor {
    verifier: SignatureVerifier,
    store: Option<BoxedPaymentStore>,
}

impl CallbackProcessor {
    pub fn new(verifier: SignatureVerifier, store: Option<BoxedPaymentStore>) -> Self {
        Self { verifier, store }
    }

    /// Whether verified callbacks are persisted
    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// Process one webhook delivery.
    ///
    /// A missing or empty signature is rejected before the body is looked at.
    pub async fn process(
        &self,
        signature: Option<&str>,
        body: &[u8],
    ) -> RelayResult<ProcessOutcome> {
        let signature = signature
            .filter(|s| !s.is_empty())
            .ok_or(RelayError::SignatureMissing)?;

        let callback = PaymentCallback::from_slice(body)?;
        debug!(
            order_id = %callback.order_id,
            event_id = %callback.event_id,
            status = %callback.status,
            "Parsed payment callback"
        );

        if let Err(e) = self.verifier.verify(&callback, signature) {
            warn!(order_id = %callback.order_id, "Callback signature mismatch");
            return Err(e);
        }

        info!(
            order_id = %callback.order_id,
            transaction_id = %callback.transaction_id,
            status = %callback.status,
            amount = %callback.amount,
            currency = %callback.currency_code,
            "Verified payment callback"
        );

        match &self.store {
            Some(store) => {
                store.insert(&callback.raw).await.map_err(|e| {
                    error!(backend = store.backend_name(), "Failed to store callback: {}", e);
                    e
                })?;
                Ok(ProcessOutcome::Stored)
            }
            None => Ok(ProcessOutcome::Verified),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryPaymentStore, PaymentStore};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Arc;

    struct FailingStore;

    #[async_trait]
    impl PaymentStore for FailingStore {
        async fn insert(&self, _document: &Value) -> RelayResult<()> {
            Err(RelayError::Storage("connection reset".to_string()))
        }

        fn backend_name(&self) -> &'static str {
            "failing"
        }
    }

    fn body() -> Vec<u8> {
        serde_json::to_vec(&json!({
            "legalEntityCode": "LE1",
            "orderId": "ORD1",
            "transactionId": "TXN1",
            "operationId": "OP1",
            "eventId": "EV1",
            "countryCode": "IN",
            "status": { "status": "SUCCESS" },
            "money": { "currencyCode": "INR", "amount": "100.00" }
        }))
        .unwrap()
    }

    fn valid_signature() -> String {
        let cb = PaymentCallback::from_slice(&body()).unwrap();
        SignatureVerifier::new("saltXYZ").compute(&cb)
    }

    #[tokio::test]
    async fn test_verified_without_store() {
        let processor = CallbackProcessor::new(SignatureVerifier::new("saltXYZ"), None);
        let sig = valid_signature();

        let outcome = processor.process(Some(&sig), &body()).await.unwrap();
        assert_eq!(outcome, ProcessOutcome::Verified);
        assert!(!processor.has_store());
    }

    #[tokio::test]
    async fn test_stores_verified_document_verbatim() {
        let store = MemoryPaymentStore::new();
        let processor = CallbackProcessor::new(
            SignatureVerifier::new("saltXYZ"),
            Some(Arc::new(store.clone())),
        );
        let sig = valid_signature();

        let outcome = processor.process(Some(&sig), &body()).await.unwrap();
        assert_eq!(outcome, ProcessOutcome::Stored);
        assert_eq!(store.documents(), vec![serde_json::from_slice::<Value>(&body()).unwrap()]);
    }

    #[tokio::test]
    async fn test_missing_signature_checked_first() {
        let store = MemoryPaymentStore::new();
        let processor = CallbackProcessor::new(
            SignatureVerifier::new("saltXYZ"),
            Some(Arc::new(store.clone())),
        );

        let err = processor.process(None, b"not even json").await.unwrap_err();
        assert!(matches!(err, RelayError::SignatureMissing));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_empty_signature_counts_as_missing() {
        let processor = CallbackProcessor::new(SignatureVerifier::new("saltXYZ"), None);

        let err = processor.process(Some(""), &body()).await.unwrap_err();
        assert!(matches!(err, RelayError::SignatureMissing));

        let err = processor.process(Some(""), b"{}").await.unwrap_err();
        assert!(matches!(err, RelayError::SignatureMissing));
    }

    #[tokio::test]
    async fn test_mismatch_skips_storage() {
        let store = MemoryPaymentStore::new();
        let processor = CallbackProcessor::new(
            SignatureVerifier::new("saltXYZ"),
            Some(Arc::new(store.clone())),
        );

        let err = processor.process(Some("deadbeef"), &body()).await.unwrap_err();
        assert!(matches!(err, RelayError::SignatureMismatch));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let processor = CallbackProcessor::new(SignatureVerifier::new("saltXYZ"), None);
        let body =
            serde_json::to_vec(&json!({ "legalEntityCode": "LE1", "orderId": "ORD1" })).unwrap();

        let err = processor.process(Some("abc"), &body).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces() {
        let processor = CallbackProcessor::new(
            SignatureVerifier::new("saltXYZ"),
            Some(Arc::new(FailingStore)),
        );
        let sig = valid_signature();

        let err = processor.process(Some(&sig), &body()).await.unwrap_err();
        assert!(matches!(err, RelayError::Storage(_)));
        assert_eq!(err.status_code(), 500);
    }
}
