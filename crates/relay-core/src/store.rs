//! # Payment Storage
//!
//! Insert-only persistence for verified callbacks. Implementations are
//! injected into the [`CallbackProcessor`](crate::CallbackProcessor);
//! there is no global handle.

use crate::error::RelayResult;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};

/// Storage collaborator for verified payment callbacks.
///
/// Documents are stored verbatim. No deduplication and no update path.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Append one callback document
    async fn insert(&self, document: &Value) -> RelayResult<()>;

    /// Backend name (for logging)
    fn backend_name(&self) -> &'static str;
}

/// Type alias for a boxed payment store (dynamic dispatch)
pub type BoxedPaymentStore = Arc<dyn PaymentStore>;

/// In-process store, useful for local runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryPaymentStore {
    documents: Arc<Mutex<Vec<Value>>>,
}

impl MemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything inserted so far
    pub fn documents(&self) -> Vec<Value> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // a panic while holding the lock leaves the Vec intact
    fn lock(&self) -> MutexGuard<'_, Vec<Value>> {
        self.documents.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl PaymentStore for MemoryPaymentStore {
    async fn insert(&self, document: &Value) -> RelayResult<()> {
        self.lock().push(document.clone());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
