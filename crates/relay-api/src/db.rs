//! # MongoDB Store
//!
//! Append-only collection of verified payment callbacks.

use async_trait::async_trait;
use mongodb::bson::{self, doc, Document};
use mongodb::{Client, Collection};
use relay_core::{PaymentStore, RelayError, RelayResult};
use serde_json::Value;
use tracing::{debug, info};

/// Database used when neither `MONGO_DATABASE` nor the URI names one
pub const DEFAULT_DATABASE: &str = "boxpay";

#[derive(Debug, Clone)]
pub struct MongoPaymentStore {
    collection: Collection<Document>,
}

impl MongoPaymentStore {
    /// Connect and ping the server so a bad URI fails at startup.
    pub async fn connect(
        uri: &str,
        database: Option<&str>,
        collection: &str,
    ) -> RelayResult<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| RelayError::Storage(format!("invalid MongoDB URI: {}", e)))?;

        let db = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };

        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| RelayError::Storage(format!("MongoDB unreachable: {}", e)))?;

        info!(database = db.name(), collection, "Connected to MongoDB");

        Ok(Self {
            collection: db.collection(collection),
        })
    }
}

#[async_trait]
impl PaymentStore for MongoPaymentStore {
    async fn insert(&self, document: &Value) -> RelayResult<()> {
        let document = bson::to_document(document)
            .map_err(|e| RelayError::Storage(format!("unencodable document: {}", e)))?;

        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(|e| RelayError::Storage(e.to_string()))?;

        debug!(id = %result.inserted_id, "Stored payment callback");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_uri_is_storage_error() {
        let err = MongoPaymentStore::connect("not-a-mongo-uri", None, "payment_responses")
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Storage(_)));
    }
}
