//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the session provider, the callback processor, and configuration.

use crate::db::MongoPaymentStore;
use relay_boxpay::BoxPaySessionClient;
use relay_core::{
    BoxedPaymentStore, BoxedSessionProvider, CallbackProcessor, SignatureVerifier,
};
use std::env;
use std::sync::Arc;

/// Collection used when `MONGO_COLLECTION` is unset
pub const DEFAULT_COLLECTION: &str = "payment_responses";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// MongoDB connection string; persistence is off when absent
    pub mongo_uri: Option<String>,
    /// Database override (otherwise taken from the URI)
    pub mongo_database: Option<String>,
    /// Collection for verified callbacks
    pub mongo_collection: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: non_empty("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: non_empty("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            mongo_uri: non_empty("MONGO_URI"),
            mongo_database: non_empty("MONGO_DATABASE"),
            mongo_collection: non_empty("MONGO_COLLECTION")
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e)
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Creates hosted payment sessions
    pub sessions: BoxedSessionProvider,
    /// Verifies and stores webhook deliveries
    pub processor: CallbackProcessor,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        sessions: BoxedSessionProvider,
        processor: CallbackProcessor,
    ) -> Self {
        Self {
            sessions,
            processor,
            config,
        }
    }

    /// Build state from the environment.
    ///
    /// Missing BoxPay settings and an unreachable MongoDB are fatal.
    pub async fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let client = BoxPaySessionClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize BoxPay: {}", e))?;
        let verifier = SignatureVerifier::new(client.config().salt_key.clone());

        let store: Option<BoxedPaymentStore> = match &config.mongo_uri {
            Some(uri) => {
                let store = MongoPaymentStore::connect(
                    uri,
                    config.mongo_database.as_deref(),
                    &config.mongo_collection,
                )
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to MongoDB: {}", e))?;
                Some(Arc::new(store) as BoxedPaymentStore)
            }
            None => {
                tracing::warn!("MONGO_URI not set, verified callbacks will not be stored");
                None
            }
        };

        Ok(Self::new(
            config,
            Arc::new(client),
            CallbackProcessor::new(verifier, store),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.mongo_uri.is_none());
        assert_eq!(config.mongo_collection, DEFAULT_COLLECTION);
        assert!(!config.is_production());
    }

    #[test]
    fn test_app_config_overrides() {
        let vars = HashMap::from([
            ("PORT", "8081"),
            ("MONGO_URI", "mongodb://localhost:27017/boxpay"),
            ("MONGO_COLLECTION", "callbacks"),
            ("ENVIRONMENT", "production"),
        ]);
        let config = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.port, 8081);
        assert_eq!(config.mongo_uri.as_deref(), Some("mongodb://localhost:27017/boxpay"));
        assert_eq!(config.mongo_collection, "callbacks");
        assert!(config.is_production());
    }

    #[test]
    fn test_unparseable_port_falls_back() {
        let config = AppConfig::from_lookup(|k| (k == "PORT").then(|| "http".to_string()));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_socket_addr() {
        let mut config = AppConfig::from_lookup(|_| None);
        config.port = 3000;

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");

        config.host = "not a host".to_string();
        assert!(config.socket_addr().is_err());
    }
}
