//! # BoxPay Configuration
//!
//! Configuration management for the BoxPay integration.
//! All secrets are loaded from environment variables.

use relay_core::{CallbackUrls, RelayError, RelayResult};
use std::env;

/// BoxPay API configuration
#[derive(Clone)]
pub struct BoxPayConfig {
    /// API base URL (e.g., https://test-apis.boxpay.tech/v0/merchants)
    pub api_base_url: String,

    /// Merchant identifier, part of the sessions path
    pub merchant_id: String,

    /// Bearer token for the sessions API
    pub api_key: String,

    /// Business-unit code sent as the legal entity of each session
    pub business_unit_code: String,

    /// Salt used to verify callback signatures
    pub salt_key: String,

    /// Return, back and notify URLs handed to BoxPay
    pub callback_urls: CallbackUrls,
}

impl BoxPayConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `BOXPAY_API_URL`
    /// - `MERCHANT_ID`
    /// - `API_KEY`
    /// - `BUSINESS_UNIT_CODE`
    /// - `SALT_KEY`
    ///
    /// `BASE_URL` (public address of this relay) defaults to
    /// `http://localhost:3000`.
    pub fn from_env() -> RelayResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> RelayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| RelayError::Configuration(format!("{} not set", key)))
        };

        let api_base_url = require("BOXPAY_API_URL")?;
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(RelayError::Configuration(
                "BOXPAY_API_URL must start with http:// or https://".to_string(),
            ));
        }

        let merchant_id = require("MERCHANT_ID")?;
        let api_key = require("API_KEY")?;
        let business_unit_code = require("BUSINESS_UNIT_CODE")?;
        let salt_key = require("SALT_KEY")?;

        let callback_urls = lookup("BASE_URL")
            .map(CallbackUrls::new)
            .unwrap_or_default();

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            merchant_id,
            api_key,
            business_unit_code,
            salt_key,
            callback_urls,
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        api_base_url: impl Into<String>,
        merchant_id: impl Into<String>,
        api_key: impl Into<String>,
        business_unit_code: impl Into<String>,
        salt_key: impl Into<String>,
    ) -> Self {
        let api_base_url: String = api_base_url.into();
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            merchant_id: merchant_id.into(),
            api_key: api_key.into(),
            business_unit_code: business_unit_code.into(),
            salt_key: salt_key.into(),
            callback_urls: CallbackUrls::default(),
        }
    }

    /// Builder: set the public base URL used for the callback URLs
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.callback_urls = CallbackUrls::new(base_url);
        self
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// `{api_base_url}/{merchant_id}/sessions`
    pub fn sessions_url(&self) -> String {
        format!("{}/{}/sessions", self.api_base_url, self.merchant_id)
    }
}

impl std::fmt::Debug for BoxPayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxPayConfig")
            .field("api_base_url", &self.api_base_url)
            .field("merchant_id", &self.merchant_id)
            .field("api_key", &"[redacted]")
            .field("business_unit_code", &self.business_unit_code)
            .field("salt_key", &"[redacted]")
            .field("callback_urls", &self.callback_urls)
            .finish()
    }
}
