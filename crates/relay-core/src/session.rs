//! # Session Provider Trait
//!
//! Seam between the HTTP layer and the payment provider that hosts the
//! checkout session.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │        SessionProvider (trait)           │
//! │  ├── create_session()                    │
//! │  └── provider_name()                     │
//! └──────────────────────────────────────────┘
//!                     ▲
//!           ┌─────────┴─────────┐
//!   ┌───────┴───────┐   ┌───────┴───────┐
//!   │ BoxPaySession │   │  test stubs   │
//!   │    Client     │   │               │
//!   └───────────────┘   └───────────────┘
//! ```

use crate::error::RelayResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Creates hosted payment sessions.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Create a session and return the provider's JSON response unmodified.
    async fn create_session(&self) -> RelayResult<serde_json::Value>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a boxed session provider (dynamic dispatch)
pub type BoxedSessionProvider = Arc<dyn SessionProvider>;

/// Path of the browser landing page after a successful payment
pub const SUCCESS_PATH: &str = "/api/success";
/// Path of the browser landing page after a failed or abandoned payment
pub const FAILURE_PATH: &str = "/api/failure";
/// Path BoxPay posts status notifications to
pub const NOTIFY_PATH: &str = "/api/store-payment-response";

/// The three URLs handed to the provider when a session is created
#[derive(Debug, Clone)]
pub struct CallbackUrls {
    /// Public base URL of this relay (e.g., "https://relay.example.com")
    pub base_url: String,
}

impl CallbackUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `frontendReturnUrl`
    pub fn return_url(&self) -> String {
        format!("{}{}", self.base_url, SUCCESS_PATH)
    }

    /// `frontendBackUrl`
    pub fn back_url(&self) -> String {
        format!("{}{}", self.base_url, FAILURE_PATH)
    }

    /// `statusNotifyUrl`
    pub fn notify_url(&self) -> String {
        format!("{}{}", self.base_url, NOTIFY_PATH)
    }
}

impl Default for CallbackUrls {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_urls() {
        let urls = CallbackUrls::new("https://boxpay-3.onrender.com/");

        assert_eq!(urls.return_url(), "https://boxpay-3.onrender.com/api/success");
        assert_eq!(urls.back_url(), "https://boxpay-3.onrender.com/api/failure");
        assert_eq!(
            urls.notify_url(),
            "https://boxpay-3.onrender.com/api/store-payment-response"
        );
    }

    #[test]
    fn test_default_urls() {
        assert_eq!(
            CallbackUrls::default().return_url(),
            "http://localhost:3000/api/success"
        );
    }
}
