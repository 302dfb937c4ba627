//! # relay-boxpay
//!
//! BoxPay integration for boxpay-relay.
//!
//! Creates hosted checkout sessions through the BoxPay merchant API. The
//! callback signature salt is loaded here too, since it is issued by BoxPay
//! alongside the API credentials.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay_boxpay::BoxPaySessionClient;
//! use relay_core::SessionProvider;
//!
//! let client = BoxPaySessionClient::from_env()?;
//! let session = client.create_session().await?;
//!
//! // Hand the provider JSON (session token, checkout URL) to the browser
//! ```

pub mod config;
pub mod session;

// Re-exports
pub use config::BoxPayConfig;
pub use session::{BoxPaySessionClient, SessionTemplate};
