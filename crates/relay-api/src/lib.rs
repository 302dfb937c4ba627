//! # relay-api
//!
//! HTTP API layer for boxpay-relay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The session-creation relay
//! - The BoxPay status webhook with signature verification
//! - MongoDB persistence for verified callbacks
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/create-session` | Create a BoxPay session |
//! | POST | `/api/store-payment-response` | BoxPay webhook |
//! | GET | `/api/success` | Success landing page |
//! | GET | `/api/failure` | Failure landing page |

pub mod db;
pub mod handlers;
pub mod routes;
pub mod state;

pub use db::MongoPaymentStore;
pub use routes::create_router;
pub use state::{AppConfig, AppState};
