//! # Routes
//!
//! Axum router configuration for the relay.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use relay_core::{FAILURE_PATH, NOTIFY_PATH, SUCCESS_PATH};
use tower_http::trace::TraceLayer;

/// Create the main application router
///
/// Routes:
/// - POST /create-session              - Create a BoxPay session
/// - POST /api/store-payment-response  - BoxPay status webhook
/// - GET  /api/success                 - Success landing page
/// - GET  /api/failure                 - Failure landing page
/// - GET  /health                      - Health check
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Session relay
        .route("/create-session", post(handlers::create_session))
        // Webhook (raw body, signature checked by the handler)
        .route(NOTIFY_PATH, post(handlers::store_payment_response))
        // Browser redirects
        .route(SUCCESS_PATH, get(handlers::payment_success))
        .route(FAILURE_PATH, get(handlers::payment_failure))
        // Middleware
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
