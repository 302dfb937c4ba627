//! # Request Handlers
//!
//! Axum request handlers for the relay: session creation, the BoxPay
//! status webhook, and the two browser landing pages.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use relay_core::{ProcessOutcome, RelayError, SIGNATURE_HEADER};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

// =============================================================================
// Response Types
// =============================================================================

/// Error envelope for the session relay
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
        }
    }
}

/// Body returned for a verified callback
pub const VERIFIED_MESSAGE: &str = "Payment data and signature verified";

fn relay_error_to_response(err: &RelayError) -> (StatusCode, &'static str) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.public_message())
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "boxpay-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a hosted payment session and relay the provider's response
#[instrument(skip(state), fields(provider = state.sessions.provider_name()))]
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let session = state.sessions.create_session().await.map_err(|e| {
        error!("Error creating session: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Failed to create session", e.to_string())),
        )
    })?;

    Ok(Json(session))
}

/// Receive a BoxPay status notification
#[instrument(skip(state, headers, body), fields(len = body.len()))]
pub async fn store_payment_response(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    debug!(?headers, body = %String::from_utf8_lossy(&body), "Received payment response");

    // unreadable or empty values count as absent
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty());

    match state.processor.process(signature, &body).await {
        Ok(ProcessOutcome::Stored) => {
            info!("Payment response verified and stored");
            (StatusCode::OK, VERIFIED_MESSAGE)
        }
        Ok(ProcessOutcome::Verified) => {
            info!("Payment response verified");
            (StatusCode::OK, VERIFIED_MESSAGE)
        }
        Err(e) => {
            match &e {
                RelayError::Storage(_) => error!("Rejecting payment response: {}", e),
                _ => warn!("Rejecting payment response: {}", e),
            }
            relay_error_to_response(&e)
        }
    }
}

/// Browser landing page after a successful payment
pub async fn payment_success() -> impl IntoResponse {
    info!("Payment successful");
    (StatusCode::OK, "Payment successful")
}

/// Browser landing page after a failed payment
pub async fn payment_failure() -> impl IntoResponse {
    info!("Payment failure");
    (StatusCode::OK, "Payment failure")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Failed to create session", "connection refused");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "error": "Failed to create session",
                "details": "connection refused"
            })
        );
    }

    #[test]
    fn test_relay_error_conversion() {
        let (status, body) = relay_error_to_response(&RelayError::SignatureMissing);
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, "Signature header missing");

        let (status, body) =
            relay_error_to_response(&RelayError::MalformedCallback("missing orderId".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid payment data received");

        let (status, _) = relay_error_to_response(&RelayError::Storage("down".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
