//! # BoxPay Relay
//!
//! Session relay and webhook receiver for the BoxPay payment gateway.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export BOXPAY_API_URL=https://test-apis.boxpay.tech/v0/merchants
//! export MERCHANT_ID=...
//! export API_KEY=...
//! export BUSINESS_UNIT_CODE=...
//! export SALT_KEY=...
//! export MONGO_URI=mongodb://localhost:27017/boxpay   # optional
//!
//! # Run the server
//! boxpay-relay
//! ```

use relay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::from_env().await?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Session provider: {}", state.sessions.provider_name());
    info!(
        "Callback persistence: {}",
        if state.processor.has_store() { "enabled" } else { "disabled" }
    );

    // Create router
    let app = routes::create_router(state);

    info!("Server is running on http://{}", addr);

    if !is_prod {
        info!("Session: POST http://{}/create-session", addr);
        info!("Webhook: POST http://{}/api/store-payment-response", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}
