//! # BoxPay Checkout Sessions
//!
//! Server-to-server creation of hosted BoxPay payment sessions.

use crate::config::BoxPayConfig;
use async_trait::async_trait;
use relay_core::{RelayError, RelayResult, SessionProvider};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error, info, instrument};

/// Order values placed in every session body.
///
/// These are development placeholders; the sessions endpoint does not take
/// them from the caller.
#[derive(Debug, Clone)]
pub struct SessionTemplate {
    pub country_code: String,
    pub order_id: String,
    pub locale_code: String,
    pub payment_type: String,
    pub amount: String,
    pub currency_code: String,
    pub shopper_reference: String,
}

impl Default for SessionTemplate {
    fn default() -> Self {
        Self {
            country_code: "IN".to_string(),
            order_id: "test12".to_string(),
            locale_code: "fr-FR".to_string(),
            payment_type: "S".to_string(),
            amount: "7568.50".to_string(),
            currency_code: "INR".to_string(),
            shopper_reference: "UNIQUE_SHOPPER".to_string(),
        }
    }
}

/// BoxPay session client
pub struct BoxPaySessionClient {
    config: BoxPayConfig,
    template: SessionTemplate,
    client: Client,
}

impl BoxPaySessionClient {
    /// Create a new client. No request timeout is set; transport defaults apply.
    pub fn new(config: BoxPayConfig) -> Self {
        Self {
            config,
            template: SessionTemplate::default(),
            client: Client::new(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> RelayResult<Self> {
        let config = BoxPayConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Builder: replace the order template
    pub fn with_template(mut self, template: SessionTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn config(&self) -> &BoxPayConfig {
        &self.config
    }

    /// Build the JSON body for the sessions API
    fn build_request(&self) -> BoxPaySessionRequest {
        let urls = &self.config.callback_urls;
        BoxPaySessionRequest {
            context: BoxPayContext {
                country_code: self.template.country_code.clone(),
                legal_entity: BoxPayLegalEntity {
                    code: self.config.business_unit_code.clone(),
                },
                order_id: self.template.order_id.clone(),
                local_code: self.template.locale_code.clone(),
            },
            payment_type: self.template.payment_type.clone(),
            money: BoxPayMoney {
                amount: self.template.amount.clone(),
                currency_code: self.template.currency_code.clone(),
            },
            shopper: BoxPayShopper {
                unique_reference: self.template.shopper_reference.clone(),
            },
            frontend_return_url: urls.return_url(),
            frontend_back_url: urls.back_url(),
            status_notify_url: urls.notify_url(),
        }
    }
}

#[async_trait]
impl SessionProvider for BoxPaySessionClient {
    #[instrument(skip(self), fields(merchant_id = %self.config.merchant_id))]
    async fn create_session(&self) -> RelayResult<serde_json::Value> {
        let request = self.build_request();
        let url = self.config.sessions_url();

        debug!(
            "Creating BoxPay session: order_id={}, amount={} {}",
            request.context.order_id, request.money.amount, request.money.currency_code
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("BoxPay request failed: {}", e);
                RelayError::Upstream(format!("Failed to reach BoxPay: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("BoxPay API error: status={}, body={}", status, body);
            return Err(RelayError::Upstream(format!(
                "Failed to create session: {}",
                status.canonical_reason().unwrap_or(status.as_str())
            )));
        }

        let session: serde_json::Value = response.json().await.map_err(|e| {
            RelayError::Upstream(format!("Failed to parse BoxPay response: {}", e))
        })?;

        info!("Session created: {}", session);

        Ok(session)
    }

    fn provider_name(&self) -> &'static str {
        "boxpay"
    }
}

// =============================================================================
// BoxPay API Types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BoxPaySessionRequest {
    context: BoxPayContext,
    payment_type: String,
    money: BoxPayMoney,
    shopper: BoxPayShopper,
    frontend_return_url: String,
    frontend_back_url: String,
    status_notify_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BoxPayContext {
    country_code: String,
    legal_entity: BoxPayLegalEntity,
    order_id: String,
    local_code: String,
}

#[derive(Debug, Serialize)]
struct BoxPayLegalEntity {
    code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BoxPayMoney {
    amount: String,
    currency_code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BoxPayShopper {
    unique_reference: String,
}
