//! # Payment Callback
//!
//! The payment-outcome notification BoxPay posts to the webhook endpoint.
//! Only the fields that take part in the signature are extracted; the raw
//! document is kept so it can be stored verbatim.

use crate::error::{RelayError, RelayResult};
use serde_json::{Map, Value};

/// A parsed payment callback
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentCallback {
    pub legal_entity_code: String,
    pub order_id: String,
    pub transaction_id: String,
    pub operation_id: String,
    pub event_id: String,
    pub country_code: String,
    /// `status.status`
    pub status: String,
    /// `money.currencyCode`
    pub currency_code: String,
    /// `money.amount`
    pub amount: String,
    /// The document exactly as received
    pub raw: Value,
}

impl PaymentCallback {
    /// Parse a callback from the raw request body
    pub fn from_slice(body: &[u8]) -> RelayResult<Self> {
        let raw: Value = serde_json::from_slice(body)
            .map_err(|e| RelayError::MalformedCallback(format!("body is not JSON: {}", e)))?;
        Self::from_value(raw)
    }

    /// Validate the shape of a JSON document and extract the signed fields.
    ///
    /// `legalEntityCode` and `orderId` must be present and non-empty.
    /// `status` and `money` must be objects. Other scalar fields that are
    /// absent or `null` contribute an empty string.
    pub fn from_value(raw: Value) -> RelayResult<Self> {
        let obj = raw.as_object().ok_or_else(|| {
            RelayError::MalformedCallback("payload is not an object".to_string())
        })?;

        let legal_entity_code = required_field(obj, "legalEntityCode")?;
        let order_id = required_field(obj, "orderId")?;

        let status = nested_object(obj, "status")?;
        let money = nested_object(obj, "money")?;

        Ok(Self {
            legal_entity_code,
            order_id,
            transaction_id: coerce_field(obj, "transactionId")?,
            operation_id: coerce_field(obj, "operationId")?,
            event_id: coerce_field(obj, "eventId")?,
            country_code: coerce_field(obj, "countryCode")?,
            status: coerce_field(status, "status")?,
            currency_code: coerce_field(money, "currencyCode")?,
            amount: coerce_field(money, "amount")?,
            raw,
        })
    }

    /// Signed fields in canonical order, secret excluded
    pub fn signed_fields(&self) -> [&str; 9] {
        [
            self.legal_entity_code.as_str(),
            self.order_id.as_str(),
            self.transaction_id.as_str(),
            self.operation_id.as_str(),
            self.event_id.as_str(),
            self.country_code.as_str(),
            self.status.as_str(),
            self.currency_code.as_str(),
            self.amount.as_str(),
        ]
    }
}

fn required_field(obj: &Map<String, Value>, key: &str) -> RelayResult<String> {
    let value = coerce_field(obj, key)?;
    if value.is_empty() {
        return Err(RelayError::MalformedCallback(format!("missing {}", key)));
    }
    Ok(value)
}

fn nested_object<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
) -> RelayResult<&'a Map<String, Value>> {
    obj.get(key)
        .and_then(|v| v.as_object())
        .ok_or_else(|| RelayError::MalformedCallback(format!("missing {} object", key)))
}

/// Coerce a scalar JSON value to its string form.
fn coerce_field(obj: &Map<String, Value>, key: &str) -> RelayResult<String> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(Value::Array(_)) | Some(Value::Object(_)) => Err(RelayError::MalformedCallback(
            format!("{} is not a scalar", key),
        )),
    }
}
