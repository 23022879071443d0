use serde::{Deserialize, Deserializer, Serialize};

/// Success body of the initiate-payment endpoint.
///
/// Only these three fields are read; anything else the backend sends is
/// ignored. Missing or `null` fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub order_tracking_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub merchant_reference: String,
    /// External page where the user completes the payment.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub redirect_url: String,
}

/// Failure body of the initiate-payment endpoint.
///
/// `error` is usually a string, but backends relaying upstream failures
/// sometimes nest an object there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Text shown after the rejection prefix. Empty when the field is absent.
    pub fn message(&self) -> String {
        match &self.error {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
