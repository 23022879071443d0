//! Browser transport for the initiate-payment request.

use checkout::{CheckoutConfig, CheckoutError, GatewayReply, InitiatePaymentRequest, PaymentGateway};
use gloo_net::http::Request;
use web_sys::RequestCredentials;

/// [`PaymentGateway`] over the browser `fetch` API.
#[derive(Clone, Debug)]
pub struct FetchGateway {
    endpoint: String,
    credentials: RequestCredentials,
}

impl FetchGateway {
    pub fn new(config: &CheckoutConfig) -> Self {
        let credentials = if config.include_credentials {
            RequestCredentials::Include
        } else {
            RequestCredentials::SameOrigin
        };
        Self {
            endpoint: config.endpoint.clone(),
            credentials,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PaymentGateway for FetchGateway {
    async fn initiate(
        &self,
        request: &InitiatePaymentRequest,
    ) -> Result<GatewayReply, CheckoutError> {
        // `.json()` sets `Content-Type: application/json`.
        let resp = Request::post(&self.endpoint)
            .credentials(self.credentials)
            .json(request)
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(transport_error)?;

        Ok(GatewayReply { status, body })
    }
}

/// A rejected `fetch` carries a JS `TypeError`; only its `message` is the
/// failure's description (`Display` would prepend the error name).
pub(crate) fn transport_error(err: gloo_net::Error) -> CheckoutError {
    let description = match err {
        gloo_net::Error::JsError(js) => js.message,
        other => other.to_string(),
    };
    CheckoutError::Transport(description)
}
