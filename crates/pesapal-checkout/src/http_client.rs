use crate::config::CheckoutConfig;
use crate::error::CheckoutError;
use crate::gateway::{GatewayReply, PaymentGateway};
use crate::payment::InitiatePaymentRequest;

/// [`PaymentGateway`] over `reqwest`, for native hosts.
///
/// Sends one JSON `POST` per call. No timeout and no retries are configured;
/// the request runs to completion or failure exactly once. With
/// `include_credentials` set, cookies the backend sets are kept and sent back
/// on later requests, the native counterpart of `credentials: include`.
pub struct ReqwestGateway {
    http: reqwest::Client,
    endpoint: String,
}

impl ReqwestGateway {
    pub fn new(config: &CheckoutConfig) -> Result<Self, CheckoutError> {
        let http = reqwest::Client::builder()
            .cookie_store(config.include_credentials)
            .build()
            .map_err(|e| CheckoutError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_http_client(config, http))
    }

    /// Create a gateway with a custom reqwest::Client (cookie store, proxies...).
    pub fn with_http_client(config: &CheckoutConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            endpoint: config.endpoint.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PaymentGateway for ReqwestGateway {
    async fn initiate(
        &self,
        request: &InitiatePaymentRequest,
    ) -> Result<GatewayReply, CheckoutError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| CheckoutError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| CheckoutError::Transport(e.to_string()))?;

        Ok(GatewayReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_targets_configured_endpoint() {
        let config = CheckoutConfig::with_endpoint("http://localhost:9999/pay/");
        let gateway = ReqwestGateway::new(&config).unwrap();
        assert_eq!(gateway.endpoint(), "http://localhost:9999/pay/");
    }
}
