use crate::constants::DEFAULT_ENDPOINT;
#[cfg(feature = "full")]
use crate::constants::ENDPOINT_ENV;
#[cfg(feature = "full")]
use crate::error::CheckoutError;

/// Where and how the initiate-payment request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    pub endpoint: String,
    /// Send cookies/credentials along with the request (browser `credentials: include`).
    pub include_credentials: bool,
}

impl Default for CheckoutConfig {
    /// Defaults to the local payments backend.
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            include_credentials: true,
        }
    }
}

impl CheckoutConfig {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Load from the process environment (and `.env` if present).
    /// Falls back to [`DEFAULT_ENDPOINT`] when `CHECKOUT_ENDPOINT` is unset.
    #[cfg(feature = "full")]
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok();
        match std::env::var(ENDPOINT_ENV) {
            Ok(url) => Self::parse_endpoint(&url).map(Self::with_endpoint),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(CheckoutError::Config(format!("{ENDPOINT_ENV}: {e}"))),
        }
    }

    #[cfg(feature = "full")]
    fn parse_endpoint(raw: &str) -> Result<String, CheckoutError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CheckoutError::Config(format!("{ENDPOINT_ENV} is empty")));
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(CheckoutError::Config(format!(
                "{ENDPOINT_ENV} must be an http(s) URL, got {trimmed:?}"
            )));
        }
        Ok(trimmed.to_string())
    }
}
