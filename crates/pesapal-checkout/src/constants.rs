/// Endpoint used when nothing else is configured.
/// Override at compile time via the CHECKOUT_ENDPOINT env var.
pub const DEFAULT_ENDPOINT: &str = {
    match option_env!("CHECKOUT_ENDPOINT") {
        Some(url) => url,
        None => "http://127.0.0.1:8000/api/payments/initiate-payment/",
    }
};

/// Runtime env var read by [`crate::CheckoutConfig::from_env`].
pub const ENDPOINT_ENV: &str = "CHECKOUT_ENDPOINT";

/// The only supported currency.
pub const DEFAULT_CURRENCY: &str = "KES";

/// Billing country pre-filled on every new draft.
pub const DEFAULT_COUNTRY_CODE: &str = "KE";

/// Banner text after a successful initiation.
pub const SUCCESS_MESSAGE: &str = "Payment initiated successfully!";

/// Prefix for server-side rejections (non-2xx with an `error` field).
pub const REJECTION_PREFIX: &str = "Error initiating payment: ";

/// Prefix for transport and parse failures.
pub const EXCEPTION_PREFIX: &str = "Error: ";
