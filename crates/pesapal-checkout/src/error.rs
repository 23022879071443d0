use thiserror::Error;

use crate::constants::{EXCEPTION_PREFIX, REJECTION_PREFIX};

/// Errors returned by checkout operations.
///
/// The `Display` text of each variant is what ends up in the status banner,
/// so transport and parse failures carry the underlying description verbatim.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The request never produced a response (connection refused, DNS, CORS...).
    #[error("{0}")]
    Transport(String),

    /// The response body was not the JSON shape we expected.
    #[error("{0}")]
    Malformed(#[from] serde_json::Error),

    /// The server answered outside the 2xx range with an `error` field.
    #[error("{0}")]
    Rejected(String),

    #[error("amount must be a positive number, got {0:?}")]
    InvalidAmount(String),

    #[error("unknown form field: {0}")]
    UnknownField(String),

    #[error("{0}")]
    Constraint(String),

    #[error("config error: {0}")]
    Config(String),
}

impl CheckoutError {
    /// Human-readable banner text for a failed submission.
    pub fn status_message(&self) -> String {
        match self {
            CheckoutError::Rejected(error) => format!("{REJECTION_PREFIX}{error}"),
            other => format!("{EXCEPTION_PREFIX}{other}"),
        }
    }

    /// Short label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckoutError::Transport(_) => "transport",
            CheckoutError::Malformed(_) => "malformed",
            CheckoutError::Rejected(_) => "rejected",
            CheckoutError::InvalidAmount(_) => "invalid_amount",
            CheckoutError::UnknownField(_) => "unknown_field",
            CheckoutError::Constraint(_) => "constraint",
            CheckoutError::Config(_) => "config",
        }
    }
}
