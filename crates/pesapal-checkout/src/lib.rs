//! Payment-details form core for a Pesapal-style initiate-payment backend.
//!
//! Collects billing details into a draft, submits them with one JSON `POST`,
//! and exposes the outcome as a single [`SubmissionState`].
//!
//! # Three parts
//!
//! - **Form state** ([`DraftPayment`], [`FieldEdit`]) — the mutable draft
//! - **Submission** ([`CheckoutSession`], [`PaymentGateway`]) — one request at a time
//! - **Result** ([`SubmissionState::status_message`], [`SubmissionState::modal`]) — what the UI renders
//!
//! # Quick example
//!
//! ```no_run
//! use checkout::{CheckoutConfig, CheckoutSession, ReqwestGateway};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let config = CheckoutConfig::from_env().unwrap();
//! // No browser here, so the session checks required fields itself.
//! let session = CheckoutSession::new(ReqwestGateway::new(&config).unwrap()).with_constraint_check();
//!
//! session.set_field("amount", "150.50", false).unwrap();
//! session.set_field("email_address", "jane@example.com", true).unwrap();
//!
//! session.submit().await;
//! if let Some(resp) = session.modal() {
//!     println!("continue at {}", resp.redirect_url);
//! }
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod draft;
pub mod error;
pub mod gateway;
pub mod payment;
pub mod response;
pub mod session;
pub mod state;

#[cfg(feature = "full")]
pub mod http_client;

// Re-exports
pub use config::CheckoutConfig;
pub use constants::*;
pub use draft::{AddressField, BillingAddress, DraftPayment, FieldEdit, FieldTarget, RootField};
pub use error::CheckoutError;
pub use gateway::{interpret_reply, GatewayReply, PaymentGateway};
pub use payment::{parse_amount, InitiatePaymentRequest};
pub use response::{ErrorBody, PaymentResponse};
pub use session::CheckoutSession;
pub use state::SubmissionState;

#[cfg(feature = "full")]
pub use http_client::ReqwestGateway;
