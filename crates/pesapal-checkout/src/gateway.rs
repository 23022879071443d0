//! Transport seam between the submission controller and the network.
//!
//! - [`PaymentGateway`] — sends one initiate-payment request, returns the raw reply
//! - [`interpret_reply`] — turns status + body into a [`PaymentResponse`] or an error
//!
//! The browser app implements the trait over `fetch`; the `full` feature ships
//! [`crate::http_client::ReqwestGateway`] for native hosts.

use std::future::Future;

use serde_json::{Map, Value};

use crate::error::CheckoutError;
use crate::payment::InitiatePaymentRequest;
use crate::response::{ErrorBody, PaymentResponse};

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReply {
    pub status: u16,
    pub body: String,
}

impl GatewayReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends the initiate-payment request.
///
/// Implementations issue exactly one request per call and never retry.
/// A reply with any status is `Ok`; `Err` is reserved for failures that
/// produced no reply at all. The returned future is not required to be
/// `Send` since the browser event loop is single-threaded.
pub trait PaymentGateway {
    fn initiate(
        &self,
        request: &InitiatePaymentRequest,
    ) -> impl Future<Output = Result<GatewayReply, CheckoutError>>;
}

impl<G: PaymentGateway + ?Sized> PaymentGateway for &G {
    fn initiate(
        &self,
        request: &InitiatePaymentRequest,
    ) -> impl Future<Output = Result<GatewayReply, CheckoutError>> {
        (**self).initiate(request)
    }
}

/// Interpret a reply from the initiate-payment endpoint.
///
/// The body must be a JSON object regardless of status. 2xx yields the
/// response fields; anything else is a [`CheckoutError::Rejected`] carrying
/// the server's `error` text.
pub fn interpret_reply(reply: &GatewayReply) -> Result<PaymentResponse, CheckoutError> {
    // Parsing into a map first rejects arrays, which derived structs would
    // otherwise accept positionally.
    let object: Map<String, Value> = serde_json::from_str(&reply.body)?;
    if reply.is_success() {
        Ok(serde_json::from_value(Value::Object(object))?)
    } else {
        let body: ErrorBody = serde_json::from_value(Value::Object(object))?;
        Err(CheckoutError::Rejected(body.message()))
    }
}
