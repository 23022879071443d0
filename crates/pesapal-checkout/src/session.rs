//! Submission controller for one rendered form.
//!
//! A [`CheckoutSession`] owns the draft, the [`SubmissionState`] and the
//! gateway. It is single-threaded: all mutation happens from UI events or
//! from the one resumption point after the gateway call, so interior
//! mutability through `Cell`/`RefCell` is enough.

use std::cell::{Cell, RefCell};

use tracing::{debug, info, warn};

use crate::draft::{DraftPayment, FieldEdit, FieldTarget};
use crate::error::CheckoutError;
use crate::gateway::{interpret_reply, PaymentGateway};
use crate::payment::InitiatePaymentRequest;
use crate::response::PaymentResponse;
use crate::state::SubmissionState;

type Observer = Box<dyn Fn()>;

pub struct CheckoutSession<G> {
    gateway: G,
    draft: RefCell<DraftPayment>,
    state: RefCell<SubmissionState>,
    detached: Cell<bool>,
    check_constraints: bool,
    observer: Option<Observer>,
}

impl<G: PaymentGateway> CheckoutSession<G> {
    /// Fresh session with an empty draft.
    pub fn new(gateway: G) -> Self {
        Self::with_draft(gateway, DraftPayment::new())
    }

    /// Session starting from a pre-filled draft.
    pub fn with_draft(gateway: G, draft: DraftPayment) -> Self {
        Self {
            gateway,
            draft: RefCell::new(draft),
            state: RefCell::new(SubmissionState::default()),
            detached: Cell::new(false),
            check_constraints: false,
            observer: None,
        }
    }

    /// Run [`DraftPayment::check_constraints`] before every request.
    ///
    /// For hosts without browser validation. A draft that fails the check
    /// ends the attempt with the constraint error and sends nothing.
    pub fn with_constraint_check(mut self) -> Self {
        self.check_constraints = true;
        self
    }

    /// Called after every observable change (draft edit or state transition).
    /// Never called while the session holds an internal borrow.
    pub fn with_observer(mut self, observer: impl Fn() + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn draft(&self) -> DraftPayment {
        self.draft.borrow().clone()
    }

    pub fn field_value(&self, target: FieldTarget) -> String {
        self.draft.borrow().value(target).to_string()
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.state.borrow().is_in_flight()
    }

    pub fn status_message(&self) -> Option<String> {
        self.state.borrow().status_message().map(str::to_string)
    }

    pub fn modal(&self) -> Option<PaymentResponse> {
        self.state.borrow().modal().cloned()
    }

    pub fn edit(&self, edit: FieldEdit) {
        if self.detached.get() {
            return;
        }
        self.draft.borrow_mut().apply(edit);
        self.notify();
    }

    /// Name-based edit: `is_address` routes the value into the billing address.
    pub fn set_field(
        &self,
        name: &str,
        value: impl Into<String>,
        is_address: bool,
    ) -> Result<(), CheckoutError> {
        let target = FieldTarget::from_name(name, is_address)?;
        self.edit(FieldEdit::new(target, value));
        Ok(())
    }

    /// Submit the current draft.
    ///
    /// Returns `false` without touching the network when a submission is
    /// already in flight or the session is detached. Otherwise issues exactly
    /// one request and records its outcome; the in-flight flag is released on
    /// every exit path, including the returned future being dropped.
    pub async fn submit(&self) -> bool {
        if self.detached.get() {
            return false;
        }
        if !self.state.borrow_mut().begin() {
            debug!("submit ignored: request already in flight");
            return false;
        }
        self.notify();

        let guard = InFlight {
            session: self,
            settled: false,
        };

        let outcome = match self.outgoing_request() {
            Ok(request) => {
                debug!(currency = %request.currency, "sending initiate-payment request");
                match self.gateway.initiate(&request).await {
                    Ok(reply) => {
                        debug!(status = reply.status, "initiate-payment replied");
                        interpret_reply(&reply)
                    }
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        };

        guard.settle(outcome);
        true
    }

    /// Close the confirmation modal (Close button or dismiss icon).
    pub fn dismiss(&self) {
        if self.detached.get() {
            return;
        }
        let changed = self.state.borrow_mut().dismiss();
        if changed {
            self.notify();
        }
    }

    /// The owning view is gone. Late results are discarded from now on and
    /// the observer is no longer invoked.
    pub fn detach(&self) {
        if !self.detached.replace(true) && self.is_in_flight() {
            debug!("session detached with a request in flight");
        }
    }

    pub fn is_detached(&self) -> bool {
        self.detached.get()
    }

    fn outgoing_request(&self) -> Result<InitiatePaymentRequest, CheckoutError> {
        let draft = self.draft.borrow();
        if self.check_constraints {
            draft.check_constraints()?;
        }
        InitiatePaymentRequest::from_draft(&draft)
    }

    fn notify(&self) {
        if self.detached.get() {
            return;
        }
        if let Some(observer) = &self.observer {
            observer();
        }
    }
}

/// Holds the in-flight flag for the duration of one request.
struct InFlight<'a, G: PaymentGateway> {
    session: &'a CheckoutSession<G>,
    settled: bool,
}

impl<G: PaymentGateway> InFlight<'_, G> {
    fn settle(mut self, outcome: Result<PaymentResponse, CheckoutError>) {
        self.settled = true;
        let session = self.session;

        if session.detached.get() {
            warn!(
                ok = outcome.is_ok(),
                "discarding initiate-payment result for detached form"
            );
            session.state.borrow_mut().abandon();
            return;
        }

        match &outcome {
            Ok(resp) => info!(
                order_tracking_id = %resp.order_tracking_id,
                merchant_reference = %resp.merchant_reference,
                "payment initiated"
            ),
            Err(e) => warn!(kind = e.kind(), error = %e, "payment initiation failed"),
        }
        session.state.borrow_mut().complete(outcome);
        session.notify();
    }
}

impl<G: PaymentGateway> Drop for InFlight<'_, G> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        debug!("initiate-payment request dropped before completion");
        self.session.state.borrow_mut().abandon();
        self.session.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{AddressField, RootField};
    use crate::gateway::GatewayReply;
    use std::rc::Rc;

    struct FixedGateway {
        reply: Result<GatewayReply, String>,
        calls: Cell<usize>,
    }

    impl FixedGateway {
        fn new(reply: Result<GatewayReply, String>) -> Self {
            Self {
                reply,
                calls: Cell::new(0),
            }
        }
    }

    impl PaymentGateway for FixedGateway {
        async fn initiate(
            &self,
            _request: &InitiatePaymentRequest,
        ) -> Result<GatewayReply, CheckoutError> {
            self.calls.set(self.calls.get() + 1);
            self.reply.clone().map_err(CheckoutError::Transport)
        }
    }

    fn session(reply: Result<GatewayReply, String>) -> CheckoutSession<FixedGateway> {
        let session = CheckoutSession::new(FixedGateway::new(reply));
        session.edit(FieldEdit::root(RootField::Amount, "10"));
        session
    }

    #[tokio::test]
    async fn test_success_opens_modal() {
        let s = session(Ok(GatewayReply::new(
            200,
            r#"{"order_tracking_id":"OT1","merchant_reference":"R1","redirect_url":"https://p/x"}"#,
        )));
        assert!(s.submit().await);
        let modal = s.modal().unwrap();
        assert_eq!(modal.order_tracking_id, "OT1");
        assert_eq!(s.status_message().as_deref(), Some("Payment initiated successfully!"));
        assert!(!s.is_in_flight());
    }

    #[tokio::test]
    async fn test_invalid_amount_fails_without_network() {
        let s = CheckoutSession::new(FixedGateway::new(Err("should not be called".to_string())));
        s.edit(FieldEdit::root(RootField::Amount, "abc"));
        assert!(s.submit().await);
        let msg = s.status_message().unwrap();
        assert!(msg.starts_with("Error: amount must be a positive number"), "{msg}");
        assert_eq!(s.gateway().calls.get(), 0);
    }

    #[tokio::test]
    async fn test_constraint_check_blocks_incomplete_draft() {
        let s = session(Ok(GatewayReply::new(200, "{}"))).with_constraint_check();

        assert!(s.submit().await);

        assert_eq!(s.gateway().calls.get(), 0);
        assert_eq!(
            s.status_message().as_deref(),
            Some("Error: description is required")
        );
        assert!(s.modal().is_none());
        assert!(!s.is_in_flight());
    }

    #[tokio::test]
    async fn test_constraint_check_passes_complete_draft() {
        let s = session(Ok(GatewayReply::new(200, r#"{"order_tracking_id":"OT1"}"#)))
            .with_constraint_check();
        s.edit(FieldEdit::root(RootField::Description, "Rent"));
        s.edit(FieldEdit::address(AddressField::FirstName, "Juma"));
        s.edit(FieldEdit::address(AddressField::LastName, "Otieno"));
        s.edit(FieldEdit::address(AddressField::EmailAddress, "juma@example.com"));
        s.edit(FieldEdit::address(AddressField::PhoneNumber, "0700000000"));
        s.edit(FieldEdit::address(AddressField::Line1, "Moi Avenue"));

        assert!(s.submit().await);

        assert_eq!(s.gateway().calls.get(), 1);
        assert_eq!(s.modal().unwrap().order_tracking_id, "OT1");
    }

    #[tokio::test]
    async fn test_observer_fires_on_edit_and_transitions() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let s = session(Err("down".to_string()))
            .with_observer(move || counter.set(counter.get() + 1));

        s.edit(FieldEdit::address(AddressField::FirstName, "Juma"));
        assert_eq!(calls.get(), 1);

        s.submit().await;
        // begin + complete
        assert_eq!(calls.get(), 3);
        assert_eq!(s.gateway().calls.get(), 1);
        assert_eq!(s.status_message().as_deref(), Some("Error: down"));
    }

    #[tokio::test]
    async fn test_detached_session_ignores_everything() {
        let s = session(Err("down".to_string()));
        s.detach();
        assert!(!s.submit().await);
        s.edit(FieldEdit::root(RootField::Amount, "99"));
        assert_eq!(s.draft().amount, "10");
        assert_eq!(s.state(), SubmissionState::default());
    }

    #[test]
    fn test_set_field_rejects_unknown_names() {
        let s = session(Err("unused".to_string()));
        assert!(s.set_field("phone_number", "0700", true).is_ok());
        assert!(s.set_field("phone_number", "0700", false).is_err());
        assert_eq!(
            s.field_value(FieldTarget::Address(AddressField::PhoneNumber)),
            "0700"
        );
    }
}
