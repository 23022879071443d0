use crate::constants::SUCCESS_MESSAGE;
use crate::error::CheckoutError;
use crate::response::PaymentResponse;

/// Where a form instance is in its submission lifecycle.
///
/// Replaces separate loading / status / modal / response flags so that
/// impossible combinations (e.g. submitting while the modal is open) cannot
/// be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// Interactive. `status` is whatever the banner last said, if anything.
    Idle { status: Option<String> },
    /// The one allowed request is in flight.
    Submitting,
    /// The backend accepted the payment; the confirmation modal is open.
    Succeeded { response: PaymentResponse },
    /// The attempt ended with an error; the user may resubmit.
    Failed { message: String },
}

impl Default for SubmissionState {
    fn default() -> Self {
        SubmissionState::Idle { status: None }
    }
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    /// Banner text, if a banner should be shown.
    pub fn status_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Idle { status } => status.as_deref(),
            SubmissionState::Submitting => None,
            SubmissionState::Succeeded { .. } => Some(SUCCESS_MESSAGE),
            SubmissionState::Failed { message } => Some(message.as_str()),
        }
    }

    /// Response to show in the confirmation modal while it is open.
    pub fn modal(&self) -> Option<&PaymentResponse> {
        match self {
            SubmissionState::Succeeded { response } => Some(response),
            _ => None,
        }
    }

    /// Start a submission. Returns `false` (and changes nothing) if one is
    /// already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_in_flight() {
            return false;
        }
        *self = SubmissionState::Submitting;
        true
    }

    /// Record the outcome of the in-flight submission.
    pub fn complete(&mut self, outcome: Result<PaymentResponse, CheckoutError>) {
        *self = match outcome {
            Ok(response) => SubmissionState::Succeeded { response },
            Err(err) => SubmissionState::Failed {
                message: err.status_message(),
            },
        };
    }

    /// Close the confirmation modal. The banner text survives.
    /// Returns whether anything changed.
    pub fn dismiss(&mut self) -> bool {
        match self {
            SubmissionState::Succeeded { .. } => {
                *self = SubmissionState::Idle {
                    status: Some(SUCCESS_MESSAGE.to_string()),
                };
                true
            }
            _ => false,
        }
    }

    /// Leave `Submitting` without an outcome (the request future was dropped).
    pub(crate) fn abandon(&mut self) {
        if self.is_in_flight() {
            *self = SubmissionState::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> PaymentResponse {
        PaymentResponse {
            order_tracking_id: "OT123".to_string(),
            merchant_reference: "REF1".to_string(),
            redirect_url: "https://pay.example/x".to_string(),
        }
    }

    #[test]
    fn test_initial_state_is_quiet() {
        let state = SubmissionState::default();
        assert!(!state.is_in_flight());
        assert_eq!(state.status_message(), None);
        assert!(state.modal().is_none());
    }

    #[test]
    fn test_begin_refuses_while_in_flight() {
        let mut state = SubmissionState::default();
        assert!(state.begin());
        assert!(state.is_in_flight());
        assert!(!state.begin());
        assert!(state.is_in_flight());
    }

    #[test]
    fn test_begin_clears_previous_banner() {
        let mut state = SubmissionState::Failed {
            message: "Error: boom".to_string(),
        };
        assert!(state.begin());
        assert_eq!(state.status_message(), None);
    }

    #[test]
    fn test_success_opens_modal_with_banner() {
        let mut state = SubmissionState::default();
        state.begin();
        state.complete(Ok(response()));
        assert_eq!(state.status_message(), Some("Payment initiated successfully!"));
        assert_eq!(state.modal(), Some(&response()));
        assert!(!state.is_in_flight());
    }

    #[test]
    fn test_failure_shows_banner_without_modal() {
        let mut state = SubmissionState::default();
        state.begin();
        state.complete(Err(CheckoutError::Rejected("insufficient funds".to_string())));
        assert_eq!(
            state.status_message(),
            Some("Error initiating payment: insufficient funds")
        );
        assert!(state.modal().is_none());
    }

    #[test]
    fn test_dismiss_keeps_banner_and_never_reopens() {
        let mut state = SubmissionState::default();
        state.begin();
        state.complete(Ok(response()));

        assert!(state.dismiss());
        assert!(state.modal().is_none());
        assert_eq!(state.status_message(), Some("Payment initiated successfully!"));

        assert!(!state.dismiss());
        assert!(state.modal().is_none());
    }

    #[test]
    fn test_dismiss_is_noop_outside_success() {
        let mut state = SubmissionState::Failed {
            message: "Error: x".to_string(),
        };
        assert!(!state.dismiss());
        assert_eq!(state.status_message(), Some("Error: x"));
    }

    #[test]
    fn test_abandon_only_affects_in_flight() {
        let mut state = SubmissionState::default();
        state.begin();
        state.abandon();
        assert_eq!(state, SubmissionState::default());

        let mut done = SubmissionState::Succeeded { response: response() };
        done.abandon();
        assert!(done.modal().is_some());
    }
}
