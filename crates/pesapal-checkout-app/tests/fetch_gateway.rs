//! `FetchGateway` failure text in a real browser.
//! Run: wasm-pack test --headless --firefox crates/pesapal-checkout-app
#![cfg(target_arch = "wasm32")]

use checkout::{CheckoutConfig, CheckoutError, DraftPayment, InitiatePaymentRequest, PaymentGateway};
use pesapal_checkout_app::FetchGateway;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn test_unreachable_endpoint_reports_fetch_message_only() {
    // Port 9 (discard) is not served by the test runner.
    let gateway = FetchGateway::new(&CheckoutConfig::with_endpoint(
        "http://127.0.0.1:9/api/payments/initiate-payment/",
    ));
    let mut draft = DraftPayment::new();
    draft.set_field("amount", "10", false).unwrap();
    let request = InitiatePaymentRequest::from_draft(&draft).unwrap();

    let err = gateway.initiate(&request).await.unwrap_err();

    let CheckoutError::Transport(description) = &err else {
        panic!("expected transport error, got {err:?}");
    };
    assert!(!description.is_empty());
    assert!(!description.starts_with("TypeError"), "{description}");
    assert_eq!(err.status_message(), format!("Error: {description}"));
}
