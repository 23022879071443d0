use std::rc::Rc;

use checkout::{
    AddressField, CheckoutConfig, CheckoutSession, FieldEdit, FieldTarget, PaymentGateway,
    PaymentResponse, RootField, DEFAULT_CURRENCY,
};
use leptos::*;
use leptos_meta::*;
use wasm_bindgen::prelude::*;

mod api;

pub use api::FetchGateway;

/// What the component tree needs from a [`CheckoutSession`], independent of
/// its gateway type.
trait FormSession {
    fn field_value(&self, target: FieldTarget) -> String;
    fn is_in_flight(&self) -> bool;
    fn status_message(&self) -> Option<String>;
    fn modal(&self) -> Option<PaymentResponse>;
    fn edit(&self, edit: FieldEdit);
    fn dismiss(&self);
    fn detach(&self);
    fn spawn_submit(self: Rc<Self>);
}

impl<G: PaymentGateway + 'static> FormSession for CheckoutSession<G> {
    fn field_value(&self, target: FieldTarget) -> String {
        CheckoutSession::field_value(self, target)
    }

    fn is_in_flight(&self) -> bool {
        CheckoutSession::is_in_flight(self)
    }

    fn status_message(&self) -> Option<String> {
        CheckoutSession::status_message(self)
    }

    fn modal(&self) -> Option<PaymentResponse> {
        CheckoutSession::modal(self)
    }

    fn edit(&self, edit: FieldEdit) {
        CheckoutSession::edit(self, edit)
    }

    fn dismiss(&self) {
        CheckoutSession::dismiss(self)
    }

    fn detach(&self) {
        CheckoutSession::detach(self)
    }

    fn spawn_submit(self: Rc<Self>) {
        spawn_local(async move {
            if !CheckoutSession::submit(&self).await {
                log::debug!("submit ignored");
            }
        });
    }
}

type Session = Rc<dyn FormSession>;

/// Shared by the form, its fields and the modal.
///
/// `changed` fires whenever the session reports a change; readers call
/// `changed.track()` before reading from the session.
#[derive(Clone, Copy)]
struct CheckoutContext {
    session: StoredValue<Session>,
    changed: Trigger,
}

impl CheckoutContext {
    fn field(&self, target: FieldTarget) -> String {
        self.changed.track();
        self.session.with_value(|s| s.field_value(target))
    }

    fn in_flight(&self) -> bool {
        self.changed.track();
        self.session.with_value(|s| s.is_in_flight())
    }

    fn status(&self) -> Option<String> {
        self.changed.track();
        self.session.with_value(|s| s.status_message())
    }

    fn modal(&self) -> Option<PaymentResponse> {
        self.changed.track();
        self.session.with_value(|s| s.modal())
    }

    // Mutations go through a cloned handle so no stored-value borrow is held
    // while the session notifies.
    fn edit(&self, edit: FieldEdit) {
        self.session.get_value().edit(edit);
    }

    fn dismiss(&self) {
        self.session.get_value().dismiss();
    }

    fn submit(&self) {
        self.session.get_value().spawn_submit();
    }
}

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Html lang="en" />
        <Meta charset="utf-8" />
        <Meta name="viewport" content="width=device-width, initial-scale=1" />
        <Title text="Payment Details" />
        <Stylesheet href="/style.css" />

        <main class="container">
            <PaymentForm />
        </main>
    }
}

/// Payment details form with status banner and confirmation modal, sending
/// through the browser's `fetch`.
#[component]
pub fn PaymentForm(#[prop(optional)] config: Option<CheckoutConfig>) -> impl IntoView {
    let config = config.unwrap_or_default();
    view! { <CheckoutForm gateway=FetchGateway::new(&config) /> }
}

/// The payment details form over any [`PaymentGateway`].
#[component]
pub fn CheckoutForm<G>(gateway: G) -> impl IntoView
where
    G: PaymentGateway + 'static,
{
    let changed = create_trigger();
    let session: Session = Rc::new(CheckoutSession::new(gateway).with_observer(move || {
        changed.try_notify();
    }));

    let on_unmount = session.clone();
    on_cleanup(move || on_unmount.detach());

    let ctx = CheckoutContext {
        session: store_value(session),
        changed,
    };
    provide_context(ctx);

    let on_submit = move |ev: ev::SubmitEvent| {
        // Native constraint validation has already passed when this fires.
        ev.prevent_default();
        ctx.submit();
    };

    view! {
        <div class="form-card">
            <h2 class="form-title">"Payment Details"</h2>
            <StatusBanner />

            <form class="payment-form" on:submit=on_submit>
                <div class="form-grid">
                    <div class="form-column">
                        <div class="field">
                            <label class="field-label">{format!("Amount ({})", DEFAULT_CURRENCY)}</label>
                            <div class="amount-input">
                                <span class="amount-prefix">{DEFAULT_CURRENCY}</span>
                                <TextInput
                                    target=FieldTarget::Root(RootField::Amount)
                                    input_type="number"
                                    step="0.01"
                                />
                            </div>
                        </div>

                        <div class="field">
                            <label class="field-label">"Description"</label>
                            <textarea
                                class="input"
                                name="description"
                                rows="2"
                                required=true
                                prop:value=move || ctx.field(FieldTarget::Root(RootField::Description))
                                on:input=move |ev| {
                                    ctx.edit(FieldEdit::root(RootField::Description, event_target_value(&ev)))
                                }
                            ></textarea>
                        </div>
                    </div>

                    <div class="form-column">
                        <div class="name-row">
                            <Field label="First Name" target=FieldTarget::Address(AddressField::FirstName) />
                            <Field label="Last Name" target=FieldTarget::Address(AddressField::LastName) />
                        </div>
                        <Field
                            label="Email"
                            target=FieldTarget::Address(AddressField::EmailAddress)
                            input_type="email"
                        />
                        <Field
                            label="Phone Number"
                            target=FieldTarget::Address(AddressField::PhoneNumber)
                            input_type="tel"
                        />
                        <Field label="Address" target=FieldTarget::Address(AddressField::Line1) />
                    </div>
                </div>

                <button
                    type="submit"
                    class="btn btn-primary btn-submit"
                    disabled=move || ctx.in_flight()
                >
                    {move || if ctx.in_flight() {
                        view! {
                            <span class="spinner" aria-hidden="true"></span>
                            <span>"Processing..."</span>
                        }.into_view()
                    } else {
                        view! { <span>"Proceed to Payment"</span> }.into_view()
                    }}
                </button>
            </form>
        </div>

        {move || ctx.modal().map(|response| view! { <ConfirmationModal response=response /> })}
    }
}

/// Labelled required input bound to one draft field.
#[component]
fn Field(
    label: &'static str,
    target: FieldTarget,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    view! {
        <div class="field">
            <label class="field-label">{label}</label>
            <TextInput target=target input_type=input_type />
        </div>
    }
}

#[component]
fn TextInput(
    target: FieldTarget,
    input_type: &'static str,
    #[prop(optional)] step: Option<&'static str>,
) -> impl IntoView {
    let ctx = expect_context::<CheckoutContext>();

    view! {
        <input
            class="input"
            type=input_type
            step=step
            name=target.name()
            required=true
            prop:value=move || ctx.field(target)
            on:input=move |ev| ctx.edit(FieldEdit::new(target, event_target_value(&ev)))
        />
    }
}

/// Inline status banner, shown whenever there is a status message.
#[component]
fn StatusBanner() -> impl IntoView {
    let ctx = expect_context::<CheckoutContext>();

    view! {
        {move || ctx.status().map(|status| view! {
            <div class="status-banner" role="status">{status}</div>
        })}
    }
}

/// Shown after a successful initiation until dismissed.
#[component]
fn ConfirmationModal(response: PaymentResponse) -> impl IntoView {
    let ctx = expect_context::<CheckoutContext>();
    let close = move |_| ctx.dismiss();

    view! {
        <div class="modal-backdrop">
            <div class="modal" role="dialog" aria-modal="true">
                <div class="modal-header">
                    <div class="modal-title">
                        <span class="icon-success">"\u{2713}"</span>
                        <h3>"Payment Initiated Successfully"</h3>
                    </div>
                    <button class="btn-icon modal-dismiss" aria-label="Dismiss" on:click=close>
                        "\u{2715}"
                    </button>
                </div>

                <div class="modal-body">
                    <p class="modal-row">
                        <span class="modal-label">"Order ID:"</span>
                        " "
                        <span class="order-tracking-id">{response.order_tracking_id}</span>
                    </p>
                    <p class="modal-row">
                        <span class="modal-label">"Reference:"</span>
                        " "
                        <span class="merchant-reference">{response.merchant_reference}</span>
                    </p>
                </div>

                <div class="modal-actions">
                    <button class="btn btn-secondary modal-close" on:click=close>
                        "Close"
                    </button>
                    <a
                        class="btn btn-primary continue-link"
                        href=response.redirect_url
                        target="_blank"
                        rel="noopener noreferrer"
                    >
                        "Continue to Payment"
                    </a>
                </div>
            </div>
        </div>
    }
}

/// Initialize the app
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("console_log init failed: {}", e).into());
    }
    mount_to_body(|| view! { <App /> });
}
