//! Checkout orchestration.
//!
//! Drives a single checkout attempt through a fixed state machine:
//! `Collecting → AuthorizingPayment → ConfirmingPayment → Succeeded |
//! Failed`. Failures never touch the cart; only an acknowledged success
//! clears it, and it clears exactly once. No automatic retries: every
//! failure surfaces synchronously with a message fit for a blocking dialog.

mod gateway;

pub use gateway::{
    BillingAddress, BillingDetails, HttpGateway, PaymentConfirmation, PaymentGateway,
    PaymentMethodToken,
};

use crate::domain::aggregates::{Cart, OrderLine};
use serde::Serialize;
use thiserror::Error;
use validator::Validate;

/// Surfaced when the intent response carries no authorization handle, and
/// for network faults while authorizing.
pub const AUTHORIZE_FAILED_MESSAGE: &str = "Failed to initiate payment. Please try again.";

/// Fallback when the processor declines without a message of its own.
pub const CONFIRM_FAILED_MESSAGE: &str =
    "Payment could not be completed. Please check your details and try again.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutPhase {
    /// Form entry; no network activity.
    Collecting,
    /// Requesting an authorization handle from the backend.
    AuthorizingPayment,
    /// Confirming with the payment processor.
    ConfirmingPayment,
    /// Confirmed; awaiting user acknowledgement.
    Succeeded,
    /// Terminal for the attempt; resubmission restarts at `Collecting`.
    Failed { message: String },
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("a checkout attempt is already in flight")]
    InFlight,
    #[error("checkout already completed")]
    Completed,
    #[error("invalid input: {0}")]
    Validation(String),
}

impl From<validator::ValidationErrors> for CheckoutError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CheckoutError::Validation(errors.to_string())
    }
}

/// Shipping form fields, validated before anything leaves `Collecting`.
#[derive(Clone, Debug, Default, Serialize, Validate)]
pub struct ShippingDetails {
    #[validate(length(min = 1, message = "full name is required"))]
    pub full_name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "postal code is required"))]
    pub postal_code: String,
    #[validate(length(equal = 2, message = "country must be a 2-letter code"))]
    pub country: String,
}

pub struct CheckoutFlow<G> {
    gateway: G,
    phase: CheckoutPhase,
    acknowledged: bool,
    on_success: Option<Box<dyn FnOnce() + Send>>,
}

impl<G: PaymentGateway> CheckoutFlow<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            phase: CheckoutPhase::Collecting,
            acknowledged: false,
            on_success: None,
        }
    }

    pub fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    /// True while a submission is between leaving `Collecting` and reaching
    /// a terminal phase; the host disables the submit control on this.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self.phase,
            CheckoutPhase::AuthorizingPayment | CheckoutPhase::ConfirmingPayment
        )
    }

    /// Registers the order-success hook, fired exactly once on
    /// acknowledgement.
    pub fn on_order_success(&mut self, hook: impl FnOnce() + Send + 'static) {
        self.on_success = Some(Box::new(hook));
    }

    /// Returns the attempt to `Collecting`.
    pub fn reset(&mut self) {
        self.phase = CheckoutPhase::Collecting;
    }

    /// Runs one attempt: validate, authorize, confirm. The method token is
    /// consumed either way; after a failure the host collects a fresh one.
    /// Precondition failures (`EmptyCart`, `InFlight`, validation) are
    /// errors; payment failures are the `Failed` phase.
    pub async fn submit(
        &mut self,
        cart: &Cart,
        details: &ShippingDetails,
        method: PaymentMethodToken,
        bearer: Option<&str>,
    ) -> Result<&CheckoutPhase, CheckoutError> {
        if self.is_in_flight() {
            return Err(CheckoutError::InFlight);
        }
        if self.phase == CheckoutPhase::Succeeded {
            return Err(CheckoutError::Completed);
        }
        if matches!(self.phase, CheckoutPhase::Failed { .. }) {
            self.phase = CheckoutPhase::Collecting;
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        details.validate()?;

        self.phase = CheckoutPhase::AuthorizingPayment;
        let totals = cart.totals();
        let items: Vec<OrderLine> = cart.lines().iter().map(OrderLine::from).collect();
        let client_secret = match self
            .gateway
            .create_intent(totals.total.to_cents(), &items, bearer)
            .await
        {
            Ok(Some(secret)) => secret,
            Ok(None) | Err(_) => return Ok(self.fail(AUTHORIZE_FAILED_MESSAGE)),
        };

        self.phase = CheckoutPhase::ConfirmingPayment;
        let billing = BillingDetails::from(details);
        match self.gateway.confirm(&client_secret, &method, &billing).await {
            Ok(confirmation) if confirmation.succeeded() => {
                self.phase = CheckoutPhase::Succeeded;
                Ok(&self.phase)
            }
            Ok(confirmation) => {
                let message = confirmation
                    .message
                    .unwrap_or_else(|| CONFIRM_FAILED_MESSAGE.to_string());
                Ok(self.fail(message))
            }
            Err(crate::StoreError::Payment(message)) => Ok(self.fail(message)),
            Err(_) => Ok(self.fail(CONFIRM_FAILED_MESSAGE)),
        }
    }

    fn fail(&mut self, message: impl Into<String>) -> &CheckoutPhase {
        self.phase = CheckoutPhase::Failed {
            message: message.into(),
        };
        &self.phase
    }

    /// The user dismissing the success dialog. Clears the cart and fires the
    /// success hook on the first call only; returns whether this call did
    /// the clearing.
    pub fn acknowledge(&mut self, cart: &mut Cart) -> bool {
        if self.phase != CheckoutPhase::Succeeded || self.acknowledged {
            return false;
        }
        self.acknowledged = true;
        cart.clear();
        if let Some(hook) = self.on_success.take() {
            hook();
        }
        true
    }
}
