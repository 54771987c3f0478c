//! Payment gateway seam.
//!
//! Intent issuance goes through the CivicConnect backend; confirmation goes
//! directly to the payment processor. Card data never enters this crate:
//! the processor's hosted widget mints an opaque method token and that token
//! is all the storefront ever holds.

use super::ShippingDetails;
use crate::client::ApiClient;
use crate::domain::aggregates::OrderLine;
use crate::{Result, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Opaque payment method handle minted by the processor's tokenizing widget.
#[derive(Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct PaymentMethodToken(String);

impl PaymentMethodToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct BillingDetails {
    pub name: String,
    pub email: String,
    pub address: BillingAddress,
}

#[derive(Clone, Debug, Serialize)]
pub struct BillingAddress {
    pub line1: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl From<&ShippingDetails> for BillingDetails {
    fn from(details: &ShippingDetails) -> Self {
        Self {
            name: details.full_name.clone(),
            email: details.email.clone(),
            address: BillingAddress {
                line1: details.address.clone(),
                city: details.city.clone(),
                postal_code: details.postal_code.clone(),
                country: details.country.clone(),
            },
        }
    }
}

/// Outcome of a confirmation attempt that reached the processor.
#[derive(Clone, Debug, Deserialize)]
pub struct PaymentConfirmation {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl PaymentConfirmation {
    pub fn succeeded(&self) -> bool {
        self.status == "succeeded"
    }
}

/// The two network operations of a checkout attempt.
pub trait PaymentGateway {
    async fn create_intent(
        &self,
        amount_cents: i64,
        items: &[OrderLine],
        bearer: Option<&str>,
    ) -> Result<Option<String>>;

    async fn confirm(
        &self,
        client_secret: &str,
        method: &PaymentMethodToken,
        billing: &BillingDetails,
    ) -> Result<PaymentConfirmation>;
}

/// Production gateway.
pub struct HttpGateway {
    api: Arc<ApiClient>,
    http: reqwest::Client,
    processor_url: String,
}

impl HttpGateway {
    pub fn new(
        api: Arc<ApiClient>,
        processor_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api,
            http,
            processor_url: processor_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ConfirmResponse {
    status: Option<String>,
    error: Option<ConfirmError>,
}

#[derive(Debug, Deserialize)]
struct ConfirmError {
    message: Option<String>,
}

impl PaymentGateway for HttpGateway {
    async fn create_intent(
        &self,
        amount_cents: i64,
        items: &[OrderLine],
        bearer: Option<&str>,
    ) -> Result<Option<String>> {
        self.api
            .create_payment_intent(amount_cents, items, bearer)
            .await
    }

    async fn confirm(
        &self,
        client_secret: &str,
        method: &PaymentMethodToken,
        billing: &BillingDetails,
    ) -> Result<PaymentConfirmation> {
        let resp = self
            .http
            .post(format!("{}/v1/payment_intents/confirm", self.processor_url))
            .json(&json!({
                "client_secret": client_secret,
                "payment_method": method,
                "billing_details": billing,
            }))
            .send()
            .await?;
        let body: ConfirmResponse = resp.json().await?;
        if let Some(error) = body.error {
            return Err(StoreError::Payment(
                error
                    .message
                    .unwrap_or_else(|| super::CONFIRM_FAILED_MESSAGE.to_string()),
            ));
        }
        Ok(PaymentConfirmation {
            status: body.status.unwrap_or_default(),
            message: None,
        })
    }
}
