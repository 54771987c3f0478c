//! HTTP client for the CivicConnect backend.
//!
//! Thin typed wrapper over the REST surface in [`crate::server`]. Every call
//! carries the configured timeout; non-2xx statuses map onto the client
//! error taxonomy.

use crate::domain::aggregates::{NewProduct, Order, OrderLine, OrderStatus, Product, UserProfile};
use crate::domain::value_objects::ProductId;
use crate::{Result, StoreError};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// Payload of a successful login or registration.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    #[serde(rename = "clientSecret")]
    client_secret: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn with_bearer(req: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn expect_json<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T> {
        match resp.status() {
            status if status.is_success() => Ok(resp.json().await?),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StoreError::Forbidden),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(what.to_string())),
            StatusCode::CONFLICT => {
                Err(StoreError::Validation(format!("{what} already exists")))
            }
            status => match resp.error_for_status() {
                Err(e) => Err(e.into()),
                Ok(_) => Err(StoreError::Validation(format!("unexpected status {status}"))),
            },
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub async fn fetch_products(&self) -> Result<Vec<Product>> {
        let resp = self.http.get(self.url("/api/product")).send().await?;
        Self::expect_json(resp, "products").await
    }

    pub async fn fetch_product(&self, id: &ProductId) -> Result<Product> {
        let resp = self
            .http
            .get(self.url(&format!("/api/product/{id}")))
            .send()
            .await?;
        Self::expect_json(resp, &format!("product {id}")).await
    }

    // =========================================================================
    // Auth
    // =========================================================================

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let resp = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        if resp.status() == StatusCode::UNAUTHORIZED {
            return Err(StoreError::InvalidCredentials);
        }
        Self::expect_json(resp, "session").await
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let resp = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;
        if resp.status() == StatusCode::CONFLICT {
            return Err(StoreError::EmailInUse);
        }
        Self::expect_json(resp, "session").await
    }

    // =========================================================================
    // Payment
    // =========================================================================

    /// Requests a payment authorization handle for `amount_cents` minor
    /// units. Returns `None` when the response carries no handle; transport
    /// failures surface as [`StoreError::Network`].
    pub async fn create_payment_intent(
        &self,
        amount_cents: i64,
        items: &[OrderLine],
        bearer: Option<&str>,
    ) -> Result<Option<String>> {
        let req = self
            .http
            .post(self.url("/api/payment/create-payment-intent"))
            .json(&json!({ "amount": amount_cents, "items": items }));
        let resp = Self::with_bearer(req, bearer).send().await?;
        let body: IntentResponse = resp
            .json()
            .await
            .unwrap_or(IntentResponse { client_secret: None });
        Ok(body.client_secret)
    }

    // =========================================================================
    // Admin
    // =========================================================================

    pub async fn create_product(&self, new: &NewProduct, bearer: &str) -> Result<Product> {
        let resp = self
            .http
            .post(self.url("/api/product"))
            .bearer_auth(bearer)
            .json(new)
            .send()
            .await?;
        Self::expect_json(resp, "product").await
    }

    pub async fn update_product(&self, product: &Product, bearer: &str) -> Result<Product> {
        let resp = self
            .http
            .put(self.url(&format!("/api/product/{}", product.id)))
            .bearer_auth(bearer)
            .json(product)
            .send()
            .await?;
        Self::expect_json(resp, &format!("product {}", product.id)).await
    }

    pub async fn delete_product(&self, id: &ProductId, bearer: &str) -> Result<()> {
        let resp = self
            .http
            .delete(self.url(&format!("/api/product/{id}")))
            .bearer_auth(bearer)
            .send()
            .await?;
        match resp.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StoreError::Forbidden),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(format!("product {id}"))),
            _ => match resp.error_for_status() {
                Err(e) => Err(e.into()),
                Ok(_) => Ok(()),
            },
        }
    }

    pub async fn fetch_users(&self, bearer: &str) -> Result<Vec<UserProfile>> {
        let resp = self
            .http
            .get(self.url("/api/user"))
            .bearer_auth(bearer)
            .send()
            .await?;
        Self::expect_json(resp, "users").await
    }

    pub async fn update_user(&self, user: &UserProfile, bearer: &str) -> Result<UserProfile> {
        let resp = self
            .http
            .put(self.url(&format!("/api/user/{}", user.id)))
            .bearer_auth(bearer)
            .json(user)
            .send()
            .await?;
        Self::expect_json(resp, &format!("user {}", user.id)).await
    }

    pub async fn delete_user(&self, user_id: &str, bearer: &str) -> Result<()> {
        let resp = self
            .http
            .delete(self.url(&format!("/api/user/{user_id}")))
            .bearer_auth(bearer)
            .send()
            .await?;
        match resp.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StoreError::Forbidden),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(format!("user {user_id}"))),
            _ => match resp.error_for_status() {
                Err(e) => Err(e.into()),
                Ok(_) => Ok(()),
            },
        }
    }

    pub async fn fetch_orders(&self, bearer: &str) -> Result<Vec<Order>> {
        let resp = self
            .http
            .get(self.url("/api/order"))
            .bearer_auth(bearer)
            .send()
            .await?;
        Self::expect_json(resp, "orders").await
    }

    pub async fn advance_order(
        &self,
        order_id: Uuid,
        status: OrderStatus,
        bearer: &str,
    ) -> Result<Order> {
        let resp = self
            .http
            .put(self.url(&format!("/api/order/{order_id}/status")))
            .bearer_auth(bearer)
            .json(&json!({ "status": status }))
            .send()
            .await?;
        Self::expect_json(resp, &format!("order {order_id}")).await
    }
}
