//! REST backend
//!
//! Axum application serving the storefront API: public catalog reads, auth,
//! payment intent issuance plus processor webhook, and the bearer-gated
//! user/order/product administration surface.

pub mod auth;
pub mod error;
pub mod orders;
pub mod payment;
pub mod products;
pub mod seed;
pub mod users;

use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::domain::events::DomainEvent;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub nats: Option<async_nats::Client>,
    pub http: reqwest::Client,
    pub config: Arc<ServerConfig>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "API is running..." }))
        .route("/health", get(health))
        .route(
            "/api/product",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/product/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/user", get(users::list_users))
        .route(
            "/api/user/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/api/payment/create-payment-intent",
            post(payment::create_payment_intent),
        )
        .route("/api/payment/webhook", post(payment::webhook))
        .route("/api/order", get(orders::list_orders))
        .route("/api/order/:id/status", put(orders::update_status))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": "civicconnect" }))
}

/// Best-effort event publication; without a configured bus this is a no-op.
pub(crate) async fn publish_event(state: &AppState, event: DomainEvent) {
    let Some(nats) = &state.nats else { return };
    let payload = match serde_json::to_vec(&event) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(error = %err, "failed to serialize domain event");
            return;
        }
    };
    if let Err(err) = nats.publish(event.subject().to_string(), payload.into()).await {
        tracing::warn!(error = %err, subject = event.subject(), "failed to publish domain event");
    }
}
