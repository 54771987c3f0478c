//! Payment intents and the processor webhook.
//!
//! Intent creation proxies the payment processor with the server-held
//! secret key and records the amount, owner and line snapshots. The webhook
//! consumes that record to materialize an order exactly once when the
//! processor reports a succeeded intent.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::auth::AuthUser;
use super::error::ApiError;
use super::{publish_event, AppState};
use crate::domain::aggregates::OrderLine;
use crate::domain::events::DomainEvent;

#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    /// Integer minor-unit currency (cents).
    pub amount: i64,
    /// Cart line snapshots for the eventual order record.
    #[serde(default)]
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Serialize)]
pub struct CreateIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct ProcessorIntent {
    id: String,
    client_secret: String,
}

/// Bearer is optional: guest checkout is permitted and produces an order
/// with no owning user.
pub async fn create_payment_intent(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Json(req): Json<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>, ApiError> {
    if req.amount <= 0 {
        return Err(ApiError::Validation(
            "Amount must be greater than zero".to_string(),
        ));
    }

    let intent = request_processor_intent(&state, req.amount).await?;
    let user_id = user.and_then(|AuthUser(claims)| Uuid::parse_str(&claims.sub).ok());
    sqlx::query(
        "INSERT INTO payment_intents (id, client_secret, amount_cents, user_id, items) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(&intent.id)
    .bind(&intent.client_secret)
    .bind(req.amount)
    .bind(user_id)
    .bind(sqlx::types::Json(&req.items))
    .execute(&state.db)
    .await?;

    tracing::info!(intent_id = %intent.id, amount_cents = req.amount, "payment intent created");
    Ok(Json(CreateIntentResponse {
        client_secret: intent.client_secret,
    }))
}

async fn request_processor_intent(
    state: &AppState,
    amount_cents: i64,
) -> Result<ProcessorIntent, ApiError> {
    let resp = state
        .http
        .post(format!(
            "{}/v1/payment_intents",
            state.config.payment_api_url
        ))
        .bearer_auth(&state.config.payment_secret_key)
        .json(&json!({ "amount": amount_cents, "currency": "usd" }))
        .send()
        .await
        .map_err(|e| ApiError::Gateway(e.to_string()))?;
    if !resp.status().is_success() {
        return Err(ApiError::Gateway(format!(
            "processor returned {}",
            resp.status()
        )));
    }
    resp.json()
        .await
        .map_err(|e| ApiError::Gateway(e.to_string()))
}

#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: WebhookData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    pub id: String,
}

#[derive(Debug, sqlx::FromRow)]
struct IntentRow {
    id: String,
    amount_cents: i64,
    user_id: Option<Uuid>,
    items: sqlx::types::Json<Vec<OrderLine>>,
    status: String,
}

/// Processor notification. `payment_intent.succeeded` materializes the
/// order; an already-consumed intent is acknowledged without a second
/// order. Other event kinds are acknowledged and ignored.
pub async fn webhook(
    State(state): State<AppState>,
    Json(event): Json<WebhookEvent>,
) -> Result<StatusCode, ApiError> {
    if event.kind != "payment_intent.succeeded" {
        return Ok(StatusCode::OK);
    }

    let intent = sqlx::query_as::<_, IntentRow>(
        "SELECT id, amount_cents, user_id, items, status FROM payment_intents WHERE id = $1",
    )
    .bind(&event.data.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::NotFound("Payment intent not found".to_string()))?;
    if intent.status == "succeeded" {
        return Ok(StatusCode::OK);
    }

    let order_id = Uuid::now_v7();
    let order_number = format!("ORD-{:08}", rand::random::<u32>());
    let total = Decimal::new(intent.amount_cents, 2);
    sqlx::query(
        "INSERT INTO orders (id, order_number, user_id, intent_id, items, total, status) \
         VALUES ($1, $2, $3, $4, $5, $6, 'pending')",
    )
    .bind(order_id)
    .bind(&order_number)
    .bind(intent.user_id)
    .bind(&intent.id)
    .bind(sqlx::types::Json(&intent.items.0))
    .bind(total)
    .execute(&state.db)
    .await?;
    sqlx::query("UPDATE payment_intents SET status = 'succeeded' WHERE id = $1")
        .bind(&intent.id)
        .execute(&state.db)
        .await?;

    tracing::info!(%order_id, order_number, intent_id = %intent.id, "order placed");
    publish_event(&state, DomainEvent::OrderPlaced { order_id, total }).await;
    Ok(StatusCode::OK)
}
