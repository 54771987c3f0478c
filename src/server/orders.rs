//! Order directory

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::auth::AdminUser;
use super::error::ApiError;
use super::{publish_event, AppState};
use crate::domain::aggregates::{Order, OrderLine, OrderStatus};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::Money;

#[derive(Debug, sqlx::FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub order_number: String,
    pub user_id: Option<Uuid>,
    pub items: sqlx::types::Json<Vec<OrderLine>>,
    pub total: Money,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

fn order_from_row(row: OrderRow) -> Result<Order, ApiError> {
    let status = row
        .status
        .parse::<OrderStatus>()
        .map_err(ApiError::Internal)?;
    Ok(Order {
        id: row.id,
        order_number: row.order_number,
        user_id: row.user_id,
        items: row.items.0,
        total: row.total,
        status,
        created_at: row.created_at,
    })
}

pub async fn list_orders(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<Vec<Order>>, ApiError> {
    let rows = sqlx::query_as::<_, OrderRow>(
        "SELECT id, order_number, user_id, items, total, status, created_at \
         FROM orders ORDER BY created_at DESC",
    )
    .fetch_all(&state.db)
    .await?;
    let orders = rows
        .into_iter()
        .map(order_from_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(orders))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Advances an order's status. Transitions only move forward through
/// pending → processing → shipped → delivered.
pub async fn update_status(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    let row = sqlx::query_as::<_, OrderRow>(
        "SELECT id, order_number, user_id, items, total, status, created_at \
         FROM orders WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    let current = order_from_row(row)?;
    if !current.status.can_advance_to(req.status) {
        return Err(ApiError::Validation(format!(
            "cannot move order from {} to {}",
            current.status, req.status
        )));
    }

    let row = sqlx::query_as::<_, OrderRow>(
        "UPDATE orders SET status = $2 WHERE id = $1 \
         RETURNING id, order_number, user_id, items, total, status, created_at",
    )
    .bind(id)
    .bind(req.status.to_string())
    .fetch_one(&state.db)
    .await?;
    let updated = order_from_row(row)?;

    publish_event(
        &state,
        DomainEvent::OrderStatusChanged {
            order_id: id,
            status: updated.status,
        },
    )
    .await;
    Ok(Json(updated))
}
