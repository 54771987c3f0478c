//! Domain events
//!
//! Published by the backend to NATS subjects under `civicconnect.events.*`
//! when an event bus is configured; skipped otherwise.

use crate::domain::aggregates::OrderStatus;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    ProductCreated { product_id: String },
    ProductUpdated { product_id: String },
    ProductDeleted { product_id: String },
    OrderPlaced { order_id: Uuid, total: Decimal },
    OrderStatusChanged { order_id: Uuid, status: OrderStatus },
}

impl DomainEvent {
    pub fn subject(&self) -> &'static str {
        match self {
            Self::ProductCreated { .. } => "civicconnect.events.product.created",
            Self::ProductUpdated { .. } => "civicconnect.events.product.updated",
            Self::ProductDeleted { .. } => "civicconnect.events.product.deleted",
            Self::OrderPlaced { .. } => "civicconnect.events.order.placed",
            Self::OrderStatusChanged { .. } => "civicconnect.events.order.status",
        }
    }
}
