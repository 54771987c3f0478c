//! Product catalog CRUD

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::auth::AdminUser;
use super::error::ApiError;
use super::{publish_event, AppState};
use crate::domain::aggregates::{NewProduct, Product};
use crate::domain::events::DomainEvent;

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY id")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(&id)
        .fetch_optional(&state.db)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))
}

pub async fn create_product(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(req): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    req.validate()?;
    let id = req
        .id
        .clone()
        .unwrap_or_else(|| format!("P-{:08}", rand::random::<u32>()));

    let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM products WHERE id = $1")
        .bind(&id)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(ApiError::Conflict("Product id already in use".to_string()));
    }

    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (id, name, price, description, image, category, rating) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(&id)
    .bind(&req.name)
    .bind(req.price)
    .bind(&req.description)
    .bind(&req.image)
    .bind(&req.category)
    .bind(req.rating)
    .fetch_one(&state.db)
    .await?;

    publish_event(&state, DomainEvent::ProductCreated { product_id: id }).await;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
    Json(req): Json<NewProduct>,
) -> Result<Json<Product>, ApiError> {
    req.validate()?;
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET name = $2, price = $3, description = $4, image = $5, \
         category = $6, rating = $7, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(&id)
    .bind(&req.name)
    .bind(req.price)
    .bind(&req.description)
    .bind(&req.image)
    .bind(&req.category)
    .bind(req.rating)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    publish_event(&state, DomainEvent::ProductUpdated { product_id: id }).await;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(&id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Product not found".to_string()));
    }
    publish_event(&state, DomainEvent::ProductDeleted { product_id: id }).await;
    Ok(StatusCode::NO_CONTENT)
}
