//! User directory

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::auth::{AdminUser, AuthUser};
use super::error::ApiError;
use super::AppState;
use crate::domain::aggregates::{NotificationPrefs, Role, UserProfile};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: String,
    pub role: String,
    pub notify_orders: bool,
    pub notify_promotions: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wire profile from a database row. The password hash never leaves here.
pub fn profile_from_row(row: UserRow) -> UserProfile {
    UserProfile {
        id: row.id.to_string(),
        name: row.name,
        email: row.email,
        avatar: row.avatar,
        role: Role::parse(&row.role),
        notifications: NotificationPrefs {
            orders: row.notify_orders,
            promotions: row.notify_promotions,
        },
    }
}

fn admin_or_self(claims: &super::auth::Claims, id: Uuid) -> Result<(), ApiError> {
    if claims.role.is_admin() || claims.sub == id.to_string() {
        return Ok(());
    }
    Err(ApiError::Forbidden("Admin access required".to_string()))
}

pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<Vec<UserProfile>>, ApiError> {
    let rows = sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY created_at")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(profile_from_row).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, ApiError> {
    admin_or_self(&claims, id)?;
    let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    Ok(Json(profile_from_row(row)))
}

/// Partial update; absent fields keep their stored values. Role changes are
/// admin-only regardless of whose profile is being edited.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub role: Option<Role>,
    pub notifications: Option<NotificationPrefs>,
}

pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    admin_or_self(&claims, id)?;
    if req.role.is_some() && !claims.role.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }
    let row = sqlx::query_as::<_, UserRow>(
        "UPDATE users SET name = COALESCE($2, name), avatar = COALESCE($3, avatar), \
         role = COALESCE($4, role), notify_orders = COALESCE($5, notify_orders), \
         notify_promotions = COALESCE($6, notify_promotions), updated_at = NOW() \
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(req.name)
    .bind(req.avatar)
    .bind(req.role.map(|r| r.as_str().to_string()))
    .bind(req.notifications.map(|n| n.orders))
    .bind(req.notifications.map(|n| n.promotions))
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    Ok(Json(profile_from_row(row)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("User not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_row_maps_role_and_prefs() {
        let row = UserRow {
            id: Uuid::new_v4(),
            name: "Alice Admin".into(),
            email: "alice.admin@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            avatar: String::new(),
            role: "admin".into(),
            notify_orders: true,
            notify_promotions: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let profile = profile_from_row(row);
        assert_eq!(profile.role, Role::Admin);
        assert!(profile.notifications.orders);
        assert!(!profile.notifications.promotions);
        assert!(!serde_json::to_string(&profile).unwrap().contains("argon2id"));
    }
}
