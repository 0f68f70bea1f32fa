use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde_json::{json, Value};
use sqlx::FromRow;

use crate::auth::{encode_claims, hash_password, verify_password, Claims};
use crate::config;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::models::admin::{AdminResponse, CreateRequest, LoginRequest};
use crate::AppState;

#[derive(FromRow)]
struct AdminAuthRow {
    id: i32,
    name: String,
    email: String,
    password_hash: String,
    is_admin: bool,
}

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AdminResponse>, ApiError> {
    req.validate()?;

    let row: Option<AdminAuthRow> = sqlx::query_as(
        "SELECT id, name, email, password_hash, is_admin FROM admins WHERE email = $1",
    )
    .bind(&req.email)
    .fetch_optional(&state.pool)
    .await?;

    let Some(row) = row else {
        return Err(ApiError::unauthorized("invalid credentials"));
    };

    if !verify_password(&req.password, &row.password_hash) {
        return Err(ApiError::unauthorized("invalid credentials"));
    }

    let secret = &config::config().security.jwt_secret;
    let token = encode_claims(&Claims::for_admin(row.id, &row.email, row.is_admin), secret)
        .map_err(|e| ApiError::internal("failed to issue token", e))?;

    Ok(Json(AdminResponse {
        id: row.id,
        name: row.name,
        email: row.email,
        is_admin: row.is_admin,
        token,
    }))
}

/// POST /api/admin/accounts (admin only)
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    req.validate()?;

    let password_hash = hash_password(&req.password)
        .map_err(|e| ApiError::internal("failed to hash password", e))?;

    let (id, created_at): (i32, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        r#"
        INSERT INTO admins (name, email, password_hash, is_admin)
        VALUES ($1, $2, $3, $4)
        RETURNING id, created_at
        "#,
    )
    .bind(&req.name)
    .bind(&req.email)
    .bind(&password_hash)
    .bind(req.is_admin)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(admin_id = id, "created administrator account");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "name": req.name,
            "email": req.email,
            "is_admin": req.is_admin,
            "created_at": created_at,
        })),
    ))
}

/// GET /api/admin/dashboard
pub async fn dashboard(Extension(user): Extension<AuthUser>) -> Json<Value> {
    Json(json!({
        "message": "welcome to the admin panel",
        "email": user.email,
        "is_admin": user.is_admin,
    }))
}

/// DELETE /api/admin/accounts/:id
///
/// The one endpoint with business rules beyond plain CRUD: no deleting
/// yourself, and superior admins (`is_admin = true`) are untouchable.
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    if user.id == id {
        return Err(ApiError::forbidden(
            "you cannot delete your own administrator account",
        ));
    }

    let target: Option<(bool,)> = sqlx::query_as("SELECT is_admin FROM admins WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;

    let Some((target_is_superior,)) = target else {
        return Err(ApiError::not_found("administrator not found"));
    };

    if target_is_superior {
        return Err(ApiError::forbidden("a superior administrator cannot be deleted"));
    }

    let result = sqlx::query("DELETE FROM admins WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("administrator not found or already deleted"));
    }

    tracing::info!(admin_id = id, deleted_by = user.id, "deleted administrator");

    Ok(Json(json!({ "message": "administrator deleted" })))
}
