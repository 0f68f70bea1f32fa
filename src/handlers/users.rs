use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::FromRow;

use crate::auth::{encode_claims, hash_password, verify_password, Claims};
use crate::config;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::models::user::{
    LoginRequest, LoginResponse, RegisterRequest, UpdateEmailRequest, UpdatePhoneRequest, User,
};
use crate::AppState;

/// Row shape for handlers that need the stored hash.
#[derive(FromRow)]
struct UserAuthRow {
    id: i32,
    full_name: String,
    email: String,
    password_hash: String,
    phone: Option<String>,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    req.validate()?;

    let password_hash = hash_password(&req.password)
        .map_err(|e| ApiError::internal("failed to hash password", e))?;

    // Unique index on email turns races into a 409 via the sqlx mapping
    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (full_name, email, password_hash, phone)
        VALUES ($1, $2, $3, $4)
        RETURNING id, full_name, email, phone
        "#,
    )
    .bind(&req.full_name)
    .bind(&req.email)
    .bind(&password_hash)
    .bind(&req.phone)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(user_id = user.id, "registered user");

    let token = issue_user_token(user.id, &user.email)?;

    Ok((
        StatusCode::CREATED,
        Json(LoginResponse {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            token,
            phone: user.phone,
        }),
    ))
}

/// POST /api/auth/login
///
/// Unknown email and wrong password return the same response on purpose.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    req.validate()?;

    let row: Option<UserAuthRow> = sqlx::query_as(
        "SELECT id, full_name, email, password_hash, phone FROM users WHERE email = $1",
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

    let token = issue_user_token(row.id, &row.email)?;

    Ok(Json(LoginResponse {
        id: row.id,
        full_name: row.full_name,
        email: row.email,
        token,
        phone: row.phone,
    }))
}

/// GET /api/auth/profile - echo of the verified claims
pub async fn profile(Extension(user): Extension<AuthUser>) -> Json<Value> {
    let kind = if user.is_admin.is_some() {
        "admin"
    } else if user.role.is_some() {
        "employee"
    } else {
        "user"
    };

    Json(json!({
        "id": user.id,
        "email": user.email,
        "role": user.role,
        "type": kind,
    }))
}

/// PUT /api/auth/email
///
/// Re-authenticates with the current password and re-issues the token,
/// since the old one still carries the old email.
pub async fn update_email(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<UpdateEmailRequest>,
) -> Result<Json<Value>, ApiError> {
    req.validate()?;

    if req.current_email != user.email {
        return Err(ApiError::unauthorized(
            "current email does not match the logged-in account",
        ));
    }

    let row: Option<UserAuthRow> = sqlx::query_as(
        "SELECT id, full_name, email, password_hash, phone FROM users WHERE email = $1",
    )
    .bind(&user.email)
    .fetch_optional(&state.pool)
    .await?;

    let Some(row) = row else {
        return Err(ApiError::not_found("user not found"));
    };

    if !verify_password(&req.password, &row.password_hash) {
        return Err(ApiError::unauthorized("incorrect password"));
    }

    let (taken,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1 AND id != $2")
            .bind(&req.new_email)
            .bind(row.id)
            .fetch_one(&state.pool)
            .await?;

    if taken > 0 {
        return Err(ApiError::conflict(
            "this email is already in use by another account",
        ));
    }

    sqlx::query("UPDATE users SET email = $1, updated_at = NOW() WHERE id = $2")
        .bind(&req.new_email)
        .bind(row.id)
        .execute(&state.pool)
        .await?;

    let token = issue_user_token(row.id, &req.new_email)?;

    Ok(Json(json!({
        "message": "email updated; use the new email for future logins",
        "new_email": req.new_email,
        "token": token,
    })))
}

/// PUT /api/auth/phone
pub async fn update_phone(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<UpdatePhoneRequest>,
) -> Result<Json<Value>, ApiError> {
    req.validate()?;

    let row: Option<UserAuthRow> = sqlx::query_as(
        "SELECT id, full_name, email, password_hash, phone FROM users WHERE email = $1",
    )
    .bind(&user.email)
    .fetch_optional(&state.pool)
    .await?;

    let Some(row) = row else {
        return Err(ApiError::not_found("user not found"));
    };

    if !verify_password(&req.password, &row.password_hash) {
        return Err(ApiError::unauthorized("incorrect password"));
    }

    // When the caller supplies their current phone it has to match the
    // stored one; an empty stored phone means this is the first phone.
    if let Some(current) = req.current_phone.as_deref().filter(|p| !p.is_empty()) {
        if row.phone.as_deref().unwrap_or("") != current {
            return Err(ApiError::conflict(
                "the current phone supplied does not match the one on record",
            ));
        }
    }

    sqlx::query("UPDATE users SET phone = $1, updated_at = NOW() WHERE id = $2")
        .bind(&req.new_phone)
        .bind(row.id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({
        "message": "phone updated",
        "new_phone": req.new_phone,
    })))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Free-text search over email and phone.
    pub search: Option<String>,
}

/// GET /api/users (staff)
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users: Vec<User> = match query.search.as_deref().filter(|s| !s.is_empty()) {
        Some(term) => {
            let pattern = format!("%{}%", term.to_lowercase());
            sqlx::query_as(
                r#"
                SELECT id, full_name, email, phone FROM users
                WHERE LOWER(email) LIKE $1 OR LOWER(COALESCE(phone, '')) LIKE $1
                ORDER BY full_name ASC
                "#,
            )
            .bind(pattern)
            .fetch_all(&state.pool)
            .await?
        }
        None => {
            sqlx::query_as("SELECT id, full_name, email, phone FROM users ORDER BY full_name ASC")
                .fetch_all(&state.pool)
                .await?
        }
    };

    Ok(Json(users))
}

fn issue_user_token(id: i32, email: &str) -> Result<String, ApiError> {
    let secret = &config::config().security.jwt_secret;
    encode_claims(&Claims::for_user(id, email), secret)
        .map_err(|e| ApiError::internal("failed to issue token", e))
}
