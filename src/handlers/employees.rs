use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::FromRow;

use crate::auth::{encode_claims, hash_password, verify_password, Claims};
use crate::config;
use crate::error::ApiError;
use crate::models::employee::{Employee, EmployeeResponse, LoginRequest, RegisterRequest};
use crate::AppState;

#[derive(FromRow)]
struct EmployeeAuthRow {
    id: i32,
    name: String,
    role: String,
    email: String,
    password_hash: String,
}

/// POST /api/employees/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), ApiError> {
    req.validate()?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employees WHERE email = $1")
        .bind(&req.email)
        .fetch_one(&state.pool)
        .await?;

    if count > 0 {
        return Err(ApiError::validation("email already registered"));
    }

    let password_hash = hash_password(&req.password)
        .map_err(|e| ApiError::internal("failed to hash password", e))?;

    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO employees (name, role, email, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&req.name)
    .bind(&req.role)
    .bind(&req.email)
    .bind(&password_hash)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(employee_id = id, role = %req.role, "registered employee");

    let token = issue_employee_token(id, &req.email, &req.role)?;

    Ok((
        StatusCode::CREATED,
        Json(EmployeeResponse {
            id,
            name: req.name,
            role: req.role,
            email: req.email,
            token: Some(token),
        }),
    ))
}

/// POST /api/employees/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    req.validate()?;

    let row: Option<EmployeeAuthRow> = sqlx::query_as(
        "SELECT id, name, role, email, password_hash FROM employees WHERE email = $1",
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

    let token = issue_employee_token(row.id, &row.email, &row.role)?;

    Ok(Json(EmployeeResponse {
        id: row.id,
        name: row.name,
        role: row.role,
        email: row.email,
        token: Some(token),
    }))
}

/// GET /api/employees (staff)
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, ApiError> {
    let employees: Vec<Employee> =
        sqlx::query_as("SELECT id, name, role, email, created_at FROM employees ORDER BY name")
            .fetch_all(&state.pool)
            .await?;

    Ok(Json(employees))
}

fn issue_employee_token(id: i32, email: &str, role: &str) -> Result<String, ApiError> {
    let secret = &config::config().security.jwt_secret;
    encode_claims(&Claims::for_employee(id, email, role), secret)
        .map_err(|e| ApiError::internal("failed to issue token", e))
}
