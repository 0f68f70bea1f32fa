use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::models::quote::{CreateQuoteRequest, QuoteRequest, StatusUpdateRequest, STATUS_PENDING};
use crate::AppState;

const COLUMNS: &str = "id, client_name, client_email, phone, description, service_name, \
                       status, created_at, updated_at";

/// POST /api/quotes
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateQuoteRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    req.validate()?;

    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO quote_requests (client_name, client_email, phone, description, service_name, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(&req.client_name)
    .bind(&req.client_email)
    .bind(&req.phone)
    .bind(&req.description)
    .bind(&req.service_name)
    .bind(STATUS_PENDING)
    .fetch_one(&state.pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "quote request created", "id": id })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub email: Option<String>,
}

/// GET /api/quotes (staff) - newest first, optional status/email filters.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<QuoteRequest>>, ApiError> {
    let mut sql = format!("SELECT {COLUMNS} FROM quote_requests");
    let mut clauses = Vec::new();
    let mut args = Vec::new();

    if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
        args.push(status.to_string());
        clauses.push(format!("status = ${}", args.len()));
    }
    if let Some(email) = query.email.as_deref().filter(|s| !s.is_empty()) {
        args.push(email.to_string());
        clauses.push(format!("client_email = ${}", args.len()));
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY created_at DESC");

    let mut q = sqlx::query_as(&sql);
    for arg in &args {
        q = q.bind(arg);
    }

    let quotes: Vec<QuoteRequest> = q.fetch_all(&state.pool).await?;
    Ok(Json(quotes))
}

/// GET /api/quotes/:id (staff)
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<QuoteRequest>, ApiError> {
    let quote: Option<QuoteRequest> =
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM quote_requests WHERE id = $1"))
            .bind(id)
            .fetch_optional(&state.pool)
            .await?;

    quote
        .map(Json)
        .ok_or_else(|| ApiError::not_found("quote request not found"))
}

/// PUT /api/quotes/:id/status (staff)
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<Value>, ApiError> {
    req.validate()?;

    sqlx::query("UPDATE quote_requests SET status = $1, updated_at = NOW() WHERE id = $2")
        .bind(&req.status)
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "message": "quote status updated" })))
}

/// DELETE /api/quotes/:id (staff)
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    sqlx::query("DELETE FROM quote_requests WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "message": "quote request deleted" })))
}
