use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::models::quote::QuoteRequest;
use crate::models::support::{StatusUpdateRequest, SupportTicket, TicketRequest, STATUS_OPEN};
use crate::AppState;

const COLUMNS: &str =
    "id, name, email, message, status, interaction_type, customer_email, created_at";

/// POST /api/support
///
/// Open to visitors; when the caller carries a valid token the ticket is
/// linked to their account email.
pub async fn create(
    State(state): State<AppState>,
    user: Option<Extension<AuthUser>>,
    Json(req): Json<TicketRequest>,
) -> Result<(StatusCode, Json<SupportTicket>), ApiError> {
    req.validate()?;

    let interaction_type = req
        .interaction_type
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or("support");

    let ticket = insert_ticket(
        &state,
        &req.name,
        &req.email,
        &req.message,
        interaction_type,
        user.as_ref().map(|u| u.email.as_str()),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

pub(crate) async fn insert_ticket(
    state: &AppState,
    name: &str,
    email: &str,
    message: &str,
    interaction_type: &str,
    customer_email: Option<&str>,
) -> Result<SupportTicket, ApiError> {
    let ticket: SupportTicket = sqlx::query_as(&format!(
        r#"
        INSERT INTO support_tickets (name, email, message, status, interaction_type, customer_email)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(name)
    .bind(email)
    .bind(message)
    .bind(STATUS_OPEN)
    .bind(interaction_type)
    .bind(customer_email)
    .fetch_one(&state.pool)
    .await?;

    Ok(ticket)
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub interaction_type: Option<String>,
    pub customer_email: Option<String>,
}

/// GET /api/support (staff) - newest first, conjunctive filters.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<SupportTicket>>, ApiError> {
    let mut sql = format!("SELECT {COLUMNS} FROM support_tickets");
    let mut clauses = Vec::new();
    let mut args = Vec::new();

    for (column, value) in [
        ("status", &query.status),
        ("interaction_type", &query.interaction_type),
        ("customer_email", &query.customer_email),
    ] {
        if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
            args.push(v.to_string());
            clauses.push(format!("{column} = ${}", args.len()));
        }
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

    let tickets: Vec<SupportTicket> = q.fetch_all(&state.pool).await?;
    Ok(Json(tickets))
}

/// GET /api/support/mine - the caller's tickets and quote requests merged
/// into one feed, the way the account page shows them.
pub async fn list_own_interactions(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let mut interactions: Vec<Value> = Vec::new();

    let tickets: Vec<SupportTicket> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM support_tickets WHERE customer_email = $1 ORDER BY created_at DESC"
    ))
    .bind(&user.email)
    .fetch_all(&state.pool)
    .await?;

    for ticket in tickets {
        interactions.push(serde_json::to_value(ticket).unwrap_or(Value::Null));
    }

    let quotes: Vec<QuoteRequest> = sqlx::query_as(
        r#"
        SELECT id, client_name, client_email, phone, description, service_name,
               status, created_at, updated_at
        FROM quote_requests
        WHERE client_email = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(&user.email)
    .fetch_all(&state.pool)
    .await?;

    for quote in quotes {
        // Reshaped to the ticket vocabulary so the feed renders uniformly
        interactions.push(json!({
            "id": quote.id,
            "name": quote.client_name,
            "email": quote.client_email,
            "message": quote.description,
            "status": quote.status,
            "interaction_type": "quote",
            "service_name": quote.service_name,
            "phone": quote.phone,
            "created_at": quote.created_at,
            "updated_at": quote.updated_at,
        }));
    }

    Ok(Json(interactions))
}

/// GET /api/support/:id (staff)
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SupportTicket>, ApiError> {
    let ticket: Option<SupportTicket> =
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM support_tickets WHERE id = $1"))
            .bind(id)
            .fetch_optional(&state.pool)
            .await?;

    ticket
        .map(Json)
        .ok_or_else(|| ApiError::not_found("support ticket not found"))
}

/// PUT /api/support/:id/status (staff)
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<Value>, ApiError> {
    req.validate()?;

    sqlx::query("UPDATE support_tickets SET status = $1 WHERE id = $2")
        .bind(&req.status)
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "message": "ticket status updated" })))
}

/// DELETE /api/support/:id (staff)
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    sqlx::query("DELETE FROM support_tickets WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "message": "support ticket deleted" })))
}
