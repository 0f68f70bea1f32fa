use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::models::service::{Service, ServiceRequest};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub offers: Option<String>,
}

const COLUMNS: &str = "id, name, price, on_offer, details";

/// POST /api/services (staff)
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<ServiceRequest>,
) -> Result<(StatusCode, Json<Service>), ApiError> {
    req.validate()?;

    let service: Service = sqlx::query_as(&format!(
        r#"
        INSERT INTO services (name, price, on_offer, details)
        VALUES ($1, $2, $3, $4)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(&req.name)
    .bind(req.price)
    .bind(req.on_offer)
    .bind(&req.details)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(service)))
}

/// GET /api/services
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Service>>, ApiError> {
    let offers_only = query.offers.as_deref() == Some("true");

    let sql = if offers_only {
        format!("SELECT {COLUMNS} FROM services WHERE on_offer = true ORDER BY name")
    } else {
        format!("SELECT {COLUMNS} FROM services ORDER BY name")
    };

    let services: Vec<Service> = sqlx::query_as(&sql).fetch_all(&state.pool).await?;
    Ok(Json(services))
}

/// GET /api/services/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Service>, ApiError> {
    let service: Option<Service> =
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM services WHERE id = $1"))
            .bind(id)
            .fetch_optional(&state.pool)
            .await?;

    service
        .map(Json)
        .ok_or_else(|| ApiError::not_found("service not found"))
}

/// PUT /api/services/:id (staff)
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<ServiceRequest>,
) -> Result<Json<Value>, ApiError> {
    req.validate()?;

    sqlx::query(
        "UPDATE services SET name = $1, price = $2, on_offer = $3, details = $4 WHERE id = $5",
    )
    .bind(&req.name)
    .bind(req.price)
    .bind(req.on_offer)
    .bind(&req.details)
    .bind(id)
    .execute(&state.pool)
    .await?;

    Ok(Json(json!({ "message": "service updated" })))
}

/// DELETE /api/services/:id (staff)
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "message": "service deleted" })))
}
