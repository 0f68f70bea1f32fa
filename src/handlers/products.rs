use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::models::product::{Product, ProductRequest};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// `?offers=true` narrows the catalog to items on offer.
    pub offers: Option<String>,
}

const COLUMNS: &str = "id, name, quantity, price, on_offer, details, image_url";

/// POST /api/products (staff)
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    req.validate()?;

    let product: Product = sqlx::query_as(&format!(
        r#"
        INSERT INTO products (name, quantity, price, on_offer, details, image_url)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(&req.name)
    .bind(req.quantity)
    .bind(req.price)
    .bind(req.on_offer)
    .bind(&req.details)
    .bind(&req.image_url)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/products
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let offers_only = query.offers.as_deref() == Some("true");

    let sql = if offers_only {
        format!("SELECT {COLUMNS} FROM products WHERE on_offer = true ORDER BY name")
    } else {
        format!("SELECT {COLUMNS} FROM products ORDER BY name")
    };

    let products: Vec<Product> = sqlx::query_as(&sql).fetch_all(&state.pool).await?;
    Ok(Json(products))
}

/// GET /api/products/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>, ApiError> {
    let product: Option<Product> =
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM products WHERE id = $1"))
            .bind(id)
            .fetch_optional(&state.pool)
            .await?;

    product
        .map(Json)
        .ok_or_else(|| ApiError::not_found("product not found"))
}

/// PUT /api/products/:id (staff) - full-record replace
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<Value>, ApiError> {
    req.validate()?;

    sqlx::query(
        r#"
        UPDATE products
        SET name = $1, quantity = $2, price = $3, on_offer = $4, details = $5, image_url = $6
        WHERE id = $7
        "#,
    )
    .bind(&req.name)
    .bind(req.quantity)
    .bind(req.price)
    .bind(req.on_offer)
    .bind(&req.details)
    .bind(&req.image_url)
    .bind(id)
    .execute(&state.pool)
    .await?;

    Ok(Json(json!({ "message": "product updated" })))
}

/// DELETE /api/products/:id (staff)
///
/// Fails with a conflict while any order item still references the product.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "message": "product deleted" })))
}
