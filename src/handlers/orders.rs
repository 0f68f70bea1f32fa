use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::models::order::{
    CreateOrderRequest, Order, OrderItem, StatusUpdateRequest, STATUS_PROCESSING,
};
use crate::AppState;

const ORDER_COLUMNS: &str = "id, customer_email, status, delivery_address, shipping_type, \
                             shipping_cost, total, payment_method, delivery_estimate, created_at";

/// POST /api/orders
///
/// The one multi-statement unit of work in the system: header plus items
/// commit together or not at all. The customer email comes from the
/// verified token, never from the body.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    req.validate()?;

    let mut tx = state.pool.begin().await?;

    let (order_id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO orders (customer_email, status, delivery_address, shipping_type,
                            shipping_cost, total, payment_method, delivery_estimate)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(&user.email)
    .bind(STATUS_PROCESSING)
    .bind(&req.delivery_address)
    .bind(&req.shipping_type)
    .bind(req.shipping_cost)
    .bind(req.total)
    .bind(&req.payment_method)
    .bind(&req.delivery_estimate)
    .fetch_one(&mut *tx)
    .await?;

    for item in &req.items {
        // A bad product id trips the FK here and rolls back the header too
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, product_id, product_name, quantity, unit_price)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(order_id)
        .bind(item.product_id)
        .bind(&item.product_name)
        .bind(item.quantity)
        .bind(item.unit_price)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(order_id, customer = %user.email, items = req.items.len(), "created order");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "order created", "order_id": order_id })),
    ))
}

/// GET /api/orders - the caller's own orders, newest first, items attached.
pub async fn list_own(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let mut orders: Vec<Order> = sqlx::query_as(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE customer_email = $1 ORDER BY created_at DESC"
    ))
    .bind(&user.email)
    .fetch_all(&state.pool)
    .await?;

    attach_items(&state.pool, &mut orders).await?;
    Ok(Json(orders))
}

#[derive(Debug, Deserialize)]
pub struct StaffListQuery {
    pub status: Option<String>,
    pub customer_email: Option<String>,
}

/// GET /api/staff/orders - all orders with optional status/customer filters.
pub async fn list_all(
    State(state): State<AppState>,
    Query(query): Query<StaffListQuery>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let mut sql = format!("SELECT {ORDER_COLUMNS} FROM orders");
    let mut clauses = Vec::new();
    let mut args = Vec::new();

    if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
        args.push(status.to_string());
        clauses.push(format!("status = ${}", args.len()));
    }
    if let Some(email) = query.customer_email.as_deref().filter(|s| !s.is_empty()) {
        args.push(email.to_string());
        clauses.push(format!("customer_email = ${}", args.len()));
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

    let mut orders: Vec<Order> = q.fetch_all(&state.pool).await?;
    attach_items(&state.pool, &mut orders).await?;
    Ok(Json(orders))
}

/// PUT /api/orders/:id/status (staff)
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<Value>, ApiError> {
    req.validate()?;

    sqlx::query("UPDATE orders SET status = $1 WHERE id = $2")
        .bind(&req.status)
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "message": "order status updated" })))
}

/// DELETE /api/orders/:id (staff) - items go with it via ON DELETE CASCADE.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "message": "order deleted" })))
}

async fn attach_items(pool: &PgPool, orders: &mut [Order]) -> Result<(), ApiError> {
    for order in orders.iter_mut() {
        let items: Vec<OrderItem> = sqlx::query_as(
            r#"
            SELECT id, order_id, product_id, product_name, quantity, unit_price
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            "#,
        )
        .bind(order.id)
        .fetch_all(pool)
        .await?;

        order.items = items;
    }

    Ok(())
}
