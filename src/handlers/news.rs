use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::models::news::{NewsPost, NewsRequest};
use crate::AppState;

const COLUMNS: &str = "id, title, subtitle, body, author, published_at";

/// POST /api/news (staff)
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewsRequest>,
) -> Result<(StatusCode, Json<NewsPost>), ApiError> {
    req.validate()?;

    let post: NewsPost = sqlx::query_as(&format!(
        r#"
        INSERT INTO news (title, subtitle, body, author)
        VALUES ($1, $2, $3, $4)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(&req.title)
    .bind(&req.subtitle)
    .bind(&req.body)
    .bind(&req.author)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/news - newest first
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<NewsPost>>, ApiError> {
    let posts: Vec<NewsPost> =
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM news ORDER BY published_at DESC"))
            .fetch_all(&state.pool)
            .await?;

    Ok(Json(posts))
}

/// GET /api/news/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<NewsPost>, ApiError> {
    let post: Option<NewsPost> =
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM news WHERE id = $1"))
            .bind(id)
            .fetch_optional(&state.pool)
            .await?;

    post.map(Json)
        .ok_or_else(|| ApiError::not_found("news post not found"))
}

/// PUT /api/news/:id (staff)
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<NewsRequest>,
) -> Result<Json<Value>, ApiError> {
    req.validate()?;

    sqlx::query("UPDATE news SET title = $1, subtitle = $2, body = $3, author = $4 WHERE id = $5")
        .bind(&req.title)
        .bind(&req.subtitle)
        .bind(&req.body)
        .bind(&req.author)
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "message": "news post updated" })))
}

/// DELETE /api/news/:id (staff)
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    sqlx::query("DELETE FROM news WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(Json(json!({ "message": "news post deleted" })))
}
