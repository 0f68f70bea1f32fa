mod common;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn root_describes_the_api() -> Result<()> {
    let app = common::test_app();

    let res = app.oneshot(common::get("/")).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await;
    assert_eq!(body["name"], "Storefront API");
    assert!(body["endpoints"].is_object());
    Ok(())
}

#[tokio::test]
async fn unknown_route_echoes_method_and_path() -> Result<()> {
    let app = common::test_app();

    let res = app.oneshot(common::get("/api/nonexistent")).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = common::body_json(res).await;
    assert_eq!(body["error"], true);
    assert_eq!(body["requested_path"], "/api/nonexistent");
    assert_eq!(body["method"], "GET");
    Ok(())
}

#[tokio::test]
async fn quote_with_empty_fields_is_rejected() -> Result<()> {
    let app = common::test_app();

    let res = app
        .oneshot(common::post_json(
            "/api/quotes",
            &json!({
                "client_name": "",
                "client_email": "",
                "phone": "",
                "description": "",
            }),
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn registration_with_malformed_email_is_rejected() -> Result<()> {
    let app = common::test_app();

    let res = app
        .oneshot(common::post_json(
            "/api/auth/register",
            &json!({
                "full_name": "Ana Souza",
                "email": "not-an-email",
                "password": "secret123",
            }),
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn chat_with_empty_message_is_rejected() -> Result<()> {
    let app = common::test_app();

    let res = app
        .oneshot(common::post_json("/api/chat", &json!({ "message": "  " })))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn chat_without_configured_client_fails() -> Result<()> {
    // test_app builds its state without a chat client
    let app = common::test_app();

    let res = app
        .oneshot(common::post_json("/api/chat", &json!({ "message": "hi" })))
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = common::body_json(res).await;
    assert_eq!(body["error"], true);
    Ok(())
}

#[tokio::test]
async fn preflight_allows_the_configured_origin() -> Result<()> {
    let app = common::test_app();

    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/products")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())?;

    let res = app.oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
    Ok(())
}
