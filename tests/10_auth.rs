mod common;

use anyhow::Result;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use tower::ServiceExt;

use storefront_api::auth::{encode_claims, Claims};

#[tokio::test]
async fn profile_without_token_is_unauthorized() -> Result<()> {
    let app = common::test_app();

    let res = app.oneshot(common::get("/api/auth/profile")).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = common::body_json(res).await;
    assert_eq!(body["error"], true);
    Ok(())
}

#[tokio::test]
async fn garbage_token_is_unauthorized() -> Result<()> {
    let app = common::test_app();

    let res = app
        .oneshot(common::get_with_token("/api/auth/profile", "not.a.token"))
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn token_signed_with_wrong_secret_is_unauthorized() -> Result<()> {
    let app = common::test_app();

    let forged = encode_claims(&Claims::for_user(1, "a@b.com"), "some-other-secret")?;
    let res = app
        .oneshot(common::get_with_token("/api/auth/profile", &forged))
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn expired_token_is_unauthorized() -> Result<()> {
    let app = common::test_app();

    let mut claims = Claims::for_user(1, "a@b.com");
    claims.iat = (Utc::now() - Duration::hours(9)).timestamp();
    claims.exp = (Utc::now() - Duration::hours(1)).timestamp();
    let stale = encode_claims(&claims, common::TEST_SECRET)?;

    let res = app
        .oneshot(common::get_with_token("/api/auth/profile", &stale))
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn valid_token_reads_profile() -> Result<()> {
    let app = common::test_app();

    let res = app
        .oneshot(common::get_with_token(
            "/api/auth/profile",
            &common::user_token(),
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await;
    assert_eq!(body["email"], "customer@example.com");
    assert_eq!(body["id"], 1);
    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() -> Result<()> {
    let app = common::test_app();

    let req = axum::http::Request::builder()
        .uri("/api/auth/profile")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())?;

    let res = app.oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
