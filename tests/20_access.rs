mod common;

use anyhow::Result;
use axum::http::StatusCode;
use tower::ServiceExt;

#[tokio::test]
async fn customer_cannot_reach_staff_routes() -> Result<()> {
    let app = common::test_app();

    let res = app
        .oneshot(common::get_with_token("/api/users", &common::user_token()))
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn employee_without_admin_role_cannot_reach_staff_routes() -> Result<()> {
    let app = common::test_app();

    let res = app
        .oneshot(common::get_with_token(
            "/api/users",
            &common::employee_token("support"),
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn staff_routes_without_token_are_unauthorized() -> Result<()> {
    let app = common::test_app();

    let res = app.oneshot(common::get("/api/users")).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn customer_cannot_reach_admin_dashboard() -> Result<()> {
    let app = common::test_app();

    let res = app
        .oneshot(common::get_with_token(
            "/api/admin/dashboard",
            &common::user_token(),
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn admin_role_employee_is_not_an_administrator() -> Result<()> {
    let app = common::test_app();

    // Staff gate and administrator gate check different claims; holding
    // the employee "admin" role must not open the administrator surface.
    let res = app
        .oneshot(common::get_with_token(
            "/api/admin/dashboard",
            &common::employee_token("admin"),
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn administrator_reaches_dashboard() -> Result<()> {
    let app = common::test_app();

    let res = app
        .oneshot(common::get_with_token(
            "/api/admin/dashboard",
            &common::admin_token(),
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await;
    assert_eq!(body["email"], "root@example.com");
    Ok(())
}

#[tokio::test]
async fn administrator_cannot_delete_own_account() -> Result<()> {
    let app = common::test_app();

    // admin_token carries id 3; the self-delete check runs before any
    // database access
    let res = app
        .oneshot(common::delete_with_token(
            "/api/admin/accounts/3",
            &common::admin_token(),
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body = common::body_json(res).await;
    assert_eq!(body["error"], true);
    Ok(())
}

#[tokio::test]
async fn catalog_reads_are_public_but_writes_are_gated() -> Result<()> {
    // A write without a token has to fail before the handler runs.
    let app = common::test_app();
    let res = app
        .oneshot(common::post_json(
            "/api/products",
            &serde_json::json!({ "name": "Widget", "quantity": 1, "price": 9.99, "on_offer": false }),
        ))
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
