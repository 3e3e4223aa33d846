mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{admin_token, send, setup};

#[tokio::test]
async fn register_returns_token_and_admin_info() {
    let (app, _pool) = setup().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "festadmin",
            "email": "admin@parishe.org",
            "password": "supersecret1",
            "name": "Festival Admin"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["data"]["token"].as_str().unwrap().len() > 20);
    assert_eq!(body["data"]["admin"]["username"], "festadmin");
    assert_eq!(body["data"]["admin"]["role"], "admin");
    // the hash must never appear on the wire
    assert!(body["data"]["admin"].get("passwordHash").is_none());
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let (app, _pool) = setup().await;
    admin_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "festadmin",
            "email": "other@parishe.org",
            "password": "supersecret1",
            "name": "Second Admin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn short_password_fails_validation() {
    let (app, _pool) = setup().await;
    let (status, _body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "festadmin",
            "email": "admin@parishe.org",
            "password": "short",
            "name": "Festival Admin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let (app, _pool) = setup().await;
    admin_token(&app).await;

    let (status, _body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "festadmin", "password": "wrongpassword" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_stamps_last_login() {
    let (app, _pool) = setup().await;
    admin_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "festadmin", "password": "supersecret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["admin"]["lastLogin"].is_string());
}

#[tokio::test]
async fn protected_route_requires_token() {
    let (app, _pool) = setup().await;
    let (status, _body) = send(&app, "GET", "/api/auth/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _body) =
        send(&app, "GET", "/api/auth/profile", Some("not-a-real-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_and_verify_return_current_admin() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;

    let (status, body) = send(&app, "GET", "/api/auth/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "admin@parishe.org");

    let (status, body) = send(&app, "GET", "/api/auth/verify", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "festadmin");
}

#[tokio::test]
async fn deactivated_admin_is_locked_out_despite_valid_token() {
    let (app, pool) = setup().await;
    let token = admin_token(&app).await;

    sqlx::query("UPDATE admins SET is_active = 0 WHERE username = 'festadmin'")
        .execute(&pool)
        .await
        .unwrap();

    let (status, _body) = send(&app, "GET", "/api/admin/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
