use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tower::ServiceExt;

use festival_backend::db::pool::MIGRATOR;

/// Fresh in-memory database plus the full router over it. A single
/// connection keeps every query in the test on the same in-memory file.
pub async fn setup() -> (Router, SqlitePool) {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("connect options")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory database");
    MIGRATOR.run(&pool).await.expect("migrations");
    (festival_backend::app(pool.clone()), pool)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    // rejections produced before a handler runs are plain text, not JSON
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

/// Registers a back-office admin and returns a usable bearer token.
pub async fn admin_token(app: &Router) -> String {
    let (status, body) = send(
        app,
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
    body["data"]["token"].as_str().unwrap().to_string()
}

pub async fn create_vendor(app: &Router, email: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/vendors",
        None,
        Some(json!({
            "name": "Manjunath",
            "businessName": "Manju Groundnuts",
            "contactNumber": "9876543210",
            "email": email,
            "productCategory": "Groundnuts"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_i64().unwrap()
}

pub async fn create_slot(app: &Router, token: &str, slot_number: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/parking",
        Some(token),
        Some(json!({
            "slotNumber": slot_number,
            "zone": "Zone A",
            "vehicleType": "Four Wheeler"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_i64().unwrap()
}
