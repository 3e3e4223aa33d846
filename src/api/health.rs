use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use serde_json::json;
use sqlx::SqlitePool;

use crate::utils::api_response::ApiResponse;

pub fn health_routes() -> Router<SqlitePool> {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
}

async fn health() -> ApiResponse<serde_json::Value> {
    ApiResponse::success(
        StatusCode::OK,
        "Festival management API is running",
        json!({ "version": env!("CARGO_PKG_VERSION") }),
    )
}
