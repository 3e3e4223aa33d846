pub mod api;
pub mod config;
pub mod db;
pub mod middleware;
pub mod utils;

use axum::routing::get;
use axum::{Json, Router};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api::admin::{secure_admin_routes, AdminDoc};
use crate::api::auth::{auth_routes, secure_auth_routes, AuthDoc};
use crate::api::health::health_routes;
use crate::api::parking::{parking_routes, ParkingDoc};
use crate::api::report::{report_routes, secure_report_routes, ReportDoc};
use crate::api::review::{review_routes, secure_review_routes, ReviewDoc};
use crate::api::vendor::{secure_vendor_routes, vendor_routes, VendorDoc};
use crate::api::volunteer::{volunteer_routes, VolunteerDoc};
use crate::middleware::auth::require_admin;

/// Combined OpenAPI document for the whole service.
pub fn openapi_doc() -> utoipa::openapi::OpenApi {
    let mut doc = AuthDoc::openapi();
    doc.merge(VendorDoc::openapi());
    doc.merge(VolunteerDoc::openapi());
    doc.merge(ParkingDoc::openapi());
    doc.merge(ReviewDoc::openapi());
    doc.merge(ReportDoc::openapi());
    doc.merge(AdminDoc::openapi());
    doc
}

/// Builds the full application router over the given pool. Public routes and
/// the admin-gated routes are merged under `/api`; the gate re-checks the
/// account on every request.
pub fn app(pool: SqlitePool) -> Router {
    let public = Router::new()
        .merge(auth_routes())
        .merge(vendor_routes())
        .merge(volunteer_routes())
        .merge(parking_routes())
        .merge(review_routes())
        .merge(report_routes());

    let secured = Router::new()
        .merge(secure_auth_routes())
        .merge(secure_vendor_routes())
        .merge(secure_review_routes())
        .merge(secure_report_routes())
        .merge(secure_admin_routes())
        .route_layer(axum::middleware::from_fn_with_state(
            pool.clone(),
            require_admin,
        ));

    Router::new()
        .merge(health_routes())
        .nest("/api", public.merge(secured))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(openapi_doc()) }),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(pool)
}
