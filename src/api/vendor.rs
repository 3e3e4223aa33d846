use axum::routing::{delete, get, post, put};
use axum::Router;
use sqlx::SqlitePool;
use utoipa::OpenApi;

use crate::db::models::vendor::{
    NewVendor, UpdateVendor, Vendor, VendorCategoryCount, VendorStats, VendorStatusCount,
};
use crate::db::queries::vendor::{
    create_vendor, delete_vendor, get_all_vendors, get_vendor, get_vendor_stats, update_vendor,
};

pub fn vendor_routes() -> Router<SqlitePool> {
    Router::new()
        .route("/vendors", get(get_all_vendors))
        .route("/vendors", post(create_vendor))
        .route("/vendors/stats", get(get_vendor_stats))
        .route("/vendors/{id}", get(get_vendor))
}

pub fn secure_vendor_routes() -> Router<SqlitePool> {
    Router::new()
        .route("/vendors/{id}", put(update_vendor))
        .route("/vendors/{id}", delete(delete_vendor))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::db::queries::vendor::get_all_vendors,
        crate::db::queries::vendor::get_vendor,
        crate::db::queries::vendor::create_vendor,
        crate::db::queries::vendor::update_vendor,
        crate::db::queries::vendor::delete_vendor,
        crate::db::queries::vendor::get_vendor_stats,
    ),
    components(schemas(Vendor, NewVendor, UpdateVendor, VendorStats, VendorStatusCount, VendorCategoryCount)),
    tags((name = "Vendors", description = "Vendor registration and management"))
)]
pub struct VendorDoc;
