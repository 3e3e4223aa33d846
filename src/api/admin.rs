use axum::routing::{get, put};
use axum::Router;
use sqlx::SqlitePool;
use utoipa::OpenApi;

use crate::db::models::dashboard::{
    DashboardStats, FootfallAnalytics, HourCount, PendingApprovals, RecentActivities,
    RecentVendor, RecentVolunteer, ZoneCount,
};
use crate::db::models::vendor::VendorStatusUpdate;
use crate::db::models::volunteer::VolunteerStatusUpdate;
use crate::db::queries::admin::{
    get_dashboard_stats, get_footfall_analytics, get_pending_approvals, get_recent_activities,
    update_vendor_status, update_volunteer_status,
};

/// Back-office surface; every route here sits behind the admin token gate.
pub fn secure_admin_routes() -> Router<SqlitePool> {
    Router::new()
        .route("/admin/stats", get(get_dashboard_stats))
        .route("/admin/pending", get(get_pending_approvals))
        .route("/admin/activities", get(get_recent_activities))
        .route("/admin/footfall", get(get_footfall_analytics))
        .route("/admin/vendors/{id}/status", put(update_vendor_status))
        .route("/admin/volunteers/{id}/status", put(update_volunteer_status))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::db::queries::admin::get_dashboard_stats,
        crate::db::queries::admin::get_pending_approvals,
        crate::db::queries::admin::get_recent_activities,
        crate::db::queries::admin::get_footfall_analytics,
        crate::db::queries::admin::update_vendor_status,
        crate::db::queries::admin::update_volunteer_status,
    ),
    components(schemas(
        DashboardStats,
        PendingApprovals,
        RecentActivities,
        RecentVendor,
        RecentVolunteer,
        FootfallAnalytics,
        HourCount,
        ZoneCount,
        VendorStatusUpdate,
        VolunteerStatusUpdate,
    )),
    tags((name = "Admin", description = "Back-office dashboard and approvals"))
)]
pub struct AdminDoc;
