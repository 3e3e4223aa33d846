use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::db::models::dashboard::{
    DashboardBreakdown, DashboardStats, FootfallAnalytics, FootfallCounts, FootfallPeriod,
    FootfallQuery, HourCount, ParkingCounts, PendingApprovals, RecentActivities, RecentVendor,
    RecentVolunteer, VendorCounts, VolunteerCounts, ZoneCount,
};
use crate::db::models::vendor::{Vendor, VendorCategoryCount, VendorStatusUpdate};
use crate::db::models::volunteer::{
    Volunteer, VolunteerRoleCount, VolunteerShiftCount, VolunteerStatusUpdate,
};
use crate::db::queries::vendor::fetch_vendor;
use crate::db::queries::volunteer::fetch_volunteer;
use crate::utils::api_response::ApiResponse;
use crate::utils::error::AppError;

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "Admin",
    responses((status = 200, description = "Festival-wide dashboard counters", body = DashboardStats)),
    security(("bearerAuth" = []))
)]
pub async fn get_dashboard_stats(
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<DashboardStats>, AppError> {
    let vendor_total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vendors")
        .fetch_one(&pool)
        .await?;
    let vendor_pending: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM vendors WHERE status = 'pending'")
            .fetch_one(&pool)
            .await?;
    let vendor_approved: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM vendors WHERE status = 'approved'")
            .fetch_one(&pool)
            .await?;

    let volunteer_total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM volunteers")
        .fetch_one(&pool)
        .await?;
    let volunteer_pending: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM volunteers WHERE status = 'registered'")
            .fetch_one(&pool)
            .await?;
    let volunteer_approved: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM volunteers WHERE status = 'approved'")
            .fetch_one(&pool)
            .await?;
    let volunteer_active: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM volunteers WHERE status = 'active'")
            .fetch_one(&pool)
            .await?;

    let parking_total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM parking_slots")
        .fetch_one(&pool)
        .await?;
    let parking_occupied: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM parking_slots WHERE is_occupied = 1")
            .fetch_one(&pool)
            .await?;
    let parking_available: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM parking_slots WHERE is_occupied = 0")
            .fetch_one(&pool)
            .await?;

    let midnight = FootfallPeriod::Today.window_start(Utc::now());
    let footfall_today: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM parking_events WHERE event_type = 'check_in' AND created_at >= ?",
    )
    .bind(midnight)
    .fetch_one(&pool)
    .await?;
    let footfall_total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM parking_events WHERE event_type = 'check_in'")
            .fetch_one(&pool)
            .await?;

    let vendors_by_category: Vec<VendorCategoryCount> = sqlx::query_as(
        "SELECT product_category AS category, COUNT(*) AS count FROM vendors \
         GROUP BY product_category ORDER BY count DESC",
    )
    .fetch_all(&pool)
    .await?;
    let volunteers_by_role: Vec<VolunteerRoleCount> = sqlx::query_as(
        "SELECT assigned_role AS role, COUNT(*) AS count FROM volunteers \
         GROUP BY assigned_role ORDER BY count DESC",
    )
    .fetch_all(&pool)
    .await?;
    let volunteers_by_shift: Vec<VolunteerShiftCount> = sqlx::query_as(
        "SELECT shift_timing AS shift, COUNT(*) AS count FROM volunteers \
         GROUP BY shift_timing ORDER BY count DESC",
    )
    .fetch_all(&pool)
    .await?;

    Ok(ApiResponse::success(
        StatusCode::OK,
        "Dashboard statistics retrieved successfully",
        DashboardStats {
            vendors: VendorCounts {
                total: vendor_total,
                pending: vendor_pending,
                approved: vendor_approved,
            },
            volunteers: VolunteerCounts {
                total: volunteer_total,
                pending: volunteer_pending,
                approved: volunteer_approved,
                active: volunteer_active,
            },
            parking: ParkingCounts {
                total: parking_total,
                occupied: parking_occupied,
                available: parking_available,
            },
            footfall: FootfallCounts {
                today: footfall_today,
                total: footfall_total,
            },
            breakdown: DashboardBreakdown {
                vendors_by_category,
                volunteers_by_role,
                volunteers_by_shift,
            },
        },
    ))
}

/// Approval queue, oldest first so nobody waits forever. Capped at 20 of
/// each kind per page load.
#[utoipa::path(
    get,
    path = "/api/admin/pending",
    tag = "Admin",
    responses((status = 200, description = "Vendors and volunteers awaiting approval", body = PendingApprovals)),
    security(("bearerAuth" = []))
)]
pub async fn get_pending_approvals(
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<PendingApprovals>, AppError> {
    let vendors: Vec<Vendor> = sqlx::query_as(
        "SELECT * FROM vendors WHERE status = 'pending' ORDER BY created_at ASC LIMIT 20",
    )
    .fetch_all(&pool)
    .await?;
    let volunteers: Vec<Volunteer> = sqlx::query_as(
        "SELECT * FROM volunteers WHERE status = 'registered' ORDER BY created_at ASC LIMIT 20",
    )
    .fetch_all(&pool)
    .await?;

    Ok(ApiResponse::success(
        StatusCode::OK,
        "Pending approvals retrieved successfully",
        PendingApprovals {
            vendors,
            volunteers,
        },
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/activities",
    tag = "Admin",
    responses((status = 200, description = "Latest registrations", body = RecentActivities)),
    security(("bearerAuth" = []))
)]
pub async fn get_recent_activities(
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<RecentActivities>, AppError> {
    let vendors: Vec<RecentVendor> = sqlx::query_as(
        "SELECT id, name, business_name, status, created_at FROM vendors \
         ORDER BY created_at DESC LIMIT 5",
    )
    .fetch_all(&pool)
    .await?;
    let volunteers: Vec<RecentVolunteer> = sqlx::query_as(
        "SELECT id, name, assigned_role, status, created_at FROM volunteers \
         ORDER BY created_at DESC LIMIT 5",
    )
    .fetch_all(&pool)
    .await?;

    Ok(ApiResponse::success(
        StatusCode::OK,
        "Recent activities retrieved successfully",
        RecentActivities {
            vendors,
            volunteers,
        },
    ))
}

/// Check-in volume from the append-only parking log, bucketed by hour of
/// day and by zone over the requested window.
#[utoipa::path(
    get,
    path = "/api/admin/footfall",
    tag = "Admin",
    params(FootfallQuery),
    responses((status = 200, description = "Footfall analytics for the selected period", body = FootfallAnalytics)),
    security(("bearerAuth" = []))
)]
pub async fn get_footfall_analytics(
    State(pool): State<SqlitePool>,
    Query(query): Query<FootfallQuery>,
) -> Result<ApiResponse<FootfallAnalytics>, AppError> {
    let period = query.period.unwrap_or_default();
    let window_start = period.window_start(Utc::now());

    let by_hour: Vec<HourCount> = sqlx::query_as(
        "SELECT CAST(strftime('%H', created_at) AS INTEGER) AS hour, COUNT(*) AS count \
         FROM parking_events WHERE event_type = 'check_in' AND created_at >= ? \
         GROUP BY hour ORDER BY hour",
    )
    .bind(window_start)
    .fetch_all(&pool)
    .await?;

    let by_zone: Vec<ZoneCount> = sqlx::query_as(
        "SELECT zone, COUNT(*) AS count FROM parking_events \
         WHERE event_type = 'check_in' AND created_at >= ? \
         GROUP BY zone ORDER BY count DESC",
    )
    .bind(window_start)
    .fetch_all(&pool)
    .await?;

    Ok(ApiResponse::success(
        StatusCode::OK,
        "Footfall analytics retrieved successfully",
        FootfallAnalytics { by_hour, by_zone },
    ))
}

/// Approve/reject a vendor, optionally assigning the stall in the same call.
#[utoipa::path(
    put,
    path = "/api/admin/vendors/{id}/status",
    tag = "Admin",
    params(("id" = i64, Path, description = "Vendor ID")),
    request_body = VendorStatusUpdate,
    responses(
        (status = 200, description = "Vendor status updated", body = Vendor),
        (status = 404, description = "Vendor not found"),
        (status = 409, description = "Stall number already taken")
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_vendor_status(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<VendorStatusUpdate>,
) -> Result<ApiResponse<Vendor>, AppError> {
    let current = fetch_vendor(&pool, id).await?;

    sqlx::query(
        "UPDATE vendors SET status = ?, stall_number = ?, stall_location = ?, notes = ?, \
         updated_at = ? WHERE id = ?",
    )
    .bind(payload.status)
    .bind(payload.stall_number.or(current.stall_number))
    .bind(payload.stall_location.or(current.stall_location))
    .bind(payload.notes.or(current.notes))
    .bind(Utc::now())
    .bind(id)
    .execute(&pool)
    .await?;

    let vendor = fetch_vendor(&pool, id).await?;
    info!(vendor_id = id, status = ?vendor.status, "vendor status changed");
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Vendor status updated successfully",
        vendor,
    ))
}

/// Approve a volunteer and settle their duty. Omitted role/shift overrides
/// fall back to what the volunteer asked for at registration.
#[utoipa::path(
    put,
    path = "/api/admin/volunteers/{id}/status",
    tag = "Admin",
    params(("id" = i64, Path, description = "Volunteer ID")),
    request_body = VolunteerStatusUpdate,
    responses(
        (status = 200, description = "Volunteer status updated", body = Volunteer),
        (status = 404, description = "Volunteer not found")
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_volunteer_status(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<VolunteerStatusUpdate>,
) -> Result<ApiResponse<Volunteer>, AppError> {
    let current = fetch_volunteer(&pool, id).await?;

    sqlx::query(
        "UPDATE volunteers SET status = ?, assigned_role = ?, assigned_area = ?, \
         shift_timing = ?, notes = ?, updated_at = ? WHERE id = ?",
    )
    .bind(payload.status)
    .bind(payload.assigned_role.unwrap_or(current.preferred_role))
    .bind(payload.assigned_area.or(current.assigned_area))
    .bind(payload.shift_timing.unwrap_or(current.preferred_shift))
    .bind(payload.notes.or(current.notes))
    .bind(Utc::now())
    .bind(id)
    .execute(&pool)
    .await?;

    let volunteer = fetch_volunteer(&pool, id).await?;
    info!(volunteer_id = id, status = ?volunteer.status, "volunteer status changed");
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Volunteer status updated successfully",
        volunteer,
    ))
}
