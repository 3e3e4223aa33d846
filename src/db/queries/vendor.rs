use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;
use validator::Validate;

use crate::db::models::vendor::{
    NewVendor, UpdateVendor, Vendor, VendorCategoryCount, VendorListQuery, VendorStats,
    VendorStatus, VendorStatusCount,
};
use crate::utils::api_response::ApiResponse;
use crate::utils::error::AppError;

pub(crate) async fn fetch_vendor(pool: &SqlitePool, id: i64) -> Result<Vendor, AppError> {
    sqlx::query_as::<_, Vendor>("SELECT * FROM vendors WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Vendor"))
}

#[utoipa::path(
    get,
    path = "/api/vendors",
    tag = "Vendors",
    params(VendorListQuery),
    responses(
        (status = 200, description = "List vendors, optionally filtered", body = [Vendor])
    )
)]
pub async fn get_all_vendors(
    State(pool): State<SqlitePool>,
    Query(query): Query<VendorListQuery>,
) -> Result<ApiResponse<Vec<Vendor>>, AppError> {
    let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM vendors WHERE 1=1");
    if let Some(status) = query.status {
        builder.push(" AND status = ").push_bind(status);
    }
    if let Some(category) = query.product_category {
        builder.push(" AND product_category = ").push_bind(category);
    }
    builder.push(" ORDER BY created_at DESC");

    let vendors: Vec<Vendor> = builder.build_query_as().fetch_all(&pool).await?;
    let count = vendors.len();
    Ok(ApiResponse::list(
        StatusCode::OK,
        "Vendors retrieved successfully",
        count,
        vendors,
    ))
}

#[utoipa::path(
    get,
    path = "/api/vendors/{id}",
    tag = "Vendors",
    params(("id" = i64, Path, description = "Vendor ID")),
    responses(
        (status = 200, description = "Vendor retrieved", body = Vendor),
        (status = 404, description = "Vendor not found")
    )
)]
pub async fn get_vendor(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Vendor>, AppError> {
    let vendor = fetch_vendor(&pool, id).await?;
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Vendor retrieved successfully",
        vendor,
    ))
}

/// Public registration. Status always starts `pending`; only an admin
/// transition moves it on.
#[utoipa::path(
    post,
    path = "/api/vendors",
    tag = "Vendors",
    request_body = NewVendor,
    responses(
        (status = 201, description = "Vendor created", body = Vendor),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Duplicate email")
    )
)]
pub async fn create_vendor(
    State(pool): State<SqlitePool>,
    Json(payload): Json<NewVendor>,
) -> Result<ApiResponse<Vendor>, AppError> {
    payload.validate()?;

    let now = Utc::now();
    let id = sqlx::query(
        "INSERT INTO vendors \
         (name, business_name, contact_number, email, product_category, product_description, \
          product_photo, gst_number, status, notes, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, \
                 COALESCE(?, 'https://via.placeholder.com/400x300?text=No+Product+Image'), \
                 ?, ?, ?, ?, ?)",
    )
    .bind(&payload.name)
    .bind(&payload.business_name)
    .bind(&payload.contact_number)
    .bind(payload.email.to_lowercase())
    .bind(payload.product_category)
    .bind(&payload.product_description)
    .bind(&payload.product_photo)
    .bind(&payload.gst_number)
    .bind(VendorStatus::Pending)
    .bind(&payload.notes)
    .bind(now)
    .bind(now)
    .execute(&pool)
    .await?
    .last_insert_rowid();

    let vendor = fetch_vendor(&pool, id).await?;
    info!(vendor = %vendor.business_name, "vendor registered");
    Ok(ApiResponse::success(
        StatusCode::CREATED,
        "Vendor created successfully",
        vendor,
    ))
}

#[utoipa::path(
    put,
    path = "/api/vendors/{id}",
    tag = "Vendors",
    params(("id" = i64, Path, description = "Vendor ID")),
    request_body = UpdateVendor,
    responses(
        (status = 200, description = "Vendor updated", body = Vendor),
        (status = 404, description = "Vendor not found"),
        (status = 409, description = "Duplicate unique field")
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_vendor(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateVendor>,
) -> Result<ApiResponse<Vendor>, AppError> {
    payload.validate()?;
    let current = fetch_vendor(&pool, id).await?;
    if payload.is_empty() {
        return Ok(ApiResponse::success(
            StatusCode::OK,
            "Nothing to update",
            current,
        ));
    }

    sqlx::query(
        "UPDATE vendors SET name = ?, business_name = ?, contact_number = ?, email = ?, \
         stall_number = ?, stall_location = ?, product_category = ?, product_description = ?, \
         product_photo = ?, gst_number = ?, status = ?, notes = ?, updated_at = ? WHERE id = ?",
    )
    .bind(payload.name.unwrap_or(current.name))
    .bind(payload.business_name.unwrap_or(current.business_name))
    .bind(payload.contact_number.unwrap_or(current.contact_number))
    .bind(payload.email.map(|e| e.to_lowercase()).unwrap_or(current.email))
    .bind(payload.stall_number.or(current.stall_number))
    .bind(payload.stall_location.or(current.stall_location))
    .bind(payload.product_category.unwrap_or(current.product_category))
    .bind(payload.product_description.or(current.product_description))
    .bind(payload.product_photo.unwrap_or(current.product_photo))
    .bind(payload.gst_number.or(current.gst_number))
    .bind(payload.status.unwrap_or(current.status))
    .bind(payload.notes.or(current.notes))
    .bind(Utc::now())
    .bind(id)
    .execute(&pool)
    .await?;

    let vendor = fetch_vendor(&pool, id).await?;
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Vendor updated successfully",
        vendor,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/vendors/{id}",
    tag = "Vendors",
    params(("id" = i64, Path, description = "Vendor ID")),
    responses(
        (status = 200, description = "Vendor deleted"),
        (status = 404, description = "Vendor not found")
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_vendor(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    let result = sqlx::query("DELETE FROM vendors WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Vendor"));
    }
    info!(vendor_id = id, "vendor deleted");
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Vendor deleted successfully",
        (),
    ))
}

#[utoipa::path(
    get,
    path = "/api/vendors/stats",
    tag = "Vendors",
    responses((status = 200, description = "Vendor counts by status and category", body = VendorStats))
)]
pub async fn get_vendor_stats(
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<VendorStats>, AppError> {
    let status_stats: Vec<VendorStatusCount> =
        sqlx::query_as("SELECT status, COUNT(*) AS count FROM vendors GROUP BY status")
            .fetch_all(&pool)
            .await?;
    let category_stats: Vec<VendorCategoryCount> = sqlx::query_as(
        "SELECT product_category AS category, COUNT(*) AS count FROM vendors \
         GROUP BY product_category ORDER BY count DESC",
    )
    .fetch_all(&pool)
    .await?;
    let total_vendors: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vendors")
        .fetch_one(&pool)
        .await?;

    Ok(ApiResponse::success(
        StatusCode::OK,
        "Vendor statistics retrieved successfully",
        VendorStats {
            status_stats,
            category_stats,
            total_vendors,
        },
    ))
}
