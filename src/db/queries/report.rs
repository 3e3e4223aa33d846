use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;
use validator::Validate;

use crate::db::models::report::{
    NewReport, Report, ReportListQuery, ReportPriority, ReportStatus, UpdateReport,
};
use crate::db::queries::vendor::fetch_vendor;
use crate::utils::api_response::ApiResponse;
use crate::utils::error::AppError;

async fn fetch_report(pool: &SqlitePool, id: i64) -> Result<Report, AppError> {
    sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Report"))
}

#[utoipa::path(
    post,
    path = "/api/reports/vendor/{vendor_id}",
    tag = "Reports",
    params(("vendor_id" = i64, Path, description = "Vendor ID")),
    request_body = NewReport,
    responses(
        (status = 201, description = "Report filed", body = Report),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Vendor not found")
    )
)]
pub async fn submit_report(
    State(pool): State<SqlitePool>,
    Path(vendor_id): Path<i64>,
    Json(payload): Json<NewReport>,
) -> Result<ApiResponse<Report>, AppError> {
    payload.validate()?;
    fetch_vendor(&pool, vendor_id).await?;

    let now = Utc::now();
    let id = sqlx::query(
        "INSERT INTO reports \
         (vendor_id, report_type, description, reporter_name, reporter_email, \
          reporter_contact, status, priority, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(vendor_id)
    .bind(payload.report_type)
    .bind(&payload.description)
    .bind(&payload.reporter_name)
    .bind(&payload.reporter_email)
    .bind(&payload.reporter_contact)
    .bind(ReportStatus::Pending)
    .bind(ReportPriority::Medium)
    .bind(now)
    .bind(now)
    .execute(&pool)
    .await?
    .last_insert_rowid();

    let report = fetch_report(&pool, id).await?;
    info!(report_id = report.id, vendor_id, "report filed against vendor");
    Ok(ApiResponse::success(
        StatusCode::CREATED,
        "Report submitted successfully",
        report,
    ))
}

/// Back-office listing, most severe first within each filter.
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "Reports",
    params(ReportListQuery),
    responses((status = 200, description = "List reports, optionally filtered", body = [Report])),
    security(("bearerAuth" = []))
)]
pub async fn get_all_reports(
    State(pool): State<SqlitePool>,
    Query(query): Query<ReportListQuery>,
) -> Result<ApiResponse<Vec<Report>>, AppError> {
    let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM reports WHERE 1=1");
    if let Some(status) = query.status {
        builder.push(" AND status = ").push_bind(status);
    }
    if let Some(priority) = query.priority {
        builder.push(" AND priority = ").push_bind(priority);
    }
    builder.push(
        " ORDER BY CASE priority \
          WHEN 'urgent' THEN 0 WHEN 'high' THEN 1 WHEN 'medium' THEN 2 ELSE 3 END, \
          created_at DESC",
    );

    let reports: Vec<Report> = builder.build_query_as().fetch_all(&pool).await?;
    let count = reports.len();
    Ok(ApiResponse::list(
        StatusCode::OK,
        "Reports retrieved successfully",
        count,
        reports,
    ))
}

#[utoipa::path(
    get,
    path = "/api/reports/vendor/{vendor_id}",
    tag = "Reports",
    params(("vendor_id" = i64, Path, description = "Vendor ID")),
    responses(
        (status = 200, description = "Reports against one vendor", body = [Report]),
        (status = 404, description = "Vendor not found")
    ),
    security(("bearerAuth" = []))
)]
pub async fn get_vendor_reports(
    State(pool): State<SqlitePool>,
    Path(vendor_id): Path<i64>,
) -> Result<ApiResponse<Vec<Report>>, AppError> {
    fetch_vendor(&pool, vendor_id).await?;

    let reports: Vec<Report> =
        sqlx::query_as("SELECT * FROM reports WHERE vendor_id = ? ORDER BY created_at DESC")
            .bind(vendor_id)
            .fetch_all(&pool)
            .await?;
    let count = reports.len();
    Ok(ApiResponse::list(
        StatusCode::OK,
        "Vendor reports retrieved successfully",
        count,
        reports,
    ))
}

/// Admin action. Moving into resolved/dismissed stamps `resolved_at`;
/// moving back out clears it.
#[utoipa::path(
    put,
    path = "/api/reports/{id}/status",
    tag = "Reports",
    params(("id" = i64, Path, description = "Report ID")),
    request_body = UpdateReport,
    responses(
        (status = 200, description = "Report updated", body = Report),
        (status = 404, description = "Report not found")
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_report(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateReport>,
) -> Result<ApiResponse<Report>, AppError> {
    let current = fetch_report(&pool, id).await?;

    let closed = matches!(
        payload.status,
        ReportStatus::Resolved | ReportStatus::Dismissed
    );
    let now = Utc::now();
    let resolved_at = if closed {
        current.resolved_at.or(Some(now))
    } else {
        None
    };
    let resolved_by = if closed {
        payload.resolved_by.or(current.resolved_by)
    } else {
        None
    };

    sqlx::query(
        "UPDATE reports SET status = ?, priority = ?, admin_notes = ?, resolved_by = ?, \
         resolved_at = ?, updated_at = ? WHERE id = ?",
    )
    .bind(payload.status)
    .bind(payload.priority.unwrap_or(current.priority))
    .bind(payload.admin_notes.or(current.admin_notes))
    .bind(resolved_by)
    .bind(resolved_at)
    .bind(now)
    .bind(id)
    .execute(&pool)
    .await?;

    let report = fetch_report(&pool, id).await?;
    info!(report_id = id, status = ?report.status, "report updated");
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Report updated successfully",
        report,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    tag = "Reports",
    params(("id" = i64, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report deleted"),
        (status = 404, description = "Report not found")
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_report(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    let result = sqlx::query("DELETE FROM reports WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Report"));
    }
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Report deleted successfully",
        (),
    ))
}
