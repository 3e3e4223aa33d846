use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;
use validator::Validate;

use crate::db::models::volunteer::{
    ExperienceLevel, NewVolunteer, ShiftTiming, UpdateVolunteer, Volunteer, VolunteerListQuery,
    VolunteerRole, VolunteerRoleCount, VolunteerShiftCount, VolunteerStats, VolunteerStatus,
    VolunteerStatusCount,
};
use crate::utils::api_response::ApiResponse;
use crate::utils::error::AppError;

pub(crate) async fn fetch_volunteer(pool: &SqlitePool, id: i64) -> Result<Volunteer, AppError> {
    sqlx::query_as::<_, Volunteer>("SELECT * FROM volunteers WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Volunteer"))
}

#[utoipa::path(
    get,
    path = "/api/volunteers",
    tag = "Volunteers",
    params(VolunteerListQuery),
    responses((status = 200, description = "List volunteers, optionally filtered", body = [Volunteer]))
)]
pub async fn get_all_volunteers(
    State(pool): State<SqlitePool>,
    Query(query): Query<VolunteerListQuery>,
) -> Result<ApiResponse<Vec<Volunteer>>, AppError> {
    let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM volunteers WHERE 1=1");
    if let Some(status) = query.status {
        builder.push(" AND status = ").push_bind(status);
    }
    if let Some(role) = query.assigned_role {
        builder.push(" AND assigned_role = ").push_bind(role);
    }
    if let Some(shift) = query.shift_timing {
        builder.push(" AND shift_timing = ").push_bind(shift);
    }
    builder.push(" ORDER BY created_at DESC");

    let volunteers: Vec<Volunteer> = builder.build_query_as().fetch_all(&pool).await?;
    let count = volunteers.len();
    Ok(ApiResponse::list(
        StatusCode::OK,
        "Volunteers retrieved successfully",
        count,
        volunteers,
    ))
}

#[utoipa::path(
    get,
    path = "/api/volunteers/{id}",
    tag = "Volunteers",
    params(("id" = i64, Path, description = "Volunteer ID")),
    responses(
        (status = 200, description = "Volunteer retrieved", body = Volunteer),
        (status = 404, description = "Volunteer not found")
    )
)]
pub async fn get_volunteer(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Volunteer>, AppError> {
    let volunteer = fetch_volunteer(&pool, id).await?;
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Volunteer retrieved successfully",
        volunteer,
    ))
}

/// Public registration. The stated role/shift become both the immutable
/// preference and the initial assignment; status starts `registered`.
#[utoipa::path(
    post,
    path = "/api/volunteers",
    tag = "Volunteers",
    request_body = NewVolunteer,
    responses(
        (status = 201, description = "Volunteer registered", body = Volunteer),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Duplicate email")
    )
)]
pub async fn create_volunteer(
    State(pool): State<SqlitePool>,
    Json(payload): Json<NewVolunteer>,
) -> Result<ApiResponse<Volunteer>, AppError> {
    payload.validate()?;

    let role = payload.assigned_role.unwrap_or(VolunteerRole::Unassigned);
    let shift = payload.shift_timing.unwrap_or(ShiftTiming::NotAssigned);
    let experience = payload.experience.unwrap_or(ExperienceLevel::FirstTime);
    let now = Utc::now();

    let id = sqlx::query(
        "INSERT INTO volunteers \
         (name, contact_number, email, age, gender, preferred_role, preferred_shift, \
          assigned_role, assigned_area, shift_timing, experience, emergency_contact_name, \
          emergency_contact_phone, emergency_contact_relation, tshirt_size, status, notes, \
          created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&payload.name)
    .bind(&payload.contact_number)
    .bind(payload.email.to_lowercase())
    .bind(payload.age)
    .bind(payload.gender)
    .bind(role)
    .bind(shift)
    .bind(role)
    .bind(&payload.assigned_area)
    .bind(shift)
    .bind(experience)
    .bind(&payload.emergency_contact.name)
    .bind(&payload.emergency_contact.phone)
    .bind(&payload.emergency_contact.relation)
    .bind(payload.tshirt_size)
    .bind(VolunteerStatus::Registered)
    .bind(&payload.notes)
    .bind(now)
    .bind(now)
    .execute(&pool)
    .await?
    .last_insert_rowid();

    let volunteer = fetch_volunteer(&pool, id).await?;
    info!(volunteer = %volunteer.name, "volunteer registered");
    Ok(ApiResponse::success(
        StatusCode::CREATED,
        "Volunteer registered successfully",
        volunteer,
    ))
}

#[utoipa::path(
    put,
    path = "/api/volunteers/{id}",
    tag = "Volunteers",
    params(("id" = i64, Path, description = "Volunteer ID")),
    request_body = UpdateVolunteer,
    responses(
        (status = 200, description = "Volunteer updated", body = Volunteer),
        (status = 404, description = "Volunteer not found")
    )
)]
pub async fn update_volunteer(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateVolunteer>,
) -> Result<ApiResponse<Volunteer>, AppError> {
    payload.validate()?;
    let current = fetch_volunteer(&pool, id).await?;
    if payload.is_empty() {
        return Ok(ApiResponse::success(
            StatusCode::OK,
            "Nothing to update",
            current,
        ));
    }

    sqlx::query(
        "UPDATE volunteers SET name = ?, contact_number = ?, email = ?, age = ?, gender = ?, \
         assigned_role = ?, assigned_area = ?, shift_timing = ?, experience = ?, \
         tshirt_size = ?, status = ?, notes = ?, updated_at = ? WHERE id = ?",
    )
    .bind(payload.name.unwrap_or(current.name))
    .bind(payload.contact_number.unwrap_or(current.contact_number))
    .bind(payload.email.map(|e| e.to_lowercase()).unwrap_or(current.email))
    .bind(payload.age.or(current.age))
    .bind(payload.gender.or(current.gender))
    .bind(payload.assigned_role.unwrap_or(current.assigned_role))
    .bind(payload.assigned_area.or(current.assigned_area))
    .bind(payload.shift_timing.unwrap_or(current.shift_timing))
    .bind(payload.experience.unwrap_or(current.experience))
    .bind(payload.tshirt_size.or(current.tshirt_size))
    .bind(payload.status.unwrap_or(current.status))
    .bind(payload.notes.or(current.notes))
    .bind(Utc::now())
    .bind(id)
    .execute(&pool)
    .await?;

    let volunteer = fetch_volunteer(&pool, id).await?;
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Volunteer updated successfully",
        volunteer,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/volunteers/{id}",
    tag = "Volunteers",
    params(("id" = i64, Path, description = "Volunteer ID")),
    responses(
        (status = 200, description = "Volunteer deleted"),
        (status = 404, description = "Volunteer not found")
    )
)]
pub async fn delete_volunteer(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    let result = sqlx::query("DELETE FROM volunteers WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Volunteer"));
    }
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Volunteer deleted successfully",
        (),
    ))
}

#[utoipa::path(
    get,
    path = "/api/volunteers/stats",
    tag = "Volunteers",
    responses((status = 200, description = "Volunteer counts by role, status and shift", body = VolunteerStats))
)]
pub async fn get_volunteer_stats(
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<VolunteerStats>, AppError> {
    let role_stats: Vec<VolunteerRoleCount> = sqlx::query_as(
        "SELECT assigned_role AS role, COUNT(*) AS count FROM volunteers \
         GROUP BY assigned_role ORDER BY count DESC",
    )
    .fetch_all(&pool)
    .await?;
    let status_stats: Vec<VolunteerStatusCount> =
        sqlx::query_as("SELECT status, COUNT(*) AS count FROM volunteers GROUP BY status")
            .fetch_all(&pool)
            .await?;
    let shift_stats: Vec<VolunteerShiftCount> = sqlx::query_as(
        "SELECT shift_timing AS shift, COUNT(*) AS count FROM volunteers \
         GROUP BY shift_timing ORDER BY count DESC",
    )
    .fetch_all(&pool)
    .await?;
    let total_volunteers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM volunteers")
        .fetch_one(&pool)
        .await?;

    Ok(ApiResponse::success(
        StatusCode::OK,
        "Volunteer statistics retrieved successfully",
        VolunteerStats {
            role_stats,
            status_stats,
            shift_stats,
            total_volunteers,
        },
    ))
}
