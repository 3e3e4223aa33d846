use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqliteExecutor, SqlitePool};
use tracing::info;
use validator::Validate;

use crate::db::models::parking::{
    CheckInRequest, CheckOutRequest, CheckoutReceipt, NewParkingSlot, ParkingEventType,
    ParkingListQuery, ParkingSlot, ParkingStats, PaymentStatus, SlotStatus, SlotStatusCount,
    UpdateParkingSlot, VehicleType, ZoneStats,
};
use crate::utils::api_response::ApiResponse;
use crate::utils::error::AppError;

pub(crate) async fn fetch_slot<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<ParkingSlot, AppError> {
    sqlx::query_as::<_, ParkingSlot>("SELECT * FROM parking_slots WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Parking slot"))
}

/// Whole minutes between entry and exit, clamped at zero. A missing entry
/// time counts as zero.
fn duration_minutes(entry: Option<DateTime<Utc>>, exit: DateTime<Utc>) -> i64 {
    entry
        .map(|e| (exit - e).num_minutes().max(0))
        .unwrap_or(0)
}

async fn record_event(
    conn: &mut SqliteConnection,
    slot: &ParkingSlot,
    event: ParkingEventType,
    exit_time: Option<DateTime<Utc>>,
    duration: i64,
    parking_fee: f64,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO parking_events \
         (slot_id, slot_number, zone, event_type, vehicle_number, entry_time, exit_time, \
          duration, parking_fee, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(slot.id)
    .bind(&slot.slot_number)
    .bind(slot.zone)
    .bind(event)
    .bind(&slot.vehicle_number)
    .bind(slot.entry_time)
    .bind(exit_time)
    .bind(duration)
    .bind(parking_fee)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/parking",
    tag = "Parking",
    params(ParkingListQuery),
    responses((status = 200, description = "List parking slots, optionally filtered", body = [ParkingSlot]))
)]
pub async fn get_all_slots(
    State(pool): State<SqlitePool>,
    Query(query): Query<ParkingListQuery>,
) -> Result<ApiResponse<Vec<ParkingSlot>>, AppError> {
    let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM parking_slots WHERE 1=1");
    if let Some(zone) = query.zone {
        builder.push(" AND zone = ").push_bind(zone);
    }
    if let Some(status) = query.status {
        builder.push(" AND status = ").push_bind(status);
    }
    if let Some(vehicle_type) = query.vehicle_type {
        builder.push(" AND vehicle_type = ").push_bind(vehicle_type);
    }
    if let Some(is_occupied) = query.is_occupied {
        builder.push(" AND is_occupied = ").push_bind(is_occupied);
    }
    builder.push(" ORDER BY slot_number ASC");

    let slots: Vec<ParkingSlot> = builder.build_query_as().fetch_all(&pool).await?;
    let count = slots.len();
    Ok(ApiResponse::list(
        StatusCode::OK,
        "Parking slots retrieved successfully",
        count,
        slots,
    ))
}

#[utoipa::path(
    get,
    path = "/api/parking/{id}",
    tag = "Parking",
    params(("id" = i64, Path, description = "Slot ID")),
    responses(
        (status = 200, description = "Slot retrieved", body = ParkingSlot),
        (status = 404, description = "Slot not found")
    )
)]
pub async fn get_slot(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<ParkingSlot>, AppError> {
    let slot = fetch_slot(&pool, id).await?;
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Parking slot retrieved successfully",
        slot,
    ))
}

#[utoipa::path(
    post,
    path = "/api/parking",
    tag = "Parking",
    request_body = NewParkingSlot,
    responses(
        (status = 201, description = "Slot created", body = ParkingSlot),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Duplicate slot number")
    )
)]
pub async fn create_slot(
    State(pool): State<SqlitePool>,
    Json(payload): Json<NewParkingSlot>,
) -> Result<ApiResponse<ParkingSlot>, AppError> {
    payload.validate()?;

    let status = payload.status.unwrap_or(SlotStatus::Available);
    let is_occupied = status.derive_occupancy(false);
    let now = Utc::now();

    let id = sqlx::query(
        "INSERT INTO parking_slots \
         (slot_number, zone, vehicle_type, status, is_occupied, attendant, notes, \
          created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&payload.slot_number)
    .bind(payload.zone)
    .bind(payload.vehicle_type.unwrap_or(VehicleType::Any))
    .bind(status)
    .bind(is_occupied)
    .bind(&payload.attendant)
    .bind(&payload.notes)
    .bind(now)
    .bind(now)
    .execute(&pool)
    .await?
    .last_insert_rowid();

    let slot = fetch_slot(&pool, id).await?;
    Ok(ApiResponse::success(
        StatusCode::CREATED,
        "Parking slot created successfully",
        slot,
    ))
}

#[utoipa::path(
    put,
    path = "/api/parking/{id}",
    tag = "Parking",
    params(("id" = i64, Path, description = "Slot ID")),
    request_body = UpdateParkingSlot,
    responses(
        (status = 200, description = "Slot updated", body = ParkingSlot),
        (status = 404, description = "Slot not found"),
        (status = 409, description = "Duplicate slot number")
    )
)]
pub async fn update_slot(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateParkingSlot>,
) -> Result<ApiResponse<ParkingSlot>, AppError> {
    payload.validate()?;
    let current = fetch_slot(&pool, id).await?;
    if payload.is_empty() {
        return Ok(ApiResponse::success(
            StatusCode::OK,
            "Nothing to update",
            current,
        ));
    }

    let status = payload.status.unwrap_or(current.status);
    let is_occupied = status.derive_occupancy(current.is_occupied);

    sqlx::query(
        "UPDATE parking_slots SET slot_number = ?, zone = ?, vehicle_type = ?, status = ?, \
         is_occupied = ?, attendant = ?, notes = ?, updated_at = ? WHERE id = ?",
    )
    .bind(payload.slot_number.unwrap_or(current.slot_number))
    .bind(payload.zone.unwrap_or(current.zone))
    .bind(payload.vehicle_type.unwrap_or(current.vehicle_type))
    .bind(status)
    .bind(is_occupied)
    .bind(payload.attendant.or(current.attendant))
    .bind(payload.notes.or(current.notes))
    .bind(Utc::now())
    .bind(id)
    .execute(&pool)
    .await?;

    let slot = fetch_slot(&pool, id).await?;
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Parking slot updated successfully",
        slot,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/parking/{id}",
    tag = "Parking",
    params(("id" = i64, Path, description = "Slot ID")),
    responses(
        (status = 200, description = "Slot deleted"),
        (status = 404, description = "Slot not found")
    )
)]
pub async fn delete_slot(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    let result = sqlx::query("DELETE FROM parking_slots WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Parking slot"));
    }
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Parking slot deleted successfully",
        (),
    ))
}

/// Seat a vehicle in a slot. The guard lives in the UPDATE's WHERE clause:
/// only a row that is currently `available` and unoccupied is written, so
/// two concurrent check-ins to the same slot cannot both succeed.
#[utoipa::path(
    post,
    path = "/api/parking/{id}/checkin",
    tag = "Parking",
    params(("id" = i64, Path, description = "Slot ID")),
    request_body = CheckInRequest,
    responses(
        (status = 200, description = "Vehicle checked in", body = ParkingSlot),
        (status = 404, description = "Slot not found"),
        (status = 409, description = "Slot is not available")
    )
)]
pub async fn check_in(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<CheckInRequest>,
) -> Result<ApiResponse<ParkingSlot>, AppError> {
    payload.validate()?;

    let vehicle_number = payload.vehicle_number.to_uppercase();
    let now = Utc::now();

    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        "UPDATE parking_slots SET status = 'occupied', is_occupied = 1, vehicle_number = ?, \
         driver_name = ?, driver_contact = ?, attendant = COALESCE(?, attendant), \
         entry_time = ?, exit_time = NULL, duration = 0, parking_fee = 0, \
         payment_status = 'unpaid', updated_at = ? \
         WHERE id = ? AND is_occupied = 0 AND status = 'available'",
    )
    .bind(&vehicle_number)
    .bind(&payload.driver_name)
    .bind(&payload.driver_contact)
    .bind(&payload.attendant)
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        let slot = fetch_slot(&mut *tx, id).await?;
        return Err(AppError::Conflict(format!(
            "Slot {} is not available for check-in",
            slot.slot_number
        )));
    }

    let slot = fetch_slot(&mut *tx, id).await?;
    record_event(&mut *tx, &slot, ParkingEventType::CheckIn, None, 0, 0.0, now).await?;
    tx.commit().await?;
    info!(slot = %slot.slot_number, vehicle = %vehicle_number, "vehicle checked in");
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Vehicle checked in successfully",
        slot,
    ))
}

/// Release a slot and return the canonical receipt. The pre-image read, the
/// clearing write and the event append run in one transaction, so the
/// receipt always describes the session that was actually closed.
#[utoipa::path(
    post,
    path = "/api/parking/{id}/checkout",
    tag = "Parking",
    params(("id" = i64, Path, description = "Slot ID")),
    request_body = CheckOutRequest,
    responses(
        (status = 200, description = "Vehicle checked out", body = CheckoutReceipt),
        (status = 404, description = "Slot not found"),
        (status = 409, description = "Slot is not occupied")
    )
)]
pub async fn check_out(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Json(payload): Json<CheckOutRequest>,
) -> Result<ApiResponse<CheckoutReceipt>, AppError> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let before = fetch_slot(&mut *tx, id).await?;
    let duration = duration_minutes(before.entry_time, now);
    let parking_fee = payload.parking_fee.unwrap_or(before.parking_fee);
    let payment_status = payload.payment_status.unwrap_or(PaymentStatus::Unpaid);

    let result = sqlx::query(
        "UPDATE parking_slots SET status = 'available', is_occupied = 0, vehicle_number = NULL, \
         driver_name = NULL, driver_contact = NULL, entry_time = NULL, exit_time = ?, \
         duration = ?, parking_fee = ?, payment_status = ?, updated_at = ? \
         WHERE id = ? AND is_occupied = 1",
    )
    .bind(now)
    .bind(duration)
    .bind(parking_fee)
    .bind(payment_status)
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::Conflict(format!(
            "Slot {} is not occupied",
            before.slot_number
        )));
    }

    record_event(
        &mut *tx,
        &before,
        ParkingEventType::CheckOut,
        Some(now),
        duration,
        parking_fee,
        now,
    )
    .await?;
    tx.commit().await?;
    info!(slot = %before.slot_number, duration, "vehicle checked out");

    let receipt = CheckoutReceipt {
        slot_number: before.slot_number,
        vehicle_number: before.vehicle_number,
        driver_name: before.driver_name,
        entry_time: before.entry_time,
        exit_time: now,
        duration,
        parking_fee,
        payment_status,
    };
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Vehicle checked out successfully",
        receipt,
    ))
}

#[utoipa::path(
    get,
    path = "/api/parking/stats",
    tag = "Parking",
    responses((status = 200, description = "Occupancy and per-zone counts", body = ParkingStats))
)]
pub async fn get_parking_stats(
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<ParkingStats>, AppError> {
    let total_slots: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM parking_slots")
        .fetch_one(&pool)
        .await?;
    let occupied_slots: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM parking_slots WHERE is_occupied = 1")
            .fetch_one(&pool)
            .await?;
    // "available" means no vehicle in the slot; reserved/maintenance slots
    // without one still count
    let available_slots: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM parking_slots WHERE is_occupied = 0")
            .fetch_one(&pool)
            .await?;

    let occupancy_rate = if total_slots > 0 {
        format!("{:.2}", occupied_slots as f64 / total_slots as f64 * 100.0)
    } else {
        "0.00".to_string()
    };

    let zone_stats: Vec<ZoneStats> = sqlx::query_as(
        "SELECT zone, COUNT(*) AS total_slots, \
         SUM(CASE WHEN is_occupied = 1 THEN 1 ELSE 0 END) AS occupied_slots, \
         SUM(CASE WHEN is_occupied = 0 THEN 1 ELSE 0 END) AS available_slots \
         FROM parking_slots GROUP BY zone",
    )
    .fetch_all(&pool)
    .await?;
    let status_stats: Vec<SlotStatusCount> =
        sqlx::query_as("SELECT status, COUNT(*) AS count FROM parking_slots GROUP BY status")
            .fetch_all(&pool)
            .await?;

    Ok(ApiResponse::success(
        StatusCode::OK,
        "Parking statistics retrieved successfully",
        ParkingStats {
            total_slots,
            occupied_slots,
            available_slots,
            occupancy_rate,
            zone_stats,
            status_stats,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::duration_minutes;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn duration_rounds_down_to_whole_minutes() {
        let entry = Utc.with_ymd_and_hms(2026, 8, 25, 10, 0, 0).unwrap();
        let exit = entry + Duration::minutes(95) + Duration::seconds(59);
        assert_eq!(duration_minutes(Some(entry), exit), 95);
    }

    #[test]
    fn duration_never_negative() {
        let entry = Utc.with_ymd_and_hms(2026, 8, 25, 10, 0, 0).unwrap();
        let exit = entry - Duration::minutes(5);
        assert_eq!(duration_minutes(Some(entry), exit), 0);
    }

    #[test]
    fn missing_entry_is_zero() {
        assert_eq!(duration_minutes(None, Utc::now()), 0);
    }
}
