use axum::routing::{delete, get, post, put};
use axum::Router;
use sqlx::SqlitePool;
use utoipa::OpenApi;

use crate::db::models::parking::{
    CheckInRequest, CheckOutRequest, CheckoutReceipt, NewParkingSlot, ParkingSlot, ParkingStats,
    SlotStatusCount, UpdateParkingSlot, ZoneStats,
};
use crate::db::queries::parking::{
    check_in, check_out, create_slot, delete_slot, get_all_slots, get_parking_stats, get_slot,
    update_slot,
};

/// Attendant-facing workflow; the whole surface is public like the rest of
/// the on-the-ground operations.
pub fn parking_routes() -> Router<SqlitePool> {
    Router::new()
        .route("/parking", get(get_all_slots))
        .route("/parking", post(create_slot))
        .route("/parking/stats", get(get_parking_stats))
        .route("/parking/{id}", get(get_slot))
        .route("/parking/{id}", put(update_slot))
        .route("/parking/{id}", delete(delete_slot))
        .route("/parking/{id}/checkin", post(check_in))
        .route("/parking/{id}/checkout", post(check_out))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::db::queries::parking::get_all_slots,
        crate::db::queries::parking::get_slot,
        crate::db::queries::parking::create_slot,
        crate::db::queries::parking::update_slot,
        crate::db::queries::parking::delete_slot,
        crate::db::queries::parking::check_in,
        crate::db::queries::parking::check_out,
        crate::db::queries::parking::get_parking_stats,
    ),
    components(schemas(
        ParkingSlot,
        NewParkingSlot,
        UpdateParkingSlot,
        CheckInRequest,
        CheckOutRequest,
        CheckoutReceipt,
        ParkingStats,
        ZoneStats,
        SlotStatusCount,
    )),
    tags((name = "Parking", description = "Parking slot tracking and vehicle flow"))
)]
pub struct ParkingDoc;
