mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{admin_token, create_slot, send, setup};

#[tokio::test]
async fn check_in_marks_slot_occupied() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;
    let slot_id = create_slot(&app, &token, "A-01").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/parking/{slot_id}/checkin"),
        None,
        Some(json!({
            "vehicleNumber": "KA01AB1234",
            "driverName": "Suresh",
            "driverContact": "9876512345"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "occupied");
    assert_eq!(body["data"]["isOccupied"], true);
    assert_eq!(body["data"]["vehicleNumber"], "KA01AB1234");
    assert!(body["data"]["entryTime"].is_string());
}

#[tokio::test]
async fn occupied_slot_rejects_second_check_in() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;
    let slot_id = create_slot(&app, &token, "A-01").await;

    let check_in = json!({ "vehicleNumber": "KA01AB1234" });
    let (status, _body) = send(
        &app,
        "POST",
        &format!("/api/parking/{slot_id}/checkin"),
        None,
        Some(check_in.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/parking/{slot_id}/checkin"),
        None,
        Some(check_in),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn reserved_slot_cannot_be_checked_in() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;
    let slot_id = create_slot(&app, &token, "A-01").await;

    send(
        &app,
        "PUT",
        &format!("/api/parking/{slot_id}"),
        Some(&token),
        Some(json!({ "status": "reserved" })),
    )
    .await;

    let (status, _body) = send(
        &app,
        "POST",
        &format!("/api/parking/{slot_id}/checkin"),
        None,
        Some(json!({ "vehicleNumber": "KA01AB1234" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn checkout_returns_receipt_and_frees_slot() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;
    let slot_id = create_slot(&app, &token, "A-01").await;

    send(
        &app,
        "POST",
        &format!("/api/parking/{slot_id}/checkin"),
        None,
        Some(json!({ "vehicleNumber": "KA01AB1234", "driverName": "Suresh" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/parking/{slot_id}/checkout"),
        None,
        Some(json!({ "parkingFee": 50.0, "paymentStatus": "paid" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slotNumber"], "A-01");
    assert_eq!(body["data"]["vehicleNumber"], "KA01AB1234");
    assert_eq!(body["data"]["driverName"], "Suresh");
    assert_eq!(body["data"]["parkingFee"], 50.0);
    assert_eq!(body["data"]["paymentStatus"], "paid");
    assert!(body["data"]["entryTime"].is_string());
    assert!(body["data"]["exitTime"].is_string());

    // slot row is wiped and reusable
    let (status, body) = send(&app, "GET", &format!("/api/parking/{slot_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "available");
    assert_eq!(body["data"]["isOccupied"], false);
    assert!(body["data"]["vehicleNumber"].is_null());
    assert!(body["data"]["driverName"].is_null());
    assert!(body["data"]["entryTime"].is_null());
}

#[tokio::test]
async fn checkout_of_free_slot_conflicts() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;
    let slot_id = create_slot(&app, &token, "A-01").await;

    let (status, _body) = send(
        &app,
        "POST",
        &format!("/api/parking/{slot_id}/checkout"),
        None,
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn check_in_on_unknown_slot_is_404() {
    let (app, _pool) = setup().await;
    let (status, _body) = send(
        &app,
        "POST",
        "/api/parking/9999/checkin",
        None,
        Some(json!({ "vehicleNumber": "KA01AB1234" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_slot_number_conflicts() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;
    create_slot(&app, &token, "A-01").await;

    let (status, _body) = send(
        &app,
        "POST",
        "/api/parking",
        Some(&token),
        Some(json!({ "slotNumber": "A-01", "zone": "Zone B" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn direct_status_edit_keeps_occupancy_consistent() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;
    let slot_id = create_slot(&app, &token, "A-01").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/parking/{slot_id}"),
        Some(&token),
        Some(json!({ "status": "occupied" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isOccupied"], true);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/parking/{slot_id}"),
        Some(&token),
        Some(json!({ "status": "available" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isOccupied"], false);
}

#[tokio::test]
async fn stats_report_occupancy_rate_with_two_decimals() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;

    // no slots yet: rate must be the literal "0.00"
    let (status, body) = send(&app, "GET", "/api/parking/stats", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["occupancyRate"], "0.00");

    let first = create_slot(&app, &token, "A-01").await;
    create_slot(&app, &token, "A-02").await;
    send(
        &app,
        "POST",
        &format!("/api/parking/{first}/checkin"),
        None,
        Some(json!({ "vehicleNumber": "KA01AB1234" })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/parking/stats", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalSlots"], 2);
    assert_eq!(body["data"]["occupiedSlots"], 1);
    assert_eq!(body["data"]["availableSlots"], 1);
    assert_eq!(body["data"]["occupancyRate"], "50.00");
}

#[tokio::test]
async fn list_filters_by_zone_and_occupancy() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;
    let first = create_slot(&app, &token, "A-01").await;

    let (_status, body) = send(
        &app,
        "POST",
        "/api/parking",
        Some(&token),
        Some(json!({ "slotNumber": "B-01", "zone": "Zone B" })),
    )
    .await;
    assert_eq!(body["data"]["zone"], "Zone B");

    send(
        &app,
        "POST",
        &format!("/api/parking/{first}/checkin"),
        None,
        Some(json!({ "vehicleNumber": "KA01AB1234" })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/parking?zone=Zone%20A", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["slotNumber"], "A-01");

    let (status, body) = send(&app, "GET", "/api/parking?isOccupied=true", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["id"], first);
}

#[tokio::test]
async fn reserved_slot_counts_as_available_in_stats() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;
    let slot_id = create_slot(&app, &token, "A-01").await;

    send(
        &app,
        "PUT",
        &format!("/api/parking/{slot_id}"),
        Some(&token),
        Some(json!({ "status": "reserved" })),
    )
    .await;

    // no vehicle in the slot, so it is still "available" capacity
    let (status, body) = send(&app, "GET", "/api/parking/stats", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["occupiedSlots"], 0);
    assert_eq!(body["data"]["availableSlots"], 1);
    assert_eq!(body["data"]["zoneStats"][0]["availableSlots"], 1);

    let (status, body) = send(&app, "GET", "/api/admin/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["parking"]["available"], 1);
    assert_eq!(body["data"]["parking"]["occupied"], 0);
}

#[tokio::test]
async fn checkout_without_payment_stays_unpaid() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;
    let slot_id = create_slot(&app, &token, "A-01").await;

    send(
        &app,
        "POST",
        &format!("/api/parking/{slot_id}/checkin"),
        None,
        Some(json!({ "vehicleNumber": "KA01AB1234" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/parking/{slot_id}/checkout"),
        None,
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["paymentStatus"], "unpaid");
}

#[tokio::test]
async fn vehicle_number_is_stored_uppercase() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;
    let slot_id = create_slot(&app, &token, "A-01").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/parking/{slot_id}/checkin"),
        None,
        Some(json!({ "vehicleNumber": "ka01ab1234" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["vehicleNumber"], "KA01AB1234");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/parking/{slot_id}/checkout"),
        None,
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["vehicleNumber"], "KA01AB1234");
}

#[tokio::test]
async fn rejected_checkout_leaves_no_event_behind() {
    let (app, pool) = setup().await;
    let token = admin_token(&app).await;
    let slot_id = create_slot(&app, &token, "A-01").await;

    let (status, _body) = send(
        &app,
        "POST",
        &format!("/api/parking/{slot_id}/checkout"),
        None,
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let events: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM parking_events")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(events, 0);

    // a full cycle logs exactly one check_in and one check_out
    send(
        &app,
        "POST",
        &format!("/api/parking/{slot_id}/checkin"),
        None,
        Some(json!({ "vehicleNumber": "KA01AB1234" })),
    )
    .await;
    send(
        &app,
        "POST",
        &format!("/api/parking/{slot_id}/checkout"),
        None,
        Some(json!({})),
    )
    .await;

    let events: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM parking_events")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(events, 2);
}

#[tokio::test]
async fn footfall_survives_checkout() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;
    let slot_id = create_slot(&app, &token, "A-01").await;

    send(
        &app,
        "POST",
        &format!("/api/parking/{slot_id}/checkin"),
        None,
        Some(json!({ "vehicleNumber": "KA01AB1234" })),
    )
    .await;
    send(
        &app,
        "POST",
        &format!("/api/parking/{slot_id}/checkout"),
        None,
        Some(json!({})),
    )
    .await;

    // the check-in still counts even though the slot row was wiped
    let (status, body) = send(&app, "GET", "/api/admin/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["footfall"]["today"], 1);
    assert_eq!(body["data"]["footfall"]["total"], 1);
}
