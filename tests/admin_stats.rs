mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{admin_token, create_slot, create_vendor, send, setup};

#[tokio::test]
async fn admin_surface_rejects_anonymous_callers() {
    let (app, _pool) = setup().await;
    for uri in [
        "/api/admin/stats",
        "/api/admin/pending",
        "/api/admin/activities",
        "/api/admin/footfall",
    ] {
        let (status, _body) = send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri} must be gated");
    }
}

#[tokio::test]
async fn dashboard_counts_follow_the_data() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;

    let approved = create_vendor(&app, "a@example.com").await;
    create_vendor(&app, "b@example.com").await;
    send(
        &app,
        "PUT",
        &format!("/api/admin/vendors/{approved}/status"),
        Some(&token),
        Some(json!({ "status": "approved" })),
    )
    .await;

    send(
        &app,
        "POST",
        "/api/volunteers",
        None,
        Some(json!({
            "name": "Lakshmi",
            "contactNumber": "9876500000",
            "email": "lakshmi@example.com",
            "emergencyContact": { "name": "Raju", "phone": "9876511111" }
        })),
    )
    .await;

    let slot = create_slot(&app, &token, "A-01").await;
    create_slot(&app, &token, "A-02").await;
    send(
        &app,
        "POST",
        &format!("/api/parking/{slot}/checkin"),
        None,
        Some(json!({ "vehicleNumber": "KA01AB1234" })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/admin/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["vendors"]["total"], 2);
    assert_eq!(data["vendors"]["pending"], 1);
    assert_eq!(data["vendors"]["approved"], 1);
    assert_eq!(data["volunteers"]["total"], 1);
    assert_eq!(data["volunteers"]["pending"], 1);
    assert_eq!(data["parking"]["total"], 2);
    assert_eq!(data["parking"]["occupied"], 1);
    assert_eq!(data["parking"]["available"], 1);
    assert_eq!(data["footfall"]["today"], 1);
    assert!(data["breakdown"]["vendorsByCategory"].is_array());
    assert!(data["breakdown"]["volunteersByRole"].is_array());
}

#[tokio::test]
async fn category_breakdowns_sort_largest_first() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;

    // one Food vendor, then two Toys vendors
    for (i, category) in ["Food", "Toys", "Toys"].iter().enumerate() {
        let (status, _body) = send(
            &app,
            "POST",
            "/api/vendors",
            None,
            Some(json!({
                "name": "Vendor",
                "businessName": format!("Stall {i}"),
                "contactNumber": "9876543210",
                "email": format!("stall{i}@example.com"),
                "productCategory": category
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/api/admin/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let by_category = body["data"]["breakdown"]["vendorsByCategory"]
        .as_array()
        .unwrap();
    assert_eq!(by_category[0]["category"], "Toys");
    assert_eq!(by_category[0]["count"], 2);
    assert_eq!(by_category[1]["count"], 1);

    let (status, body) = send(&app, "GET", "/api/vendors/stats", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["categoryStats"][0]["category"], "Toys");
    assert_eq!(body["data"]["categoryStats"][0]["count"], 2);
}

#[tokio::test]
async fn pending_queue_lists_unapproved_registrations() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;
    create_vendor(&app, "a@example.com").await;

    send(
        &app,
        "POST",
        "/api/volunteers",
        None,
        Some(json!({
            "name": "Lakshmi",
            "contactNumber": "9876500000",
            "email": "lakshmi@example.com",
            "emergencyContact": { "name": "Raju", "phone": "9876511111" }
        })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/admin/pending", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["vendors"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["volunteers"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["vendors"][0]["status"], "pending");
    assert_eq!(body["data"]["volunteers"][0]["status"], "registered");
}

#[tokio::test]
async fn recent_activities_cap_at_five_each() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;
    for i in 0..7 {
        create_vendor(&app, &format!("vendor{i}@example.com")).await;
    }

    let (status, body) = send(&app, "GET", "/api/admin/activities", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["vendors"].as_array().unwrap().len(), 5);
    assert!(body["data"]["volunteers"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn footfall_analytics_bucket_by_hour_and_zone() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;

    let a = create_slot(&app, &token, "A-01").await;
    let (_s, body) = send(
        &app,
        "POST",
        "/api/parking",
        Some(&token),
        Some(json!({ "slotNumber": "B-01", "zone": "Zone B" })),
    )
    .await;
    let b = body["data"]["id"].as_i64().unwrap();

    for slot in [a, b] {
        send(
            &app,
            "POST",
            &format!("/api/parking/{slot}/checkin"),
            None,
            Some(json!({ "vehicleNumber": format!("KA01AB{slot:04}") })),
        )
        .await;
    }

    let (status, body) = send(
        &app,
        "GET",
        "/api/admin/footfall?period=today",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let by_hour = body["data"]["byHour"].as_array().unwrap();
    let total: i64 = by_hour.iter().map(|h| h["count"].as_i64().unwrap()).sum();
    assert_eq!(total, 2);

    let by_zone = body["data"]["byZone"].as_array().unwrap();
    assert_eq!(by_zone.len(), 2);
    for entry in by_zone {
        assert_eq!(entry["count"], 1);
    }
}

#[tokio::test]
async fn week_period_includes_todays_checkins() {
    let (app, _pool) = setup().await;
    let token = admin_token(&app).await;
    let slot = create_slot(&app, &token, "A-01").await;
    send(
        &app,
        "POST",
        &format!("/api/parking/{slot}/checkin"),
        None,
        Some(json!({ "vehicleNumber": "KA01AB1234" })),
    )
    .await;

    for period in ["week", "month"] {
        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/admin/footfall?period={period}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let by_hour = body["data"]["byHour"].as_array().unwrap();
        let total: i64 = by_hour.iter().map(|h| h["count"].as_i64().unwrap()).sum();
        assert_eq!(total, 1, "period {period}");
    }
}
