//! Quotes, submission and booking management.

use axum::http::StatusCode;
use rust_decimal_macros::dec;
use serde_json::json;

use hotelsite_entity::promo::DiscountType;

use crate::helpers::{TestApp, money};

#[tokio::test]
async fn test_quote_with_addons() {
    let app = TestApp::new();
    let mut edits = app.stay_edits();
    edits.push(json!({ "type": "set_addon_quantity", "addon_id": app.addon_id, "quantity": 2 }));

    let response = app
        .request(
            "POST",
            &format!("/api/hotels/{}/quote", app.hotel_id),
            Some(json!({ "edits": edits })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let quote = &response.data()["quote"];
    assert_eq!(quote["nights"], 3);
    assert_eq!(money(&quote["subtotal"]), dec!(6600));
    assert_eq!(money(&quote["total"]), dec!(6600));
    assert!(response.data()["applied_promo_code"].is_null());
}

#[tokio::test]
async fn test_quote_applies_promo_and_fees() {
    let app = TestApp::new();
    app.seed_promo("LAKE10", DiscountType::Percentage, dec!(10), None);
    let response = app
        .request(
            "POST",
            &format!("/api/hotels/{}/quote", app.hotel_id),
            Some(json!({
                "draft": { "room_id": app.room_id, "early_checkin": true, "late_checkout": true },
                "edits": [{ "type": "set_promo_code", "code": "lake10" }]
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let quote = &response.data()["quote"];
    // No dates: a single night at 2000 plus both fees.
    assert_eq!(money(&quote["subtotal"]), dec!(3000));
    assert_eq!(money(&quote["discount"]), dec!(300));
    assert_eq!(money(&quote["total"]), dec!(2700));
    assert_eq!(response.data()["applied_promo_code"], "LAKE10");
}

#[tokio::test]
async fn test_submit_booking() {
    let app = TestApp::new();
    let response = app
        .submit(vec![
            json!({ "type": "select_package", "package_id": app.package_id }),
            json!({ "type": "add_guest", "guest": { "name": "Anya Das", "age": 6 } }),
        ])
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let booking = &response.data()["booking"];
    let reference = booking["booking_reference"].as_str().unwrap();
    assert_eq!(reference.len(), 10);
    assert!(reference.starts_with("BK"));
    assert!(reference[2..].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(booking["status"], "confirmed");
    assert_eq!(booking["payment_status"], "pending");
    assert_eq!(booking["booking_source"], "website");
    assert_eq!(money(&booking["total_amount"]), dec!(10000));

    let id = booking["id"].as_str().unwrap();
    let details = app.request("GET", &format!("/api/bookings/{id}"), None).await;
    assert_eq!(details.status, StatusCode::OK);
    assert_eq!(details.data()["guests"].as_array().map(Vec::len), Some(1));
    assert_eq!(money(&details.data()["package"]["price"]), dec!(4000));
}

#[tokio::test]
async fn test_submit_with_missing_fields_is_rejected() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            &format!("/api/hotels/{}/bookings", app.hotel_id),
            Some(json!({ "edits": [{ "type": "select_room", "room_id": app.room_id }] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Please fill all required fields");

    let listed = app
        .request("GET", &format!("/api/hotels/{}/bookings", app.hotel_id), None)
        .await;
    assert_eq!(listed.data()["total"], 0);
}

#[tokio::test]
async fn test_oversized_occupancy_is_rejected() {
    let app = TestApp::new();
    let response = app
        .submit(vec![json!({
            "type": "set_occupancy",
            "adults": 2147483647u32,
            "children": 1
        })])
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let listed = app
        .request("GET", &format!("/api/hotels/{}/bookings", app.hotel_id), None)
        .await;
    assert_eq!(listed.data()["total"], 0);
}

#[tokio::test]
async fn test_exhausted_promo_rejects_booking() {
    let app = TestApp::new();
    app.seed_promo("ONCE", DiscountType::Fixed, dec!(500), Some(1));
    let promo = vec![json!({ "type": "set_promo_code", "code": "ONCE" })];

    let first = app.submit(promo.clone()).await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(money(&first.data()["booking"]["discount_amount"]), dec!(500));

    let second = app.submit(promo).await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.body["message"], "Invalid or expired promo code");
}

#[tokio::test]
async fn test_list_and_cancel() {
    let app = TestApp::new();
    app.submit(vec![]).await;
    let second = app.submit(vec![]).await;
    let id = second.data()["booking"]["id"].as_str().unwrap().to_string();

    let cancelled = app
        .request(
            "PATCH",
            &format!("/api/bookings/{id}/status"),
            Some(json!({ "status": "cancelled", "cancellation_reason": "Change of plans" })),
        )
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.data()["status"], "cancelled");
    assert_eq!(cancelled.data()["cancellation_reason"], "Change of plans");
    assert!(!cancelled.data()["cancelled_at"].is_null());

    let path = format!("/api/hotels/{}/bookings", app.hotel_id);
    let all = app.request("GET", &path, None).await;
    assert_eq!(all.data()["total"], 2);

    let confirmed = app
        .request("GET", &format!("{path}?status=confirmed&per_page=10"), None)
        .await;
    assert_eq!(confirmed.status, StatusCode::OK);
    assert_eq!(confirmed.data()["total"], 1);
    assert_eq!(confirmed.data()["per_page"], 10);
}

#[tokio::test]
async fn test_unknown_booking() {
    let app = TestApp::new();
    let response = app
        .request(
            "GET",
            &format!("/api/bookings/{}", uuid::Uuid::now_v7()),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
