//! Promo code validation and management.

use axum::http::StatusCode;
use rust_decimal_macros::dec;
use serde_json::json;

use hotelsite_entity::promo::DiscountType;

use crate::helpers::{TestApp, money};

#[tokio::test]
async fn test_validate_promo_code() {
    let app = TestApp::new();
    app.seed_promo("SUMMER10", DiscountType::Percentage, dec!(10), None);
    let path = format!("/api/hotels/{}/promo-codes/validate", app.hotel_id);

    let valid = app
        .request("POST", &path, Some(json!({ "code": " summer10 " })))
        .await;
    assert_eq!(valid.status, StatusCode::OK);
    assert_eq!(valid.data()["valid"], true);
    assert_eq!(valid.data()["code"], "SUMMER10");
    assert_eq!(money(&valid.data()["discount_value"]), dec!(10));

    let unknown = app
        .request("POST", &path, Some(json!({ "code": "WINTER" })))
        .await;
    assert_eq!(unknown.status, StatusCode::OK);
    assert_eq!(unknown.data()["valid"], false);
    assert_eq!(unknown.data()["message"], "Invalid or expired promo code");
}

#[tokio::test]
async fn test_exhausted_code_is_not_valid() {
    let app = TestApp::new();
    app.seed_promo("ONCE", DiscountType::Fixed, dec!(500), Some(1));
    app.submit(vec![json!({ "type": "set_promo_code", "code": "ONCE" })])
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/hotels/{}/promo-codes/validate", app.hotel_id),
            Some(json!({ "code": "ONCE" })),
        )
        .await;
    assert_eq!(response.data()["valid"], false);
}

#[tokio::test]
async fn test_promo_code_lifecycle() {
    let app = TestApp::new();
    let path = format!("/api/hotels/{}/promo-codes", app.hotel_id);
    let body = json!({
        "code": "monsoon",
        "discount_type": "fixed",
        "discount_value": 750,
        "valid_from": "2024-06-01T00:00:00Z",
        "valid_to": "2024-09-30T23:59:59Z",
        "usage_limit": 50
    });

    let created = app.request("POST", &path, Some(body.clone())).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data()["code"], "MONSOON");
    assert_eq!(created.data()["used_count"], 0);
    let id = created.data()["id"].as_str().unwrap().to_string();

    let listed = app.request("GET", &path, None).await;
    assert_eq!(listed.data().as_array().map(Vec::len), Some(1));

    let mut changed = body;
    changed["discount_value"] = json!(900);
    let updated = app
        .request("PUT", &format!("/api/promo-codes/{id}"), Some(changed))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(money(&updated.data()["discount_value"]), dec!(900));

    let deleted = app
        .request("DELETE", &format!("/api/promo-codes/{id}"), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    let again = app
        .request("DELETE", &format!("/api/promo-codes/{id}"), None)
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rejects_percentage_over_hundred() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            &format!("/api/hotels/{}/promo-codes", app.hotel_id),
            Some(json!({
                "code": "TOOMUCH",
                "discount_type": "percentage",
                "discount_value": 150,
                "valid_from": "2024-06-01T00:00:00Z",
                "valid_to": "2024-09-30T23:59:59Z"
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
