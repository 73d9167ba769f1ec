//! Room calendar endpoints.

use axum::http::StatusCode;
use rust_decimal_macros::dec;
use serde_json::json;

use crate::helpers::{TestApp, money};

#[tokio::test]
async fn test_toggle_and_month_view() {
    let app = TestApp::new();
    let base = format!("/api/rooms/{}/availability", app.room_id);

    let toggled = app
        .request("POST", &format!("{base}/2024-07-04/toggle"), None)
        .await;
    assert_eq!(toggled.status, StatusCode::OK);
    assert_eq!(toggled.data()["is_available"], false);

    let month = app
        .request("GET", &format!("{base}?year=2024&month=7"), None)
        .await;
    assert_eq!(month.status, StatusCode::OK);
    let days = month.data()["days"].as_array().unwrap();
    assert_eq!(days.len(), 31);
    assert_eq!(days[3]["date"], "2024-07-04");
    assert_eq!(days[3]["is_available"], false);
    assert_eq!(days[4]["is_available"], true);
    assert_eq!(money(&days[4]["price"]), dec!(2000));
}

#[tokio::test]
async fn test_price_override_set_and_clear() {
    let app = TestApp::new();
    let path = format!("/api/rooms/{}/availability/2024-12-31", app.room_id);

    let priced = app
        .request("PUT", &path, Some(json!({ "price_override": 3500 })))
        .await;
    assert_eq!(priced.status, StatusCode::OK);
    assert_eq!(money(&priced.data()["price"]), dec!(3500));
    assert_eq!(priced.data()["is_available"], true);

    let cleared = app
        .request("PUT", &path, Some(json!({ "price_override": null })))
        .await;
    assert_eq!(money(&cleared.data()["price"]), dec!(2000));
    assert!(cleared.data()["price_override"].is_null());
}

#[tokio::test]
async fn test_rejects_invalid_input() {
    let app = TestApp::new();
    let base = format!("/api/rooms/{}/availability", app.room_id);

    let bad_month = app
        .request("GET", &format!("{base}?year=2024&month=13"), None)
        .await;
    assert_eq!(bad_month.status, StatusCode::BAD_REQUEST);

    let bad_stay = app
        .request("PUT", &format!("{base}/2024-07-04"), Some(json!({ "min_stay": 0 })))
        .await;
    assert_eq!(bad_stay.status, StatusCode::BAD_REQUEST);

    let negative = app
        .request(
            "PUT",
            &format!("{base}/2024-07-04"),
            Some(json!({ "price_override": -10 })),
        )
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);
}
