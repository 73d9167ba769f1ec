//! Analytics endpoint.

use axum::http::StatusCode;
use rust_decimal_macros::dec;

use crate::helpers::{TestApp, money};

#[tokio::test]
async fn test_report_counts_recent_bookings() {
    let app = TestApp::new();
    app.submit(vec![]).await;
    app.submit(vec![]).await;

    let response = app
        .request(
            "GET",
            &format!("/api/hotels/{}/analytics?period=week", app.hotel_id),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let report = response.data();
    assert_eq!(report["total_bookings"], 2);
    assert_eq!(money(&report["total_revenue"]), dec!(12000));
    assert_eq!(money(&report["avg_booking_value"]), dec!(6000));
    assert_eq!(money(&report["occupancy_rate"]), dec!(100));
    assert_eq!(money(&report["revenue_growth"]), dec!(0));
    assert_eq!(report["bookings_by_source"][0]["source"], "website");
    assert_eq!(report["bookings_by_source"][0]["count"], 2);
    assert_eq!(report["top_rooms"][0]["title"], "Deluxe Lake View");
}

#[tokio::test]
async fn test_unknown_period_is_rejected() {
    let app = TestApp::new();
    let response = app
        .request(
            "GET",
            &format!("/api/hotels/{}/analytics?period=decade", app.hotel_id),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
