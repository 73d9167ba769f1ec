//! Health, public hotel lookup and catalog.

use axum::http::StatusCode;

use crate::helpers::{SLUG, TestApp};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data()["status"], "ok");
}

#[tokio::test]
async fn test_site_lookup_by_slug() {
    let app = TestApp::new();

    let response = app.request("GET", &format!("/api/sites/{SLUG}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "Lakeview Residency");

    let missing = app.request("GET", "/api/sites/nowhere-inn", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_catalog_lists_active_items() {
    let app = TestApp::new();
    let response = app
        .request("GET", &format!("/api/hotels/{}/catalog", app.hotel_id), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["rooms"].as_array().map(Vec::len), Some(1));
    assert_eq!(data["addons"].as_array().map(Vec::len), Some(1));
    assert_eq!(data["packages"][0]["name"], "Honeymoon Bliss");
}
