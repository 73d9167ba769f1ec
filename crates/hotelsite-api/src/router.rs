//! Route definitions for the HotelSite HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::Router;
use axum::routing::{get, patch, post, put};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with every route, threading `state` through.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(hotel_routes())
        .merge(booking_routes())
        .merge(promo_routes())
        .merge(availability_routes())
        .merge(analytics_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Public website lookup and catalog
fn hotel_routes() -> Router<AppState> {
    Router::new()
        .route("/sites/{slug}", get(handlers::hotel::get_site))
        .route(
            "/hotels/{hotel_id}/catalog",
            get(handlers::hotel::get_catalog),
        )
}

/// Quotes, submission and booking management
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/hotels/{hotel_id}/quote", post(handlers::booking::quote))
        .route(
            "/hotels/{hotel_id}/bookings",
            get(handlers::booking::list).post(handlers::booking::submit),
        )
        .route("/bookings/{id}", get(handlers::booking::get))
        .route(
            "/bookings/{id}/status",
            patch(handlers::booking::update_status),
        )
}

/// Promo code checks and management
fn promo_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/hotels/{hotel_id}/promo-codes",
            get(handlers::promo::list).post(handlers::promo::create),
        )
        .route(
            "/hotels/{hotel_id}/promo-codes/validate",
            post(handlers::promo::validate),
        )
        .route(
            "/promo-codes/{id}",
            put(handlers::promo::update).delete(handlers::promo::delete),
        )
}

/// Room calendar
fn availability_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/rooms/{room_id}/availability",
            get(handlers::availability::month),
        )
        .route(
            "/rooms/{room_id}/availability/{date}",
            put(handlers::availability::update),
        )
        .route(
            "/rooms/{room_id}/availability/{date}/toggle",
            post(handlers::availability::toggle),
        )
}

/// Revenue reports
fn analytics_routes() -> Router<AppState> {
    Router::new().route(
        "/hotels/{hotel_id}/analytics",
        get(handlers::analytics::report),
    )
}
