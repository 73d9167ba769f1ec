//! # hotelsite-api
//!
//! HTTP API layer for HotelSite built on Axum.
//!
//! Provides the REST endpoints of the booking website and the owner
//! dashboard, middleware (CORS, compression, tracing, timeouts),
//! extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
