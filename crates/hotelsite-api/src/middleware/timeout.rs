//! Request timeout layer.

use std::time::Duration;

use tower_http::timeout::TimeoutLayer;

use hotelsite_core::config::ServerConfig;

/// Fails requests that run longer than the configured timeout with
/// `408 Request Timeout`.
pub fn build_timeout_layer(config: &ServerConfig) -> TimeoutLayer {
    TimeoutLayer::new(Duration::from_secs(config.request_timeout_seconds.max(1)))
}
