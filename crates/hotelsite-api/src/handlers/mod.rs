//! Route handlers organized by domain.

use axum::Json;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;

pub mod analytics;
pub mod availability;
pub mod booking;
pub mod health;
pub mod hotel;
pub mod promo;

/// Result type of every JSON handler.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Wrap `data` in the success envelope.
pub(crate) fn ok<T: serde::Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::ok(data)))
}
