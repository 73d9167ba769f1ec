//! Promo code handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use validator::Validate;

use hotelsite_core::types::{HotelId, PromoCodeId};
use hotelsite_entity::promo::PromoCode;

use super::{ApiResult, ok};
use crate::dto::request::{PromoCodeRequest, ValidatePromoRequest};
use crate::dto::response::{ApiResponse, MessageResponse, PromoValidationResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/hotels/{hotel_id}/promo-codes/validate
pub async fn validate(
    State(state): State<AppState>,
    Path(hotel_id): Path<HotelId>,
    Json(req): Json<ValidatePromoRequest>,
) -> ApiResult<PromoValidationResponse> {
    req.validate()?;
    let eligibility = state
        .promo_service
        .check_eligibility(hotel_id, &req.code, Utc::now())
        .await?;
    ok(eligibility.into())
}

/// GET /api/hotels/{hotel_id}/promo-codes
pub async fn list(
    State(state): State<AppState>,
    Path(hotel_id): Path<HotelId>,
) -> ApiResult<Vec<PromoCode>> {
    ok(state.promo_service.list(hotel_id).await?)
}

/// POST /api/hotels/{hotel_id}/promo-codes
pub async fn create(
    State(state): State<AppState>,
    Path(hotel_id): Path<HotelId>,
    Json(req): Json<PromoCodeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PromoCode>>), ApiError> {
    req.validate()?;
    let promo = state.promo_service.create(req.into_create(hotel_id)).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(promo))))
}

/// PUT /api/promo-codes/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<PromoCodeId>,
    Json(req): Json<PromoCodeRequest>,
) -> ApiResult<PromoCode> {
    req.validate()?;
    ok(state.promo_service.update(id, req.into_update()).await?)
}

/// DELETE /api/promo-codes/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<PromoCodeId>,
) -> ApiResult<MessageResponse> {
    state.promo_service.delete(id).await?;
    ok(MessageResponse {
        message: "Promo code deleted".to_string(),
    })
}
