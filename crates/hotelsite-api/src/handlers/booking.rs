//! Quote, submission and booking management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use validator::Validate;

use hotelsite_core::types::{BookingId, HotelId};
use hotelsite_entity::booking::Booking;
use hotelsite_service::booking::DraftQuote;
use hotelsite_service::{BookingConfirmation, BookingDetails};

use super::{ApiResult, ok};
use crate::dto::request::{BookingListQuery, DraftRequest, UpdateStatusRequest};
use crate::dto::response::{ApiResponse, PaginatedResponse};
use crate::error::ApiError;
use crate::extractors::PaginationParams;
use crate::state::AppState;

/// POST /api/hotels/{hotel_id}/quote
pub async fn quote(
    State(state): State<AppState>,
    Path(hotel_id): Path<HotelId>,
    Json(req): Json<DraftRequest>,
) -> ApiResult<DraftQuote> {
    req.validate()?;
    let draft = req.into_draft();
    ok(state
        .booking_service
        .quote(hotel_id, &draft, Utc::now())
        .await?)
}

/// POST /api/hotels/{hotel_id}/bookings
pub async fn submit(
    State(state): State<AppState>,
    Path(hotel_id): Path<HotelId>,
    Json(req): Json<DraftRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingConfirmation>>), ApiError> {
    req.validate()?;
    let draft = req.into_draft();
    let confirmation = state
        .booking_service
        .submit(hotel_id, &draft, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(confirmation))))
}

/// GET /api/hotels/{hotel_id}/bookings?status=&page=&per_page=
pub async fn list(
    State(state): State<AppState>,
    Path(hotel_id): Path<HotelId>,
    Query(filter): Query<BookingListQuery>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<Booking>> {
    let page = state
        .booking_service
        .list(hotel_id, filter.status, &params.into_page_request())
        .await?;
    ok(page.into())
}

/// GET /api/bookings/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<BookingId>,
) -> ApiResult<BookingDetails> {
    ok(state.booking_service.get(id).await?)
}

/// PATCH /api/bookings/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<BookingId>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Booking> {
    req.validate()?;
    ok(state
        .booking_service
        .update_status(id, req.status, req.cancellation_reason.as_deref(), Utc::now())
        .await?)
}
