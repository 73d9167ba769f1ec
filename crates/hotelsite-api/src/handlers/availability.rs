//! Room calendar handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use validator::Validate;

use hotelsite_core::types::RoomId;
use hotelsite_service::{CalendarDay, MonthCalendar};

use super::{ApiResult, ok};
use crate::dto::request::{AvailabilityUpdateRequest, CalendarQuery};
use crate::state::AppState;

/// GET /api/rooms/{room_id}/availability?year=&month=
pub async fn month(
    State(state): State<AppState>,
    Path(room_id): Path<RoomId>,
    Query(query): Query<CalendarQuery>,
) -> ApiResult<MonthCalendar> {
    query.validate()?;
    ok(state
        .availability_service
        .month_calendar(room_id, query.year, query.month)
        .await?)
}

/// PUT /api/rooms/{room_id}/availability/{date}
pub async fn update(
    State(state): State<AppState>,
    Path((room_id, date)): Path<(RoomId, NaiveDate)>,
    Json(req): Json<AvailabilityUpdateRequest>,
) -> ApiResult<CalendarDay> {
    req.validate()?;
    ok(state
        .availability_service
        .update(room_id, date, req.into_patch())
        .await?)
}

/// POST /api/rooms/{room_id}/availability/{date}/toggle
pub async fn toggle(
    State(state): State<AppState>,
    Path((room_id, date)): Path<(RoomId, NaiveDate)>,
) -> ApiResult<CalendarDay> {
    ok(state.availability_service.toggle(room_id, date).await?)
}
