//! Analytics handler.

use axum::extract::{Path, Query, State};
use chrono::Utc;

use hotelsite_core::types::HotelId;
use hotelsite_service::AnalyticsReport;

use super::{ApiResult, ok};
use crate::dto::request::AnalyticsQuery;
use crate::state::AppState;

/// GET /api/hotels/{hotel_id}/analytics?period=week|month|year
pub async fn report(
    State(state): State<AppState>,
    Path(hotel_id): Path<HotelId>,
    Query(query): Query<AnalyticsQuery>,
) -> ApiResult<AnalyticsReport> {
    ok(state
        .analytics_service
        .report(hotel_id, query.period, Utc::now())
        .await?)
}
