//! Public hotel lookup and catalog handlers.

use axum::extract::{Path, State};

use hotelsite_core::types::HotelId;
use hotelsite_entity::hotel::Hotel;
use hotelsite_service::HotelCatalog;

use super::{ApiResult, ok};
use crate::state::AppState;

/// GET /api/sites/{slug}
pub async fn get_site(State(state): State<AppState>, Path(slug): Path<String>) -> ApiResult<Hotel> {
    ok(state.catalog_service.published_hotel(&slug).await?)
}

/// GET /api/hotels/{hotel_id}/catalog
pub async fn get_catalog(
    State(state): State<AppState>,
    Path(hotel_id): Path<HotelId>,
) -> ApiResult<HotelCatalog> {
    ok(state.catalog_service.catalog(hotel_id).await?)
}
