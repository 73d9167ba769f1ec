//! Hotel repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use hotelsite_core::error::{AppError, ErrorKind};
use hotelsite_core::result::AppResult;
use hotelsite_core::types::HotelId;
use hotelsite_entity::Validated;
use hotelsite_entity::hotel::Hotel;

use crate::store::HotelStore;

/// Repository for hotel lookups.
#[derive(Debug, Clone)]
pub struct HotelRepository {
    pool: PgPool,
}

impl HotelRepository {
    /// Create a new hotel repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HotelStore for HotelRepository {
    async fn find_hotel(&self, id: HotelId) -> AppResult<Option<Hotel>> {
        sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find hotel", e))?
            .map(Validated::validated)
            .transpose()
    }

    async fn find_hotel_by_slug(&self, slug: &str) -> AppResult<Option<Hotel>> {
        sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find hotel by slug", e)
            })?
            .map(Validated::validated)
            .transpose()
    }
}
