//! Room, add-on and package repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use hotelsite_core::error::{AppError, ErrorKind};
use hotelsite_core::result::AppResult;
use hotelsite_core::types::{HotelId, RoomId};
use hotelsite_entity::Validated;
use hotelsite_entity::catalog::{Addon, Package};
use hotelsite_entity::room::Room;

use super::validated_all;
use crate::store::CatalogStore;

/// Repository for the bookable catalog of a hotel.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    /// Create a new catalog repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for CatalogRepository {
    async fn find_room(&self, id: RoomId) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find room", e))?
            .map(Validated::validated)
            .transpose()
    }

    async fn list_rooms(&self, hotel_id: HotelId) -> AppResult<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms WHERE hotel_id = $1 ORDER BY title ASC",
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list rooms", e))?;
        validated_all(rooms)
    }

    async fn list_active_addons(&self, hotel_id: HotelId) -> AppResult<Vec<Addon>> {
        let addons = sqlx::query_as::<_, Addon>(
            "SELECT * FROM addons WHERE hotel_id = $1 AND is_active = TRUE ORDER BY name ASC",
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list add-ons", e))?;
        validated_all(addons)
    }

    async fn list_active_packages(&self, hotel_id: HotelId) -> AppResult<Vec<Package>> {
        let packages = sqlx::query_as::<_, Package>(
            "SELECT * FROM packages WHERE hotel_id = $1 AND is_active = TRUE ORDER BY name ASC",
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list packages", e))?;
        validated_all(packages)
    }
}
