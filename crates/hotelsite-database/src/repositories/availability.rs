//! Availability repository implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use hotelsite_core::error::{AppError, ErrorKind};
use hotelsite_core::result::AppResult;
use hotelsite_core::types::{AvailabilityId, RoomId};
use hotelsite_entity::Validated;
use hotelsite_entity::availability::{Availability, AvailabilityPatch};

use super::validated_all;
use crate::store::AvailabilityStore;

/// Repository for per-date room overrides.
#[derive(Debug, Clone)]
pub struct AvailabilityRepository {
    pool: PgPool,
}

impl AvailabilityRepository {
    /// Create a new availability repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityStore for AvailabilityRepository {
    async fn list_availability(
        &self,
        room_id: RoomId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<Availability>> {
        let rows = sqlx::query_as::<_, Availability>(
            "SELECT * FROM availability WHERE room_id = $1 AND date >= $2 AND date <= $3 \
             ORDER BY date ASC",
        )
        .bind(room_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list availability", e))?;
        validated_all(rows)
    }

    async fn find_availability(
        &self,
        room_id: RoomId,
        date: NaiveDate,
    ) -> AppResult<Option<Availability>> {
        sqlx::query_as::<_, Availability>(
            "SELECT * FROM availability WHERE room_id = $1 AND date = $2",
        )
        .bind(room_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find availability", e))?
        .map(Validated::validated)
        .transpose()
    }

    async fn upsert_availability(
        &self,
        room_id: RoomId,
        date: NaiveDate,
        patch: &AvailabilityPatch,
    ) -> AppResult<Availability> {
        let (is_available, price_override, min_stay) = patch.apply(None);
        sqlx::query_as::<_, Availability>(
            "INSERT INTO availability (id, room_id, date, is_available, price_override, min_stay) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (room_id, date) DO UPDATE SET \
             is_available = CASE WHEN $7 THEN EXCLUDED.is_available ELSE availability.is_available END, \
             price_override = CASE WHEN $8 THEN EXCLUDED.price_override ELSE availability.price_override END, \
             min_stay = CASE WHEN $9 THEN EXCLUDED.min_stay ELSE availability.min_stay END \
             RETURNING *",
        )
        .bind(AvailabilityId::new())
        .bind(room_id)
        .bind(date)
        .bind(is_available)
        .bind(price_override)
        .bind(min_stay)
        .bind(patch.is_available.is_some())
        .bind(patch.price_override.is_some())
        .bind(patch.min_stay.is_some())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert availability", e))?
        .validated()
    }
}
