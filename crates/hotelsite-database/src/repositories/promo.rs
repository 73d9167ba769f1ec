//! Promo code repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use hotelsite_core::error::{AppError, ErrorKind};
use hotelsite_core::result::AppResult;
use hotelsite_core::types::{HotelId, PromoCodeId};
use hotelsite_entity::Validated;
use hotelsite_entity::promo::{CreatePromoCode, PromoCode, UpdatePromoCode};

use super::{validated_all, write_error};
use crate::store::PromoCodeStore;

/// Repository for promo code CRUD and lookup by code.
#[derive(Debug, Clone)]
pub struct PromoCodeRepository {
    pool: PgPool,
}

impl PromoCodeRepository {
    /// Create a new promo code repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromoCodeStore for PromoCodeRepository {
    async fn find_promo_code(&self, id: PromoCodeId) -> AppResult<Option<PromoCode>> {
        sqlx::query_as::<_, PromoCode>("SELECT * FROM promo_codes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find promo code", e))?
            .map(Validated::validated)
            .transpose()
    }

    async fn find_promo_code_by_code(
        &self,
        hotel_id: HotelId,
        code: &str,
    ) -> AppResult<Option<PromoCode>> {
        sqlx::query_as::<_, PromoCode>(
            "SELECT * FROM promo_codes WHERE hotel_id = $1 AND code = $2",
        )
        .bind(hotel_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find promo code by code", e)
        })?
        .map(Validated::validated)
        .transpose()
    }

    async fn list_promo_codes(&self, hotel_id: HotelId) -> AppResult<Vec<PromoCode>> {
        let codes = sqlx::query_as::<_, PromoCode>(
            "SELECT * FROM promo_codes WHERE hotel_id = $1 ORDER BY created_at DESC",
        )
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list promo codes", e))?;
        validated_all(codes)
    }

    async fn create_promo_code(&self, data: &CreatePromoCode) -> AppResult<PromoCode> {
        sqlx::query_as::<_, PromoCode>(
            "INSERT INTO promo_codes (id, hotel_id, code, discount_type, discount_value, \
             valid_from, valid_to, usage_limit, used_count, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, $9) RETURNING *",
        )
        .bind(PromoCodeId::new())
        .bind(data.hotel_id)
        .bind(&data.code)
        .bind(data.discount_type)
        .bind(data.discount_value)
        .bind(data.valid_from)
        .bind(data.valid_to)
        .bind(data.usage_limit)
        .bind(data.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "create promo code", "Promo code already exists"))?
        .validated()
    }

    async fn update_promo_code(
        &self,
        id: PromoCodeId,
        data: &UpdatePromoCode,
    ) -> AppResult<Option<PromoCode>> {
        sqlx::query_as::<_, PromoCode>(
            "UPDATE promo_codes SET code = $2, discount_type = $3, discount_value = $4, \
             valid_from = $5, valid_to = $6, usage_limit = $7, is_active = $8 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.code)
        .bind(data.discount_type)
        .bind(data.discount_value)
        .bind(data.valid_from)
        .bind(data.valid_to)
        .bind(data.usage_limit)
        .bind(data.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, "update promo code", "Promo code already exists"))?
        .map(Validated::validated)
        .transpose()
    }

    async fn delete_promo_code(&self, id: PromoCodeId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM promo_codes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete promo code", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
