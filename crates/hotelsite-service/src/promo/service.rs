//! Promo code service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use validator::Validate;

use hotelsite_core::error::AppError;
use hotelsite_core::types::{HotelId, PromoCodeId};
use hotelsite_database::PromoCodeStore;
use hotelsite_entity::promo::{
    CreatePromoCode, Ineligibility, PromoCode, UpdatePromoCode, normalize_code,
};

/// Message shown to guests for every rejected promo code.
pub const PROMO_REJECTED: &str = "Invalid or expired promo code";

/// Outcome of an eligibility check. Rejections carry no reason.
#[derive(Debug, Clone)]
pub enum PromoEligibility {
    /// The code can be applied.
    Eligible(PromoCode),
    /// The code cannot be applied.
    NotEligible,
}

impl PromoEligibility {
    /// The resolved code, if eligible.
    pub fn into_promo(self) -> Option<PromoCode> {
        match self {
            Self::Eligible(promo) => Some(promo),
            Self::NotEligible => None,
        }
    }
}

/// Looks up, checks and manages promo codes.
#[derive(Clone)]
pub struct PromoService {
    /// Promo code store.
    store: Arc<dyn PromoCodeStore>,
}

impl PromoService {
    /// Creates a new promo service.
    pub fn new(store: Arc<dyn PromoCodeStore>) -> Self {
        Self { store }
    }

    /// Check whether `code` can be applied to a booking at `hotel_id` at
    /// `now`. Lookup is case-insensitive.
    pub async fn check_eligibility(
        &self,
        hotel_id: HotelId,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<PromoEligibility, AppError> {
        let code = normalize_code(code);
        if code.is_empty() {
            return Ok(PromoEligibility::NotEligible);
        }

        let verdict = match self.store.find_promo_code_by_code(hotel_id, &code).await? {
            None => Err(Ineligibility::Unknown),
            Some(promo) => promo.check_redeemable_at(now).map(|()| promo),
        };

        match verdict {
            Ok(promo) => {
                debug!(hotel_id = %hotel_id, code = %code, "Promo code eligible");
                Ok(PromoEligibility::Eligible(promo))
            }
            Err(reason) => {
                debug!(hotel_id = %hotel_id, code = %code, reason = %reason, "Promo code rejected");
                Ok(PromoEligibility::NotEligible)
            }
        }
    }

    /// Promo codes of a hotel, newest first.
    pub async fn list(&self, hotel_id: HotelId) -> Result<Vec<PromoCode>, AppError> {
        self.store.list_promo_codes(hotel_id).await
    }

    /// Create a promo code. The code is stored upper-case with no uses.
    pub async fn create(&self, mut data: CreatePromoCode) -> Result<PromoCode, AppError> {
        data.code = normalize_code(&data.code);
        data.validate()?;

        let promo = self.store.create_promo_code(&data).await?;
        info!(
            hotel_id = %promo.hotel_id,
            promo_code_id = %promo.id,
            code = %promo.code,
            "Promo code created"
        );
        Ok(promo)
    }

    /// Replace the editable fields of a promo code.
    pub async fn update(
        &self,
        id: PromoCodeId,
        mut data: UpdatePromoCode,
    ) -> Result<PromoCode, AppError> {
        data.code = normalize_code(&data.code);
        data.validate()?;

        let promo = self
            .store
            .update_promo_code(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Promo code not found"))?;
        info!(promo_code_id = %id, code = %promo.code, "Promo code updated");
        Ok(promo)
    }

    /// Delete a promo code.
    pub async fn delete(&self, id: PromoCodeId) -> Result<(), AppError> {
        if !self.store.delete_promo_code(id).await? {
            return Err(AppError::not_found("Promo code not found"));
        }
        info!(promo_code_id = %id, "Promo code deleted");
        Ok(())
    }
}
