//! Promo code entity model.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use hotelsite_core::types::{HotelId, PromoCodeId};

use crate::validate::not_blank;

/// How a promo code discounts a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "discount_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// `discount_value` percent of the subtotal, within `[0, 100]`.
    Percentage,
    /// `discount_value` currency units, `>= 0`.
    Fixed,
}

impl DiscountType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A discount code scoped to one hotel.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Validate)]
#[validate(schema(function = "validate_promo_record"))]
pub struct PromoCode {
    /// Unique promo code identifier.
    pub id: PromoCodeId,
    /// Owning hotel.
    pub hotel_id: HotelId,
    /// The code guests type, stored upper-case.
    #[validate(custom(function = "not_blank"))]
    pub code: String,
    /// Discount kind.
    pub discount_type: DiscountType,
    /// Percentage or currency amount, depending on `discount_type`.
    pub discount_value: Decimal,
    /// Start of the validity window (inclusive).
    pub valid_from: DateTime<Utc>,
    /// End of the validity window (inclusive).
    pub valid_to: DateTime<Utc>,
    /// Maximum number of redemptions (`None` = unlimited).
    #[validate(range(min = 1))]
    pub usage_limit: Option<i32>,
    /// Redemptions so far.
    #[validate(range(min = 0))]
    pub used_count: i32,
    /// Whether the code is switched on.
    pub is_active: bool,
    /// When the code was created.
    pub created_at: DateTime<Utc>,
}

impl PromoCode {
    /// Remaining redemptions, or `None` when unlimited.
    pub fn remaining_uses(&self) -> Option<i32> {
        self.usage_limit
            .map(|limit| (limit - self.used_count).max(0))
    }
}

/// Data required to create a promo code.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_create_promo"))]
pub struct CreatePromoCode {
    /// Owning hotel.
    pub hotel_id: HotelId,
    /// Code as typed by the owner; normalized to upper-case on insert.
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub code: String,
    /// Discount kind.
    pub discount_type: DiscountType,
    /// Discount amount.
    pub discount_value: Decimal,
    /// Start of the validity window.
    pub valid_from: DateTime<Utc>,
    /// End of the validity window.
    pub valid_to: DateTime<Utc>,
    /// Redemption cap.
    #[validate(range(min = 1))]
    pub usage_limit: Option<i32>,
    /// Whether the code starts switched on.
    pub is_active: bool,
}

/// Full replacement of a promo code's editable fields.
///
/// `used_count` is not editable; it only moves through redemption.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_update_promo"))]
pub struct UpdatePromoCode {
    /// Code; normalized to upper-case.
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub code: String,
    /// Discount kind.
    pub discount_type: DiscountType,
    /// Discount amount.
    pub discount_value: Decimal,
    /// Start of the validity window.
    pub valid_from: DateTime<Utc>,
    /// End of the validity window.
    pub valid_to: DateTime<Utc>,
    /// Redemption cap.
    #[validate(range(min = 1))]
    pub usage_limit: Option<i32>,
    /// Active flag.
    pub is_active: bool,
}

/// Canonical form of a promo code: trimmed and upper-cased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

fn check_terms(
    discount_type: DiscountType,
    value: Decimal,
    valid_from: DateTime<Utc>,
    valid_to: DateTime<Utc>,
) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(terms_error("discount_value must not be negative"));
    }
    if discount_type == DiscountType::Percentage && value > Decimal::ONE_HUNDRED {
        return Err(terms_error("percentage discount must be within 0..=100"));
    }
    if valid_from > valid_to {
        return Err(terms_error("valid_from must not be after valid_to"));
    }
    Ok(())
}

fn terms_error(message: &'static str) -> ValidationError {
    let mut err = ValidationError::new("promo_terms");
    err.message = Some(message.into());
    err
}

fn validate_promo_record(promo: &PromoCode) -> Result<(), ValidationError> {
    check_terms(
        promo.discount_type,
        promo.discount_value,
        promo.valid_from,
        promo.valid_to,
    )
}

fn validate_create_promo(promo: &CreatePromoCode) -> Result<(), ValidationError> {
    check_terms(
        promo.discount_type,
        promo.discount_value,
        promo.valid_from,
        promo.valid_to,
    )
}

fn validate_update_promo(promo: &UpdatePromoCode) -> Result<(), ValidationError> {
    check_terms(
        promo.discount_type,
        promo.discount_value,
        promo.valid_from,
        promo.valid_to,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn create(discount_type: DiscountType, value: Decimal) -> CreatePromoCode {
        let now = Utc::now();
        CreatePromoCode {
            hotel_id: HotelId::new(),
            code: "summer24".to_string(),
            discount_type,
            discount_value: value,
            valid_from: now,
            valid_to: now + Duration::days(30),
            usage_limit: None,
            is_active: true,
        }
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("  summer24 "), "SUMMER24");
    }

    #[test]
    fn test_percentage_range() {
        assert!(create(DiscountType::Percentage, dec!(100)).validate().is_ok());
        assert!(create(DiscountType::Percentage, dec!(100.5)).validate().is_err());
        assert!(create(DiscountType::Fixed, dec!(5000)).validate().is_ok());
        assert!(create(DiscountType::Fixed, dec!(-1)).validate().is_err());
    }

    #[test]
    fn test_window_order() {
        let mut promo = create(DiscountType::Fixed, dec!(200));
        promo.valid_to = promo.valid_from - Duration::seconds(1);
        assert!(promo.validate().is_err());
    }

    #[test]
    fn test_usage_limit_must_be_positive() {
        let mut promo = create(DiscountType::Fixed, dec!(200));
        promo.usage_limit = Some(0);
        assert!(promo.validate().is_err());
    }
}
