//! Add-on entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use hotelsite_core::types::{AddonId, HotelId};

use crate::validate::{non_negative, not_blank};

/// An optional paid extra (service, food, transport) priced per unit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Validate)]
pub struct Addon {
    /// Unique add-on identifier.
    pub id: AddonId,
    /// Owning hotel.
    pub hotel_id: HotelId,
    /// Name shown to guests.
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Unit price.
    #[validate(custom(function = "non_negative"))]
    pub price: Decimal,
    /// Free-form category (`service`, `food`, `transport`, ...).
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub addon_type: String,
    /// Whether the add-on is offered.
    pub is_active: bool,
    /// When the add-on was created.
    pub created_at: DateTime<Utc>,
}
