//! Room entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use hotelsite_core::types::{HotelId, RoomId};

use crate::validate::{non_negative, not_blank};

/// A bookable room type with its nightly rate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Validate)]
pub struct Room {
    /// Unique room identifier.
    pub id: RoomId,
    /// Owning hotel.
    pub hotel_id: HotelId,
    /// Room title shown to guests.
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Nightly rate.
    #[validate(custom(function = "non_negative"))]
    pub price: Decimal,
    /// Maximum guests per room.
    #[validate(range(min = 1))]
    pub max_guests: i32,
    /// Whether the room is offered on the website.
    pub is_available: bool,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
    /// When the room was last updated.
    pub updated_at: DateTime<Utc>,
}
