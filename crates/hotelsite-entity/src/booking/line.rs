//! Rows attached to a booking: add-ons, package, and guests.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use hotelsite_core::types::{AddonId, BookingId, PackageId};

use crate::validate::{non_negative, not_blank};

/// An add-on purchased with a booking, priced at booking time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Validate)]
pub struct BookingAddon {
    /// Row identifier.
    pub id: Uuid,
    /// Owning booking.
    pub booking_id: BookingId,
    /// Purchased add-on.
    pub addon_id: AddonId,
    /// Units purchased.
    #[validate(range(min = 1))]
    pub quantity: i32,
    /// Unit price at booking time.
    #[validate(custom(function = "non_negative"))]
    pub price: Decimal,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

/// A package purchased with a booking.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Validate)]
pub struct BookingPackage {
    /// Row identifier.
    pub id: Uuid,
    /// Owning booking.
    pub booking_id: BookingId,
    /// Purchased package.
    pub package_id: PackageId,
    /// Always 1 for website bookings.
    #[validate(range(min = 1))]
    pub quantity: i32,
    /// Flat price at booking time.
    #[validate(custom(function = "non_negative"))]
    pub price: Decimal,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

/// Whether a guest row is the lead booker or a companion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "guest_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GuestType {
    /// The guest named on the booking.
    Primary,
    /// A companion listed during booking.
    Additional,
}

/// A guest listed on a booking.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Validate)]
pub struct BookingGuest {
    /// Row identifier.
    pub id: Uuid,
    /// Owning booking.
    pub booking_id: BookingId,
    /// Primary or additional.
    pub guest_type: GuestType,
    /// Full name.
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    /// Age in years.
    #[validate(range(min = 0, max = 150))]
    pub age: Option<i32>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

/// Add-on line to insert with a new booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBookingAddon {
    /// Purchased add-on.
    pub addon_id: AddonId,
    /// Units purchased.
    pub quantity: i32,
    /// Unit price at booking time.
    pub price: Decimal,
}

/// Package line to insert with a new booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBookingPackage {
    /// Purchased package.
    pub package_id: PackageId,
    /// Flat price at booking time.
    pub price: Decimal,
}

/// Additional guest to insert with a new booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewBookingGuest {
    /// Full name.
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    /// Age in years.
    #[validate(range(min = 0, max = 150))]
    pub age: Option<i32>,
}
