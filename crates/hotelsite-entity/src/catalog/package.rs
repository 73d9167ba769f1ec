//! Package entity model.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use hotelsite_core::types::{HotelId, PackageId};

use crate::validate::{non_negative, not_blank};

/// Kind of package bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "package_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PackageType {
    /// Couples' stay.
    Honeymoon,
    /// Family stay.
    Family,
    /// Business travel.
    Business,
    /// Weekend getaway.
    Weekend,
    /// Anything else.
    Custom,
}

impl PackageType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Honeymoon => "honeymoon",
            Self::Family => "family",
            Self::Business => "business",
            Self::Weekend => "weekend",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A flat-priced bundle of included items, selected at most once per booking.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Validate)]
pub struct Package {
    /// Unique package identifier.
    pub id: PackageId,
    /// Owning hotel.
    pub hotel_id: HotelId,
    /// Name shown to guests.
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Package kind.
    pub package_type: PackageType,
    /// Items included in the bundle.
    pub included_items: Vec<String>,
    /// Flat price.
    #[validate(custom(function = "non_negative"))]
    pub price: Decimal,
    /// How many days after booking the package may be used.
    #[validate(range(min = 1))]
    pub validity_days: Option<i32>,
    /// Whether the package is offered.
    pub is_active: bool,
    /// When the package was created.
    pub created_at: DateTime<Utc>,
    /// When the package was last updated.
    pub updated_at: DateTime<Utc>,
}
