//! Availability entity model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use hotelsite_core::types::{AvailabilityId, RoomId};

use crate::validate::non_negative;

/// Override row for one room on one date. Dates without a row use the
/// room defaults (available, room price, minimum stay of one night).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Validate)]
pub struct Availability {
    /// Row identifier.
    pub id: AvailabilityId,
    /// Room the override applies to.
    pub room_id: RoomId,
    /// Calendar date.
    pub date: NaiveDate,
    /// Whether the room can be booked on this date.
    pub is_available: bool,
    /// Nightly price replacing the room price, if set.
    #[validate(custom(function = "non_negative"))]
    pub price_override: Option<Decimal>,
    /// Minimum nights for stays starting on this date.
    #[validate(range(min = 1))]
    pub min_stay: i32,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

/// Change applied to a room/date pair. Absent fields keep their current
/// value (or the default when the row does not exist yet).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityPatch {
    /// New availability flag.
    pub is_available: Option<bool>,
    /// New price override; `Some(None)` clears it.
    pub price_override: Option<Option<Decimal>>,
    /// New minimum stay.
    pub min_stay: Option<i32>,
}

impl AvailabilityPatch {
    /// Apply the patch to an existing row, or to the defaults.
    pub fn apply(&self, current: Option<&Availability>) -> (bool, Option<Decimal>, i32) {
        let (is_available, price_override, min_stay) = current
            .map(|row| (row.is_available, row.price_override, row.min_stay))
            .unwrap_or((true, None, 1));
        (
            self.is_available.unwrap_or(is_available),
            self.price_override.unwrap_or(price_override),
            self.min_stay.unwrap_or(min_stay),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_patch_on_defaults() {
        let patch = AvailabilityPatch {
            is_available: Some(false),
            ..Default::default()
        };
        assert_eq!(patch.apply(None), (false, None, 1));
    }

    #[test]
    fn test_patch_clears_override() {
        let row = Availability {
            id: AvailabilityId::new(),
            room_id: RoomId::new(),
            date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
            is_available: false,
            price_override: Some(dec!(2500)),
            min_stay: 2,
            created_at: Utc::now(),
        };
        let patch = AvailabilityPatch {
            price_override: Some(None),
            ..Default::default()
        };
        assert_eq!(patch.apply(Some(&row)), (false, None, 2));
    }
}
