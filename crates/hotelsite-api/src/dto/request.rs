//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use hotelsite_core::types::HotelId;
use hotelsite_entity::availability::AvailabilityPatch;
use hotelsite_entity::booking::BookingStatus;
use hotelsite_entity::promo::{CreatePromoCode, DiscountType, UpdatePromoCode};
use hotelsite_service::{AnalyticsPeriod, BookingDraft, DraftEdit};

/// Draft sent to the quote and booking endpoints.
///
/// `edits` are applied to `draft` in order, so a client may send either a
/// full draft, a list of edits from an empty draft, or both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DraftRequest {
    /// Starting draft.
    #[serde(default)]
    pub draft: BookingDraft,
    /// Edits replayed on top of `draft`.
    #[serde(default)]
    #[validate(length(max = 200, message = "Too many edits"))]
    pub edits: Vec<DraftEdit>,
}

impl DraftRequest {
    /// The draft after replaying every edit.
    pub fn into_draft(self) -> BookingDraft {
        self.draft.apply_all(self.edits)
    }
}

/// Promo code eligibility check.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ValidatePromoRequest {
    /// Code as typed by the guest.
    #[validate(length(min = 1, max = 50, message = "Promo code is required"))]
    pub code: String,
}

/// Create or replace a promo code.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PromoCodeRequest {
    /// Code; stored upper-case.
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    /// Percentage or fixed amount.
    pub discount_type: DiscountType,
    /// Percent (0-100) or currency amount.
    pub discount_value: Decimal,
    /// Start of validity.
    pub valid_from: DateTime<Utc>,
    /// End of validity.
    pub valid_to: DateTime<Utc>,
    /// Maximum redemptions, unlimited when absent.
    #[validate(range(min = 1))]
    pub usage_limit: Option<i32>,
    /// Whether the code can be redeemed.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl PromoCodeRequest {
    /// Insert payload for `hotel_id`.
    pub fn into_create(self, hotel_id: HotelId) -> CreatePromoCode {
        CreatePromoCode {
            hotel_id,
            code: self.code,
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            valid_from: self.valid_from,
            valid_to: self.valid_to,
            usage_limit: self.usage_limit,
            is_active: self.is_active,
        }
    }

    /// Update payload.
    pub fn into_update(self) -> UpdatePromoCode {
        UpdatePromoCode {
            code: self.code,
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            valid_from: self.valid_from,
            valid_to: self.valid_to,
            usage_limit: self.usage_limit,
            is_active: self.is_active,
        }
    }
}

/// Booking status change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    /// New status.
    pub status: BookingStatus,
    /// Reason recorded when cancelling.
    #[validate(length(max = 500))]
    pub cancellation_reason: Option<String>,
}

/// Query for the booking list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingListQuery {
    /// Only bookings in this status.
    pub status: Option<BookingStatus>,
}

/// Query for a room's month calendar.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CalendarQuery {
    /// Calendar year.
    #[validate(range(min = 2000, max = 2100))]
    pub year: i32,
    /// Calendar month.
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
}

/// Query for the analytics report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsQuery {
    /// Reporting window, `month` when absent.
    #[serde(default)]
    pub period: AnalyticsPeriod,
}

/// Change to one room/date. Absent fields are left as they are;
/// `"price_override": null` clears the override.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AvailabilityUpdateRequest {
    /// New availability flag.
    pub is_available: Option<bool>,
    /// New nightly price override.
    #[serde(default, deserialize_with = "double_option")]
    pub price_override: Option<Option<Decimal>>,
    /// New minimum stay.
    #[validate(range(min = 1))]
    pub min_stay: Option<i32>,
}

impl AvailabilityUpdateRequest {
    /// Store patch for this request.
    pub fn into_patch(self) -> AvailabilityPatch {
        AvailabilityPatch {
            is_available: self.is_available,
            price_override: self.price_override,
            min_stay: self.min_stay,
        }
    }
}

/// Distinguishes a missing field (`None`) from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_override_null_vs_missing() {
        let cleared: AvailabilityUpdateRequest =
            serde_json::from_str(r#"{"price_override": null}"#).unwrap();
        assert_eq!(cleared.price_override, Some(None));

        let untouched: AvailabilityUpdateRequest =
            serde_json::from_str(r#"{"is_available": false}"#).unwrap();
        assert_eq!(untouched.price_override, None);

        let priced: AvailabilityUpdateRequest =
            serde_json::from_str(r#"{"price_override": "2500.00"}"#).unwrap();
        assert_eq!(priced.price_override, Some(Some(dec!(2500))));
    }

    #[test]
    fn test_draft_request_replays_edits() {
        let request: DraftRequest = serde_json::from_str(
            r#"{"edits": [
                {"type": "set_room_count", "rooms": 2},
                {"type": "set_promo_code", "code": " summer "}
            ]}"#,
        )
        .unwrap();
        let draft = request.into_draft();
        assert_eq!(draft.num_rooms, 2);
        assert_eq!(draft.promo_code, "SUMMER");
    }

    #[test]
    fn test_calendar_query_month_range() {
        let query = CalendarQuery {
            year: 2024,
            month: 13,
        };
        assert!(query.validate().is_err());
    }
}
