//! Booking entity model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use hotelsite_core::types::{BookingId, HotelId, PromoCodeId, RoomId};

use super::line::{NewBookingAddon, NewBookingGuest, NewBookingPackage};
use super::status::{BookingSource, BookingStatus, PaymentStatus};
use crate::validate::{non_negative, not_blank};

/// A guest booking as stored.
///
/// `total_amount` is not range-checked: with unclamped discounts a fixed
/// promo larger than the subtotal produces a negative total.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Validate)]
#[validate(schema(function = "validate_booking_stay"))]
pub struct Booking {
    /// Unique booking identifier.
    pub id: BookingId,
    /// Human-facing reference (`BK12345678`).
    pub booking_reference: String,
    /// Hotel the booking belongs to.
    pub hotel_id: HotelId,
    /// Booked room; `None` once the room has been deleted.
    pub room_id: Option<RoomId>,
    /// Lead guest name.
    #[validate(custom(function = "not_blank"))]
    pub guest_name: String,
    /// Lead guest email.
    #[validate(email)]
    pub guest_email: String,
    /// Lead guest phone.
    #[validate(custom(function = "not_blank"))]
    pub guest_phone: String,
    /// Arrival date.
    pub check_in: NaiveDate,
    /// Departure date (exclusive).
    pub check_out: NaiveDate,
    /// Adults plus children.
    #[validate(range(min = 1))]
    pub num_guests: i32,
    /// Rooms booked.
    #[validate(range(min = 1))]
    pub num_rooms: i32,
    /// Adults.
    #[validate(range(min = 1))]
    pub num_adults: i32,
    /// Children.
    #[validate(range(min = 0))]
    pub num_children: i32,
    /// Amount charged after discount.
    pub total_amount: Decimal,
    /// Discount applied by the promo code.
    #[validate(custom(function = "non_negative"))]
    pub discount_amount: Decimal,
    /// Promo code applied, if any.
    pub promo_code: Option<String>,
    /// Payment state.
    pub payment_status: PaymentStatus,
    /// Booking lifecycle state.
    pub status: BookingStatus,
    /// Free-text requests from the guest.
    pub special_requests: Option<String>,
    /// Early check-in requested.
    pub early_checkin: bool,
    /// Late check-out requested.
    pub late_checkout: bool,
    /// Floor / bed type / view preferences as entered by the guest.
    pub room_preferences: serde_json::Value,
    /// Why the booking was cancelled.
    pub cancellation_reason: Option<String>,
    /// When the booking was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Booking channel.
    pub booking_source: BookingSource,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Number of nights of the stay.
    pub fn nights(&self) -> i64 {
        stay_nights(self.check_in, self.check_out)
    }
}

/// Whole days between check-in and check-out.
pub fn stay_nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Data required to create a booking together with its attached rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    /// Generated reference.
    pub booking_reference: String,
    /// Hotel.
    pub hotel_id: HotelId,
    /// Room.
    pub room_id: RoomId,
    /// Lead guest name.
    pub guest_name: String,
    /// Lead guest email.
    pub guest_email: String,
    /// Lead guest phone.
    pub guest_phone: String,
    /// Arrival date.
    pub check_in: NaiveDate,
    /// Departure date.
    pub check_out: NaiveDate,
    /// Rooms booked.
    pub num_rooms: i32,
    /// Adults.
    pub num_adults: i32,
    /// Children.
    pub num_children: i32,
    /// Amount charged.
    pub total_amount: Decimal,
    /// Discount applied.
    pub discount_amount: Decimal,
    /// Promo code applied.
    pub promo_code: Option<String>,
    /// Promo code to redeem in the same write as the insert.
    pub promo_code_id: Option<PromoCodeId>,
    /// Initial payment state.
    pub payment_status: PaymentStatus,
    /// Initial lifecycle state.
    pub status: BookingStatus,
    /// Guest requests.
    pub special_requests: Option<String>,
    /// Early check-in requested.
    pub early_checkin: bool,
    /// Late check-out requested.
    pub late_checkout: bool,
    /// Room preferences.
    pub room_preferences: serde_json::Value,
    /// Booking channel.
    pub booking_source: BookingSource,
    /// Add-on lines.
    pub addons: Vec<NewBookingAddon>,
    /// Package line.
    pub package: Option<NewBookingPackage>,
    /// Additional guests.
    pub guests: Vec<NewBookingGuest>,
}

impl CreateBooking {
    /// Adults plus children, saturating at `i32::MAX`.
    pub fn num_guests(&self) -> i32 {
        self.num_adults.saturating_add(self.num_children)
    }
}

fn validate_booking_stay(booking: &Booking) -> Result<(), ValidationError> {
    if booking.check_out <= booking.check_in {
        let mut err = ValidationError::new("stay_dates");
        err.message = Some("check_out must be after check_in".into());
        return Err(err);
    }
    Ok(())
}
