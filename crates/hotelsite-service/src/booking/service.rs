//! Booking submission and management.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use hotelsite_core::error::{AppError, ErrorKind};
use hotelsite_core::types::{BookingId, HotelId, PageRequest, PageResponse, RoomId};
use hotelsite_database::{BookingStore, CatalogStore, HotelStore, PROMO_NOT_REDEEMABLE};
use hotelsite_entity::booking::{
    Booking, BookingAddon, BookingGuest, BookingPackage, BookingSource, BookingStatus,
    CreateBooking, NewBookingAddon, NewBookingGuest, NewBookingPackage, PaymentStatus,
};
use hotelsite_entity::catalog::{Addon, Package};
use hotelsite_entity::promo::PromoCode;
use hotelsite_entity::room::Room;

use super::draft::{BookingDraft, StaySelection};
use super::reference::generate_reference;
use crate::pricing::{PricingRules, Quote};
use crate::promo::PromoService;
use crate::promo::service::PROMO_REJECTED;

/// Attempts at drawing an unused booking reference.
const MAX_REFERENCE_ATTEMPTS: usize = 3;

/// Quote of a draft together with the promo code that was applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftQuote {
    /// Price breakdown.
    pub quote: Quote,
    /// Code applied to the quote; `None` when absent or not eligible.
    pub applied_promo_code: Option<String>,
}

/// Result of a successful submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    /// The stored booking.
    pub booking: Booking,
    /// The quote the booking was priced with.
    pub quote: Quote,
}

/// A booking with its attached lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetails {
    /// The booking.
    pub booking: Booking,
    /// Add-on lines.
    pub addons: Vec<BookingAddon>,
    /// Package line.
    pub package: Option<BookingPackage>,
    /// Additional guests.
    pub guests: Vec<BookingGuest>,
}

/// Quotes, submits and manages bookings.
#[derive(Clone)]
pub struct BookingService {
    hotels: Arc<dyn HotelStore>,
    catalog: Arc<dyn CatalogStore>,
    bookings: Arc<dyn BookingStore>,
    promos: PromoService,
    rules: PricingRules,
    reference_prefix: String,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(
        hotels: Arc<dyn HotelStore>,
        catalog: Arc<dyn CatalogStore>,
        bookings: Arc<dyn BookingStore>,
        promos: PromoService,
        rules: PricingRules,
        reference_prefix: impl Into<String>,
    ) -> Self {
        Self {
            hotels,
            catalog,
            bookings,
            promos,
            rules,
            reference_prefix: reference_prefix.into(),
        }
    }

    /// Pricing rules in effect.
    pub fn rules(&self) -> &PricingRules {
        &self.rules
    }

    /// Quote a draft against the hotel's live catalog. A promo code that is
    /// not eligible is left out of the quote instead of failing it.
    pub async fn quote(
        &self,
        hotel_id: HotelId,
        draft: &BookingDraft,
        now: DateTime<Utc>,
    ) -> Result<DraftQuote, AppError> {
        draft.check_limits()?;
        let room_id = draft
            .room_id
            .ok_or_else(|| AppError::validation("Please select a room"))?;
        let room = self.hotel_room(hotel_id, room_id).await?;
        let (addons, packages) = self.active_extras(hotel_id).await?;

        let promo = if draft.has_promo_code() {
            self.promos
                .check_eligibility(hotel_id, &draft.promo_code, now)
                .await?
                .into_promo()
        } else {
            None
        };

        let quote = draft.quote(&room, &addons, &packages, promo.as_ref(), &self.rules);
        Ok(DraftQuote {
            quote,
            applied_promo_code: promo.map(|p| p.code),
        })
    }

    /// Submit a draft as a confirmed website booking.
    ///
    /// Nothing is written unless the draft is complete, the room belongs to
    /// the hotel and is open, and any typed promo code is still redeemable.
    pub async fn submit(
        &self,
        hotel_id: HotelId,
        draft: &BookingDraft,
        now: DateTime<Utc>,
    ) -> Result<BookingConfirmation, AppError> {
        let stay = draft.validate_for_submission()?;

        let hotel = self
            .hotels
            .find_hotel(hotel_id)
            .await?
            .ok_or_else(|| AppError::not_found("Hotel not found"))?;
        if !hotel.accepts_bookings() {
            return Err(AppError::validation("Hotel is not accepting bookings"));
        }

        let room = self.hotel_room(hotel_id, stay.room_id).await?;
        if !room.is_available {
            return Err(AppError::validation("Room is not available for booking"));
        }
        let (addons, packages) = self.active_extras(hotel_id).await?;

        let promo = if draft.has_promo_code() {
            let promo = self
                .promos
                .check_eligibility(hotel_id, &draft.promo_code, now)
                .await?
                .into_promo()
                .ok_or_else(|| AppError::validation(PROMO_REJECTED))?;
            Some(promo)
        } else {
            None
        };

        let quote = draft.quote(&room, &addons, &packages, promo.as_ref(), &self.rules);
        let mut data = new_booking(
            hotel_id,
            &stay,
            draft,
            &quote,
            promo.as_ref(),
            &addons,
            &packages,
        )?;

        for attempt in 1..=MAX_REFERENCE_ATTEMPTS {
            data.booking_reference = generate_reference(&self.reference_prefix);
            match self.bookings.create_booking(&data, now).await {
                Ok(booking) => {
                    info!(
                        hotel_id = %hotel_id,
                        booking_id = %booking.id,
                        reference = %booking.booking_reference,
                        total = %booking.total_amount,
                        promo_code = ?booking.promo_code,
                        "Booking submitted"
                    );
                    return Ok(BookingConfirmation { booking, quote });
                }
                Err(e) if e.is(ErrorKind::Conflict) && e.message == PROMO_NOT_REDEEMABLE => {
                    return Err(AppError::validation(PROMO_REJECTED));
                }
                Err(e) if e.is(ErrorKind::Conflict) => {
                    warn!(hotel_id = %hotel_id, attempt, "Booking reference collision");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal("Could not allocate a booking reference"))
    }

    /// A booking with its lines.
    pub async fn get(&self, id: BookingId) -> Result<BookingDetails, AppError> {
        let booking = self
            .bookings
            .find_booking(id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;

        let (addons, package, guests) = tokio::try_join!(
            self.bookings.list_booking_addons(id),
            self.bookings.find_booking_package(id),
            self.bookings.list_booking_guests(id),
        )?;

        Ok(BookingDetails {
            booking,
            addons,
            package,
            guests,
        })
    }

    /// Page through a hotel's bookings, newest first.
    pub async fn list(
        &self,
        hotel_id: HotelId,
        status: Option<BookingStatus>,
        page: &PageRequest,
    ) -> Result<PageResponse<Booking>, AppError> {
        self.bookings.list_bookings(hotel_id, status, page).await
    }

    /// Move a booking to `status`. Cancelling records when and why.
    pub async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
        cancellation_reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Booking, AppError> {
        let reason = cancellation_reason
            .map(str::trim)
            .filter(|reason| !reason.is_empty());
        let booking = self
            .bookings
            .update_booking_status(id, status, reason, now)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;

        info!(booking_id = %id, status = %status, "Booking status updated");
        Ok(booking)
    }

    async fn hotel_room(
        &self,
        hotel_id: HotelId,
        room_id: RoomId,
    ) -> Result<Room, AppError> {
        self.catalog
            .find_room(room_id)
            .await?
            .filter(|room| room.hotel_id == hotel_id)
            .ok_or_else(|| AppError::not_found("Room not found"))
    }

    async fn active_extras(&self, hotel_id: HotelId) -> Result<(Vec<Addon>, Vec<Package>), AppError> {
        tokio::try_join!(
            self.catalog.list_active_addons(hotel_id),
            self.catalog.list_active_packages(hotel_id),
        )
    }
}

/// Build the insert for a validated draft. The reference is drawn later.
fn new_booking(
    hotel_id: HotelId,
    stay: &StaySelection,
    draft: &BookingDraft,
    quote: &Quote,
    promo: Option<&PromoCode>,
    addons: &[Addon],
    packages: &[Package],
) -> Result<CreateBooking, AppError> {
    let addon_lines = draft
        .addon_selections
        .iter()
        .filter(|(_, quantity)| **quantity > 0)
        .filter_map(|(id, quantity)| {
            let addon = addons.iter().find(|addon| addon.id == *id)?;
            Some((addon, *quantity))
        })
        .map(|(addon, quantity)| {
            Ok(NewBookingAddon {
                addon_id: addon.id,
                quantity: to_count(quantity, "add-on quantity")?,
                price: addon.price,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    let package_line = draft
        .selected_package_id
        .and_then(|id| packages.iter().find(|package| package.id == id))
        .map(|package| NewBookingPackage {
            package_id: package.id,
            price: package.price,
        });

    let guests = draft
        .additional_guests
        .iter()
        .map(|guest| NewBookingGuest {
            name: guest.name.trim().to_string(),
            age: guest.age,
        })
        .collect();

    let special_requests = Some(draft.special_requests.trim())
        .filter(|text| !text.is_empty())
        .map(str::to_string);

    Ok(CreateBooking {
        booking_reference: String::new(),
        hotel_id,
        room_id: stay.room_id,
        guest_name: draft.guest.name.trim().to_string(),
        guest_email: draft.guest.email.trim().to_string(),
        guest_phone: draft.guest.phone.trim().to_string(),
        check_in: stay.check_in,
        check_out: stay.check_out,
        num_rooms: to_count(draft.num_rooms, "room count")?,
        num_adults: to_count(draft.num_adults, "adult count")?,
        num_children: to_count(draft.num_children, "child count")?,
        total_amount: quote.total,
        discount_amount: quote.discount,
        promo_code: promo.map(|p| p.code.clone()),
        promo_code_id: promo.map(|p| p.id),
        payment_status: PaymentStatus::Pending,
        status: BookingStatus::Confirmed,
        special_requests,
        early_checkin: draft.early_checkin,
        late_checkout: draft.late_checkout,
        room_preferences: serde_json::to_value(&draft.room_preferences)?,
        booking_source: BookingSource::Website,
        addons: addon_lines,
        package: package_line,
        guests,
    })
}

fn to_count(value: u32, what: &str) -> Result<i32, AppError> {
    i32::try_from(value).map_err(|_| AppError::validation(format!("Invalid {what}")))
}
