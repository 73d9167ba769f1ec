//! Store traits consumed by the service layer.
//!
//! Every record returned by a store has passed [`Validated`]; a row that
//! decodes but violates its invariants surfaces as a `Validation` error
//! instead of reaching pricing code.
//!
//! [`Validated`]: hotelsite_entity::Validated

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use hotelsite_core::result::AppResult;
use hotelsite_core::types::{
    BookingId, HotelId, PageRequest, PageResponse, PromoCodeId, RoomId,
};
use hotelsite_entity::availability::{Availability, AvailabilityPatch};
use hotelsite_entity::booking::{
    Booking, BookingAddon, BookingGuest, BookingPackage, BookingStatus, CreateBooking,
};
use hotelsite_entity::catalog::{Addon, Package};
use hotelsite_entity::hotel::Hotel;
use hotelsite_entity::promo::{CreatePromoCode, PromoCode, UpdatePromoCode};
use hotelsite_entity::room::Room;

use crate::memory::MemoryStore;
use crate::repositories::{
    AvailabilityRepository, BookingRepository, CatalogRepository, HotelRepository,
    PromoCodeRepository,
};

/// Message of the `Conflict` returned by [`BookingStore::create_booking`]
/// when the promo code fails the redemption guard.
pub const PROMO_NOT_REDEEMABLE: &str = "Promo code is no longer redeemable";

/// Hotel lookups.
#[async_trait]
pub trait HotelStore: Send + Sync {
    /// Find a hotel by ID.
    async fn find_hotel(&self, id: HotelId) -> AppResult<Option<Hotel>>;

    /// Find a hotel by its website slug.
    async fn find_hotel_by_slug(&self, slug: &str) -> AppResult<Option<Hotel>>;
}

/// Rooms, add-ons and packages of a hotel.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Find a room by ID.
    async fn find_room(&self, id: RoomId) -> AppResult<Option<Room>>;

    /// All rooms of a hotel, available or not, ordered by title.
    async fn list_rooms(&self, hotel_id: HotelId) -> AppResult<Vec<Room>>;

    /// Active add-ons of a hotel, ordered by name.
    async fn list_active_addons(&self, hotel_id: HotelId) -> AppResult<Vec<Addon>>;

    /// Active packages of a hotel, ordered by name.
    async fn list_active_packages(&self, hotel_id: HotelId) -> AppResult<Vec<Package>>;
}

/// Promo code persistence.
#[async_trait]
pub trait PromoCodeStore: Send + Sync {
    /// Find a promo code by ID.
    async fn find_promo_code(&self, id: PromoCodeId) -> AppResult<Option<PromoCode>>;

    /// Find a hotel's promo code by its normalized code.
    async fn find_promo_code_by_code(
        &self,
        hotel_id: HotelId,
        code: &str,
    ) -> AppResult<Option<PromoCode>>;

    /// All promo codes of a hotel, newest first.
    async fn list_promo_codes(&self, hotel_id: HotelId) -> AppResult<Vec<PromoCode>>;

    /// Insert a promo code. The code must already be normalized.
    async fn create_promo_code(&self, data: &CreatePromoCode) -> AppResult<PromoCode>;

    /// Replace the editable fields of a promo code.
    async fn update_promo_code(
        &self,
        id: PromoCodeId,
        data: &UpdatePromoCode,
    ) -> AppResult<Option<PromoCode>>;

    /// Delete a promo code. Returns whether a row was removed.
    async fn delete_promo_code(&self, id: PromoCodeId) -> AppResult<bool>;
}

/// Booking persistence.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Insert a booking and its add-on, package and guest lines.
    ///
    /// When `data.promo_code_id` is set, the promo code's `used_count` is
    /// incremented in the same write, guarded by its active flag, validity
    /// window at `now`, and usage limit. If the guard fails nothing is
    /// written and a `Conflict` error carrying [`PROMO_NOT_REDEEMABLE`] is returned.
    async fn create_booking(&self, data: &CreateBooking, now: DateTime<Utc>)
    -> AppResult<Booking>;

    /// Find a booking by ID.
    async fn find_booking(&self, id: BookingId) -> AppResult<Option<Booking>>;

    /// Page through a hotel's bookings, newest first.
    async fn list_bookings(
        &self,
        hotel_id: HotelId,
        status: Option<BookingStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>>;

    /// Bookings created in `[from, to)`, oldest first.
    async fn list_bookings_created_between(
        &self,
        hotel_id: HotelId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>>;

    /// Change a booking's status, stamping cancellation fields when the new
    /// status is `cancelled`.
    async fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
        cancellation_reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Booking>>;

    /// Add-on lines of a booking.
    async fn list_booking_addons(&self, booking_id: BookingId) -> AppResult<Vec<BookingAddon>>;

    /// Package line of a booking.
    async fn find_booking_package(&self, booking_id: BookingId)
    -> AppResult<Option<BookingPackage>>;

    /// Guest lines of a booking.
    async fn list_booking_guests(&self, booking_id: BookingId) -> AppResult<Vec<BookingGuest>>;
}

/// Per-date room availability overrides.
#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// Overrides of a room for dates in `[from, to]`, ordered by date.
    async fn list_availability(
        &self,
        room_id: RoomId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<Availability>>;

    /// Override of a room on one date.
    async fn find_availability(
        &self,
        room_id: RoomId,
        date: NaiveDate,
    ) -> AppResult<Option<Availability>>;

    /// Create or update the override of a room on one date.
    async fn upsert_availability(
        &self,
        room_id: RoomId,
        date: NaiveDate,
        patch: &AvailabilityPatch,
    ) -> AppResult<Availability>;
}

/// The full set of stores handed to the service layer.
#[derive(Clone)]
pub struct Stores {
    /// Hotel lookups.
    pub hotels: Arc<dyn HotelStore>,
    /// Rooms, add-ons, packages.
    pub catalog: Arc<dyn CatalogStore>,
    /// Promo codes.
    pub promo_codes: Arc<dyn PromoCodeStore>,
    /// Bookings.
    pub bookings: Arc<dyn BookingStore>,
    /// Availability overrides.
    pub availability: Arc<dyn AvailabilityStore>,
}

impl Stores {
    /// Stores backed by PostgreSQL.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            hotels: Arc::new(HotelRepository::new(pool.clone())),
            catalog: Arc::new(CatalogRepository::new(pool.clone())),
            promo_codes: Arc::new(PromoCodeRepository::new(pool.clone())),
            bookings: Arc::new(BookingRepository::new(pool.clone())),
            availability: Arc::new(AvailabilityRepository::new(pool)),
        }
    }

    /// Stores backed by a shared in-memory store.
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            hotels: store.clone(),
            catalog: store.clone(),
            promo_codes: store.clone(),
            bookings: store.clone(),
            availability: store,
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
