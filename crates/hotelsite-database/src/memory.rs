//! In-memory implementation of every store trait.
//!
//! Backs the integration tests and the `memory` backend for local runs.
//! Records read back pass the same validation as PostgreSQL rows.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use hotelsite_core::error::AppError;
use hotelsite_core::result::AppResult;
use hotelsite_core::types::{
    AddonId, AvailabilityId, BookingId, HotelId, PackageId, PageRequest, PageResponse,
    PromoCodeId, RoomId,
};
use hotelsite_entity::Validated;
use hotelsite_entity::availability::{Availability, AvailabilityPatch};
use hotelsite_entity::booking::{
    Booking, BookingAddon, BookingGuest, BookingPackage, BookingStatus, CreateBooking, GuestType,
};
use hotelsite_entity::catalog::{Addon, Package};
use hotelsite_entity::hotel::Hotel;
use hotelsite_entity::promo::{CreatePromoCode, PromoCode, UpdatePromoCode};
use hotelsite_entity::room::Room;

use crate::store::{
    AvailabilityStore, BookingStore, CatalogStore, HotelStore, PROMO_NOT_REDEEMABLE, PromoCodeStore,
};

/// Concurrent in-memory tables.
#[derive(Debug, Default)]
pub struct MemoryStore {
    hotels: DashMap<HotelId, Hotel>,
    rooms: DashMap<RoomId, Room>,
    addons: DashMap<AddonId, Addon>,
    packages: DashMap<PackageId, Package>,
    promo_codes: DashMap<PromoCodeId, PromoCode>,
    bookings: DashMap<BookingId, Booking>,
    booking_addons: DashMap<BookingId, Vec<BookingAddon>>,
    booking_packages: DashMap<BookingId, BookingPackage>,
    booking_guests: DashMap<BookingId, Vec<BookingGuest>>,
    availability: DashMap<(RoomId, NaiveDate), Availability>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a hotel.
    pub fn insert_hotel(&self, hotel: Hotel) {
        self.hotels.insert(hotel.id, hotel);
    }

    /// Seed a room.
    pub fn insert_room(&self, room: Room) {
        self.rooms.insert(room.id, room);
    }

    /// Seed an add-on.
    pub fn insert_addon(&self, addon: Addon) {
        self.addons.insert(addon.id, addon);
    }

    /// Seed a package.
    pub fn insert_package(&self, package: Package) {
        self.packages.insert(package.id, package);
    }

    /// Seed a promo code as-is, including its `used_count`.
    pub fn insert_promo_code(&self, promo: PromoCode) {
        self.promo_codes.insert(promo.id, promo);
    }

    /// Seed a booking as-is, e.g. with a historical `created_at`.
    pub fn insert_booking(&self, booking: Booking) {
        self.bookings.insert(booking.id, booking);
    }

    /// Conditionally increment a promo code's usage. The shard lock held by
    /// `get_mut` makes the check and the increment one step.
    fn redeem_promo_code(&self, id: PromoCodeId, now: DateTime<Utc>) -> AppResult<()> {
        let Some(mut promo) = self.promo_codes.get_mut(&id) else {
            return Err(AppError::conflict(PROMO_NOT_REDEEMABLE));
        };
        if let Err(reason) = promo.check_redeemable_at(now) {
            debug!(promo_code_id = %id, reason = %reason, "Promo code redemption guard rejected the update");
            return Err(AppError::conflict(PROMO_NOT_REDEEMABLE));
        }
        promo.used_count += 1;
        Ok(())
    }

    fn release_promo_code(&self, id: PromoCodeId) {
        if let Some(mut promo) = self.promo_codes.get_mut(&id) {
            promo.used_count = (promo.used_count - 1).max(0);
        }
    }

    fn code_taken(&self, hotel_id: HotelId, code: &str, except: Option<PromoCodeId>) -> bool {
        self.promo_codes.iter().any(|entry| {
            entry.hotel_id == hotel_id && entry.code == code && Some(entry.id) != except
        })
    }

    fn write_lines(&self, booking_id: BookingId, data: &CreateBooking, now: DateTime<Utc>) {
        let addons = data
            .addons
            .iter()
            .map(|line| BookingAddon {
                id: Uuid::now_v7(),
                booking_id,
                addon_id: line.addon_id,
                quantity: line.quantity,
                price: line.price,
                created_at: now,
            })
            .collect::<Vec<_>>();
        if !addons.is_empty() {
            self.booking_addons.insert(booking_id, addons);
        }

        if let Some(package) = &data.package {
            self.booking_packages.insert(
                booking_id,
                BookingPackage {
                    id: Uuid::now_v7(),
                    booking_id,
                    package_id: package.package_id,
                    quantity: 1,
                    price: package.price,
                    created_at: now,
                },
            );
        }

        let guests = data
            .guests
            .iter()
            .map(|guest| BookingGuest {
                id: Uuid::now_v7(),
                booking_id,
                guest_type: GuestType::Additional,
                name: guest.name.clone(),
                age: guest.age,
                created_at: now,
            })
            .collect::<Vec<_>>();
        if !guests.is_empty() {
            self.booking_guests.insert(booking_id, guests);
        }
    }
}

fn sorted_by<T, K: Ord>(mut rows: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    rows.sort_by_key(|row| key(row));
    rows
}

fn validated_all<T: Validated>(rows: Vec<T>) -> AppResult<Vec<T>> {
    rows.into_iter().map(Validated::validated).collect()
}

#[async_trait]
impl HotelStore for MemoryStore {
    async fn find_hotel(&self, id: HotelId) -> AppResult<Option<Hotel>> {
        self.hotels
            .get(&id)
            .map(|h| h.value().clone())
            .map(Validated::validated)
            .transpose()
    }

    async fn find_hotel_by_slug(&self, slug: &str) -> AppResult<Option<Hotel>> {
        self.hotels
            .iter()
            .find(|h| h.slug == slug)
            .map(|h| h.value().clone())
            .map(Validated::validated)
            .transpose()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_room(&self, id: RoomId) -> AppResult<Option<Room>> {
        self.rooms
            .get(&id)
            .map(|r| r.value().clone())
            .map(Validated::validated)
            .transpose()
    }

    async fn list_rooms(&self, hotel_id: HotelId) -> AppResult<Vec<Room>> {
        let rooms = self
            .rooms
            .iter()
            .filter(|r| r.hotel_id == hotel_id)
            .map(|r| r.value().clone())
            .collect();
        validated_all(sorted_by(rooms, |r: &Room| r.title.clone()))
    }

    async fn list_active_addons(&self, hotel_id: HotelId) -> AppResult<Vec<Addon>> {
        let addons = self
            .addons
            .iter()
            .filter(|a| a.hotel_id == hotel_id && a.is_active)
            .map(|a| a.value().clone())
            .collect();
        validated_all(sorted_by(addons, |a: &Addon| a.name.clone()))
    }

    async fn list_active_packages(&self, hotel_id: HotelId) -> AppResult<Vec<Package>> {
        let packages = self
            .packages
            .iter()
            .filter(|p| p.hotel_id == hotel_id && p.is_active)
            .map(|p| p.value().clone())
            .collect();
        validated_all(sorted_by(packages, |p: &Package| p.name.clone()))
    }
}

#[async_trait]
impl PromoCodeStore for MemoryStore {
    async fn find_promo_code(&self, id: PromoCodeId) -> AppResult<Option<PromoCode>> {
        self.promo_codes
            .get(&id)
            .map(|p| p.value().clone())
            .map(Validated::validated)
            .transpose()
    }

    async fn find_promo_code_by_code(
        &self,
        hotel_id: HotelId,
        code: &str,
    ) -> AppResult<Option<PromoCode>> {
        self.promo_codes
            .iter()
            .find(|p| p.hotel_id == hotel_id && p.code == code)
            .map(|p| p.value().clone())
            .map(Validated::validated)
            .transpose()
    }

    async fn list_promo_codes(&self, hotel_id: HotelId) -> AppResult<Vec<PromoCode>> {
        let mut codes: Vec<PromoCode> = self
            .promo_codes
            .iter()
            .filter(|p| p.hotel_id == hotel_id)
            .map(|p| p.value().clone())
            .collect();
        codes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        validated_all(codes)
    }

    async fn create_promo_code(&self, data: &CreatePromoCode) -> AppResult<PromoCode> {
        if self.code_taken(data.hotel_id, &data.code, None) {
            return Err(AppError::conflict("Promo code already exists"));
        }
        let promo = PromoCode {
            id: PromoCodeId::new(),
            hotel_id: data.hotel_id,
            code: data.code.clone(),
            discount_type: data.discount_type,
            discount_value: data.discount_value,
            valid_from: data.valid_from,
            valid_to: data.valid_to,
            usage_limit: data.usage_limit,
            used_count: 0,
            is_active: data.is_active,
            created_at: Utc::now(),
        }
        .validated()?;
        self.promo_codes.insert(promo.id, promo.clone());
        Ok(promo)
    }

    async fn update_promo_code(
        &self,
        id: PromoCodeId,
        data: &UpdatePromoCode,
    ) -> AppResult<Option<PromoCode>> {
        let Some(hotel_id) = self.promo_codes.get(&id).map(|p| p.hotel_id) else {
            return Ok(None);
        };
        if self.code_taken(hotel_id, &data.code, Some(id)) {
            return Err(AppError::conflict("Promo code already exists"));
        }
        let Some(mut promo) = self.promo_codes.get_mut(&id) else {
            return Ok(None);
        };
        promo.code = data.code.clone();
        promo.discount_type = data.discount_type;
        promo.discount_value = data.discount_value;
        promo.valid_from = data.valid_from;
        promo.valid_to = data.valid_to;
        promo.usage_limit = data.usage_limit;
        promo.is_active = data.is_active;
        promo.clone().validated().map(Some)
    }

    async fn delete_promo_code(&self, id: PromoCodeId) -> AppResult<bool> {
        Ok(self.promo_codes.remove(&id).is_some())
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn create_booking(
        &self,
        data: &CreateBooking,
        now: DateTime<Utc>,
    ) -> AppResult<Booking> {
        if let Some(promo_code_id) = data.promo_code_id {
            self.redeem_promo_code(promo_code_id, now)?;
        }

        let booking = Booking {
            id: BookingId::new(),
            booking_reference: data.booking_reference.clone(),
            hotel_id: data.hotel_id,
            room_id: Some(data.room_id),
            guest_name: data.guest_name.clone(),
            guest_email: data.guest_email.clone(),
            guest_phone: data.guest_phone.clone(),
            check_in: data.check_in,
            check_out: data.check_out,
            num_guests: data.num_guests(),
            num_rooms: data.num_rooms,
            num_adults: data.num_adults,
            num_children: data.num_children,
            total_amount: data.total_amount,
            discount_amount: data.discount_amount,
            promo_code: data.promo_code.clone(),
            payment_status: data.payment_status,
            status: data.status,
            special_requests: data.special_requests.clone(),
            early_checkin: data.early_checkin,
            late_checkout: data.late_checkout,
            room_preferences: data.room_preferences.clone(),
            cancellation_reason: None,
            cancelled_at: None,
            booking_source: data.booking_source,
            created_at: now,
            updated_at: now,
        };

        let duplicate = self
            .bookings
            .iter()
            .any(|b| b.booking_reference == booking.booking_reference);
        let booking = match (duplicate, booking.validated()) {
            (false, Ok(booking)) => booking,
            (duplicate, result) => {
                if let Some(promo_code_id) = data.promo_code_id {
                    self.release_promo_code(promo_code_id);
                }
                if duplicate {
                    return Err(AppError::conflict("Booking reference already exists"));
                }
                return result;
            }
        };

        self.write_lines(booking.id, data, now);
        self.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_booking(&self, id: BookingId) -> AppResult<Option<Booking>> {
        self.bookings
            .get(&id)
            .map(|b| b.value().clone())
            .map(Validated::validated)
            .transpose()
    }

    async fn list_bookings(
        &self,
        hotel_id: HotelId,
        status: Option<BookingStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.hotel_id == hotel_id && status.is_none_or(|s| b.status == s))
            .map(|b| b.value().clone())
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = bookings.len() as u64;
        let items = bookings
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(
            validated_all(items)?,
            page.page,
            page.page_size,
            total,
        ))
    }

    async fn list_bookings_created_between(
        &self,
        hotel_id: HotelId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>> {
        let bookings = self
            .bookings
            .iter()
            .filter(|b| b.hotel_id == hotel_id && b.created_at >= from && b.created_at < to)
            .map(|b| b.value().clone())
            .collect();
        validated_all(sorted_by(bookings, |b: &Booking| (b.created_at, b.id)))
    }

    async fn update_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
        cancellation_reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Booking>> {
        let Some(mut booking) = self.bookings.get_mut(&id) else {
            return Ok(None);
        };
        booking.status = status;
        booking.updated_at = now;
        if status == BookingStatus::Cancelled {
            booking.cancelled_at = Some(now);
            booking.cancellation_reason = cancellation_reason.map(str::to_string);
        }
        booking.clone().validated().map(Some)
    }

    async fn list_booking_addons(&self, booking_id: BookingId) -> AppResult<Vec<BookingAddon>> {
        validated_all(
            self.booking_addons
                .get(&booking_id)
                .map(|lines| lines.value().clone())
                .unwrap_or_default(),
        )
    }

    async fn find_booking_package(
        &self,
        booking_id: BookingId,
    ) -> AppResult<Option<BookingPackage>> {
        self.booking_packages
            .get(&booking_id)
            .map(|p| p.value().clone())
            .map(Validated::validated)
            .transpose()
    }

    async fn list_booking_guests(&self, booking_id: BookingId) -> AppResult<Vec<BookingGuest>> {
        validated_all(
            self.booking_guests
                .get(&booking_id)
                .map(|lines| lines.value().clone())
                .unwrap_or_default(),
        )
    }
}

#[async_trait]
impl AvailabilityStore for MemoryStore {
    async fn list_availability(
        &self,
        room_id: RoomId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<Availability>> {
        let rows = self
            .availability
            .iter()
            .filter(|a| a.room_id == room_id && a.date >= from && a.date <= to)
            .map(|a| a.value().clone())
            .collect();
        validated_all(sorted_by(rows, |a: &Availability| a.date))
    }

    async fn find_availability(
        &self,
        room_id: RoomId,
        date: NaiveDate,
    ) -> AppResult<Option<Availability>> {
        self.availability
            .get(&(room_id, date))
            .map(|a| a.value().clone())
            .map(Validated::validated)
            .transpose()
    }

    async fn upsert_availability(
        &self,
        room_id: RoomId,
        date: NaiveDate,
        patch: &AvailabilityPatch,
    ) -> AppResult<Availability> {
        let mut entry = self
            .availability
            .entry((room_id, date))
            .or_insert_with(|| Availability {
                id: AvailabilityId::new(),
                room_id,
                date,
                is_available: true,
                price_override: None,
                min_stay: 1,
                created_at: Utc::now(),
            });
        let (is_available, price_override, min_stay) = patch.apply(Some(&*entry));
        entry.is_available = is_available;
        entry.price_override = price_override;
        entry.min_stay = min_stay;
        entry.clone().validated()
    }
}
