//! Seed data shared by the service tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use hotelsite_core::types::{AddonId, HotelId, OwnerId, PackageId, PromoCodeId, RoomId};
use hotelsite_database::{MemoryStore, Stores};
use hotelsite_entity::catalog::{Addon, Package, PackageType};
use hotelsite_entity::hotel::Hotel;
use hotelsite_entity::promo::{DiscountType, PromoCode};
use hotelsite_entity::room::Room;

use crate::booking::BookingService;
use crate::pricing::PricingRules;
use crate::promo::PromoService;

/// A published hotel with one room, one add-on, one package.
pub struct Seeded {
    pub store: Arc<MemoryStore>,
    pub stores: Stores,
    pub hotel: Hotel,
    pub room: Room,
    pub addon: Addon,
    pub package: Package,
}

pub fn hotel(now: DateTime<Utc>) -> Hotel {
    Hotel {
        id: HotelId::new(),
        user_id: OwnerId::new(),
        name: "Lakeview Residency".to_string(),
        slug: "lakeview-residency".to_string(),
        address: None,
        city: Some("Udaipur".to_string()),
        state: None,
        country: Some("India".to_string()),
        phone: None,
        email: None,
        description: None,
        template_id: "modern".to_string(),
        is_active: true,
        is_published: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn room(hotel_id: HotelId, title: &str, price: Decimal) -> Room {
    let now = Utc::now();
    Room {
        id: RoomId::new(),
        hotel_id,
        title: title.to_string(),
        description: None,
        price,
        max_guests: 2,
        is_available: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn promo(hotel_id: HotelId, code: &str, discount_type: DiscountType, value: Decimal) -> PromoCode {
    let now = Utc::now();
    PromoCode {
        id: PromoCodeId::new(),
        hotel_id,
        code: code.to_string(),
        discount_type,
        discount_value: value,
        valid_from: now - Duration::days(30),
        valid_to: now + Duration::days(30),
        usage_limit: None,
        used_count: 0,
        is_active: true,
        created_at: now,
    }
}

pub fn seeded() -> Seeded {
    let now = Utc::now();
    let store = Arc::new(MemoryStore::new());
    let hotel = hotel(now);
    let room = room(hotel.id, "Deluxe Lake View", dec!(2000));
    let addon = Addon {
        id: AddonId::new(),
        hotel_id: hotel.id,
        name: "Breakfast".to_string(),
        description: None,
        price: dec!(300),
        addon_type: "food".to_string(),
        is_active: true,
        created_at: now,
    };
    let package = Package {
        id: PackageId::new(),
        hotel_id: hotel.id,
        name: "Honeymoon Bliss".to_string(),
        description: None,
        package_type: PackageType::Honeymoon,
        included_items: vec!["Boat ride".to_string()],
        price: dec!(4000),
        validity_days: Some(90),
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    store.insert_hotel(hotel.clone());
    store.insert_room(room.clone());
    store.insert_addon(addon.clone());
    store.insert_package(package.clone());

    Seeded {
        stores: Stores::memory(store.clone()),
        store,
        hotel,
        room,
        addon,
        package,
    }
}

pub fn booking_service(stores: &Stores) -> BookingService {
    BookingService::new(
        stores.hotels.clone(),
        stores.catalog.clone(),
        stores.bookings.clone(),
        PromoService::new(stores.promo_codes.clone()),
        PricingRules::default(),
        "BK",
    )
}
