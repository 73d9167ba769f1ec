//! Shared test helpers for integration tests.

use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tower::ServiceExt;

use hotelsite_api::{AppState, build_app};
use hotelsite_core::config::AppConfig;
use hotelsite_core::types::{AddonId, HotelId, OwnerId, PackageId, PromoCodeId, RoomId};
use hotelsite_database::{MemoryStore, Stores};
use hotelsite_entity::catalog::{Addon, Package, PackageType};
use hotelsite_entity::hotel::Hotel;
use hotelsite_entity::promo::{DiscountType, PromoCode};
use hotelsite_entity::room::Room;

/// Public slug of the seeded hotel.
pub const SLUG: &str = "lakeview-residency";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store behind the router, for seeding
    pub store: Arc<MemoryStore>,
    /// Seeded hotel
    pub hotel_id: HotelId,
    /// Seeded room, 2000 per night
    pub room_id: RoomId,
    /// Seeded add-on, 300 each
    pub addon_id: AddonId,
    /// Seeded package, 4000 flat
    pub package_id: PackageId,
}

/// Parsed response of a test request
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

impl TestApp {
    /// Create a new test application with one published hotel, one room,
    /// one add-on and one package.
    pub fn new() -> Self {
        let now = Utc::now();
        let store = Arc::new(MemoryStore::new());

        let hotel = Hotel {
            id: HotelId::new(),
            user_id: OwnerId::new(),
            name: "Lakeview Residency".to_string(),
            slug: SLUG.to_string(),
            address: Some("12 Lake Palace Road".to_string()),
            city: Some("Udaipur".to_string()),
            state: Some("Rajasthan".to_string()),
            country: Some("India".to_string()),
            phone: None,
            email: Some("stay@lakeview.example".to_string()),
            description: None,
            template_id: "modern".to_string(),
            is_active: true,
            is_published: true,
            created_at: now,
            updated_at: now,
        };
        let room = Room {
            id: RoomId::new(),
            hotel_id: hotel.id,
            title: "Deluxe Lake View".to_string(),
            description: None,
            price: dec!(2000),
            max_guests: 2,
            is_available: true,
            created_at: now,
            updated_at: now,
        };
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
            included_items: vec!["Boat ride".to_string(), "Candle-lit dinner".to_string()],
            price: dec!(4000),
            validity_days: Some(90),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let app = Self {
            router: build_app(AppState::new(
                AppConfig::default(),
                Stores::memory(store.clone()),
            )),
            store,
            hotel_id: hotel.id,
            room_id: room.id,
            addon_id: addon.id,
            package_id: package.id,
        };
        app.store.insert_hotel(hotel);
        app.store.insert_room(room);
        app.store.insert_addon(addon);
        app.store.insert_package(package);
        app
    }

    /// Seed a promo code valid for thirty days either side of now.
    pub fn seed_promo(
        &self,
        code: &str,
        discount_type: DiscountType,
        value: Decimal,
        usage_limit: Option<i32>,
    ) -> PromoCodeId {
        let now = Utc::now();
        let promo = PromoCode {
            id: PromoCodeId::new(),
            hotel_id: self.hotel_id,
            code: code.to_string(),
            discount_type,
            discount_value: value,
            valid_from: now - Duration::days(30),
            valid_to: now + Duration::days(30),
            usage_limit,
            used_count: 0,
            is_active: true,
            created_at: now,
        };
        let id = promo.id;
        self.store.insert_promo_code(promo);
        id
    }

    /// Edits that fill in a complete three-night stay in the seeded room.
    pub fn stay_edits(&self) -> Vec<Value> {
        vec![
            json!({ "type": "select_room", "room_id": self.room_id }),
            json!({ "type": "set_dates", "check_in": "2025-01-10", "check_out": "2025-01-13" }),
            json!({
                "type": "set_guest",
                "guest": {
                    "name": "Rohan Das",
                    "email": "rohan@example.com",
                    "phone": "+91 99999 00000"
                }
            }),
        ]
    }

    /// Submit a booking for the seeded stay plus `extra` edits.
    pub async fn submit(&self, extra: Vec<Value>) -> TestResponse {
        let mut edits = self.stay_edits();
        edits.extend(extra);
        self.request(
            "POST",
            &format!("/api/hotels/{}/bookings", self.hotel_id),
            Some(json!({ "edits": edits })),
        )
        .await
    }

    /// Send a request through the router
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Read a decimal amount serialized either as a string or a number.
pub fn money(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).expect("decimal string"),
        Value::Number(n) => Decimal::from_str(&n.to_string()).expect("decimal number"),
        other => panic!("not an amount: {other}"),
    }
}
