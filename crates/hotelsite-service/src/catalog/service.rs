//! Catalog service: public hotel lookup and the bookable catalog.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use hotelsite_core::error::AppError;
use hotelsite_core::types::HotelId;
use hotelsite_database::{CatalogStore, HotelStore};
use hotelsite_entity::catalog::{Addon, Package};
use hotelsite_entity::hotel::Hotel;
use hotelsite_entity::room::Room;

/// What a guest can book at a hotel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelCatalog {
    /// Rooms open for booking.
    pub rooms: Vec<Room>,
    /// Active add-ons.
    pub addons: Vec<Addon>,
    /// Active packages.
    pub packages: Vec<Package>,
}

/// Reads hotels and their catalog.
#[derive(Clone)]
pub struct CatalogService {
    hotels: Arc<dyn HotelStore>,
    catalog: Arc<dyn CatalogStore>,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(hotels: Arc<dyn HotelStore>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self { hotels, catalog }
    }

    /// Hotel by ID, whether published or not.
    pub async fn hotel(&self, id: HotelId) -> Result<Hotel, AppError> {
        self.hotels
            .find_hotel(id)
            .await?
            .ok_or_else(|| AppError::not_found("Hotel not found"))
    }

    /// Hotel behind a public website slug. Unpublished or disabled hotels
    /// are reported as missing.
    pub async fn published_hotel(&self, slug: &str) -> Result<Hotel, AppError> {
        self.hotels
            .find_hotel_by_slug(slug)
            .await?
            .filter(Hotel::accepts_bookings)
            .ok_or_else(|| AppError::not_found("Hotel not found"))
    }

    /// Bookable rooms, active add-ons and active packages of a hotel.
    pub async fn catalog(&self, hotel_id: HotelId) -> Result<HotelCatalog, AppError> {
        self.hotel(hotel_id).await?;

        let (rooms, addons, packages) = tokio::try_join!(
            self.catalog.list_rooms(hotel_id),
            self.catalog.list_active_addons(hotel_id),
            self.catalog.list_active_packages(hotel_id),
        )?;

        Ok(HotelCatalog {
            rooms: rooms.into_iter().filter(|room| room.is_available).collect(),
            addons,
            packages,
        })
    }
}
