//! Application state shared across all handlers.

use std::sync::Arc;

use hotelsite_core::config::AppConfig;
use hotelsite_database::Stores;
use hotelsite_service::{
    AnalyticsService, AvailabilityService, BookingService, CatalogService, PricingRules,
    PromoService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Services hold
/// `Arc` store handles, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Hotel and catalog lookups
    pub catalog_service: CatalogService,
    /// Promo code eligibility and management
    pub promo_service: PromoService,
    /// Quotes, submission and booking management
    pub booking_service: BookingService,
    /// Per-date room calendar
    pub availability_service: AvailabilityService,
    /// Revenue and occupancy reports
    pub analytics_service: AnalyticsService,
}

impl AppState {
    /// Wire every service over `stores`.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let promo_service = PromoService::new(Arc::clone(&stores.promo_codes));
        let booking_service = BookingService::new(
            Arc::clone(&stores.hotels),
            Arc::clone(&stores.catalog),
            Arc::clone(&stores.bookings),
            promo_service.clone(),
            PricingRules::from(&config.pricing),
            config.booking.reference_prefix.clone(),
        );

        Self {
            catalog_service: CatalogService::new(
                Arc::clone(&stores.hotels),
                Arc::clone(&stores.catalog),
            ),
            availability_service: AvailabilityService::new(
                Arc::clone(&stores.catalog),
                Arc::clone(&stores.availability),
            ),
            analytics_service: AnalyticsService::new(
                Arc::clone(&stores.hotels),
                Arc::clone(&stores.catalog),
                Arc::clone(&stores.bookings),
            ),
            promo_service,
            booking_service,
            config: Arc::new(config),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
