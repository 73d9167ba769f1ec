//! # hotelsite-service
//!
//! Business logic for HotelSite. The quote calculator in [`pricing`] is
//! pure; every other service orchestrates the store traits from
//! `hotelsite-database`.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` handles.

pub mod analytics;
pub mod availability;
pub mod booking;
pub mod catalog;
pub mod pricing;
pub mod promo;

#[cfg(test)]
pub(crate) mod fixtures;

pub use analytics::{AnalyticsPeriod, AnalyticsReport, AnalyticsService};
pub use availability::{AvailabilityService, CalendarDay, MonthCalendar};
pub use booking::{
    BookingConfirmation, BookingDetails, BookingDraft, BookingService, DraftEdit,
};
pub use catalog::{CatalogService, HotelCatalog};
pub use pricing::{PricingRules, Quote, QuoteInput, calculate_quote};
pub use promo::{PromoEligibility, PromoService};
