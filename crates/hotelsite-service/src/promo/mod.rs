//! Promo code eligibility and management.

pub mod service;

pub use service::{PROMO_REJECTED, PromoEligibility, PromoService};
