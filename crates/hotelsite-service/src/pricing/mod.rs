//! Booking quote calculator.
//!
//! Everything here is pure: no I/O, no clock, no shared state.

pub mod discount;
pub mod quote;
pub mod rules;

pub use discount::compute_discount;
pub use quote::{Quote, QuoteInput, calculate_quote, nights_between};
pub use rules::PricingRules;
