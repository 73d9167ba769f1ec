//! # hotelsite-entity
//!
//! Domain records for HotelSite. Every struct in this crate represents a
//! database table row or a domain value object. Row structs derive
//! `sqlx::FromRow` and `validator::Validate`; enum columns decode into
//! closed enums so that unknown values are rejected at the store boundary.

pub mod availability;
pub mod booking;
pub mod catalog;
pub mod hotel;
pub mod promo;
pub mod room;
pub mod validate;

pub use validate::Validated;
