//! # hotelsite-database
//!
//! Store traits consumed by the service layer, their PostgreSQL
//! implementations, and an in-memory implementation used by tests and
//! local development.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{
    AvailabilityStore, BookingStore, CatalogStore, HotelStore, PROMO_NOT_REDEEMABLE, PromoCodeStore,
    Stores,
};
