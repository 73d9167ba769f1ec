//! Hotel and catalog lookups.

pub mod service;

pub use service::{CatalogService, HotelCatalog};
