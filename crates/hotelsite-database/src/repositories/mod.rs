//! PostgreSQL repository implementations of the store traits.

pub mod availability;
pub mod booking;
pub mod catalog;
pub mod hotel;
pub mod promo;

pub use availability::AvailabilityRepository;
pub use booking::BookingRepository;
pub use catalog::CatalogRepository;
pub use hotel::HotelRepository;
pub use promo::PromoCodeRepository;

use hotelsite_core::result::AppResult;
use hotelsite_entity::Validated;

/// Validate every decoded row, failing on the first malformed one.
fn validated_all<T: Validated>(rows: Vec<T>) -> AppResult<Vec<T>> {
    rows.into_iter().map(Validated::validated).collect()
}

/// Map a write failure, turning unique-constraint violations into `Conflict`.
fn write_error(err: sqlx::Error, action: &str, conflict: &str) -> hotelsite_core::AppError {
    use hotelsite_core::error::{AppError, ErrorKind};

    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::with_source(ErrorKind::Conflict, conflict.to_string(), err)
        }
        _ => AppError::with_source(ErrorKind::Database, format!("Failed to {action}"), err),
    }
}
