//! Convenience result type alias for HotelSite.

use crate::error::AppError;

/// A specialized `Result` type for HotelSite operations.
pub type AppResult<T> = Result<T, AppError>;
