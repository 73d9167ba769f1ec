//! Field validators shared by the row types, and the post-decode check
//! applied to every record read from the store.

use rust_decimal::Decimal;
use validator::{Validate, ValidationError};

use hotelsite_core::error::AppError;

/// Reject negative currency amounts.
pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("amount must not be negative".into());
        return Err(err);
    }
    Ok(())
}

/// Reject blank strings (empty or whitespace only).
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("value is required".into());
        return Err(err);
    }
    Ok(())
}

/// A record that must satisfy its invariants before leaving the store layer.
pub trait Validated: Validate + Sized {
    /// Run validation and hand the record back, or fail with a
    /// `Validation` error naming the record kind.
    fn validated(self) -> Result<Self, AppError> {
        self.validate().map_err(|e| {
            AppError::validation(format!(
                "Malformed {} record: {e}",
                std::any::type_name::<Self>()
                    .rsplit("::")
                    .next()
                    .unwrap_or("unknown")
            ))
        })?;
        Ok(self)
    }
}

impl<T: Validate> Validated for T {}
