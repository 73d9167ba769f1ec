//! Promo discount computation.

use rust_decimal::Decimal;

use hotelsite_entity::promo::{DiscountType, PromoCode};

/// Discount granted by `promo` on `subtotal`; zero without a promo.
///
/// Percentage codes take `discount_value` percent of the subtotal. Fixed
/// codes take `discount_value` as-is, even when it exceeds the subtotal.
pub fn compute_discount(promo: Option<&PromoCode>, subtotal: Decimal) -> Decimal {
    match promo {
        None => Decimal::ZERO,
        Some(promo) => match promo.discount_type {
            DiscountType::Percentage => {
                // The rate is at most one, so the product never exceeds the subtotal.
                subtotal * (promo.discount_value / Decimal::ONE_HUNDRED)
            }
            DiscountType::Fixed => promo.discount_value,
        },
    }
}
