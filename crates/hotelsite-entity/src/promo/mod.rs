//! Promo code entities and the eligibility rule.

pub mod eligibility;
pub mod model;

pub use eligibility::Ineligibility;
pub use model::{CreatePromoCode, DiscountType, PromoCode, UpdatePromoCode, normalize_code};
