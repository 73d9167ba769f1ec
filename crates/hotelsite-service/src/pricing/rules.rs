//! Fee constants and discount policy.

use rust_decimal::Decimal;

use hotelsite_core::config::PricingConfig;

/// Constants applied by [`calculate_quote`](super::calculate_quote).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingRules {
    /// Flat fee for early check-in.
    pub early_checkin_fee: Decimal,
    /// Flat fee for late check-out.
    pub late_checkout_fee: Decimal,
    /// Cap the discount at the subtotal so totals never go negative.
    pub clamp_discount: bool,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            early_checkin_fee: Decimal::from(500),
            late_checkout_fee: Decimal::from(500),
            clamp_discount: false,
        }
    }
}

impl From<&PricingConfig> for PricingRules {
    fn from(config: &PricingConfig) -> Self {
        Self {
            early_checkin_fee: config.early_checkin_fee,
            late_checkout_fee: config.late_checkout_fee,
            clamp_discount: config.clamp_discount,
        }
    }
}
