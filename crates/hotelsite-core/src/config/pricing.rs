//! Pricing and booking configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fee constants and discount policy applied by the quote calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Flat fee added when early check-in is requested.
    #[serde(default = "default_flag_fee")]
    pub early_checkin_fee: Decimal,
    /// Flat fee added when late check-out is requested.
    #[serde(default = "default_flag_fee")]
    pub late_checkout_fee: Decimal,
    /// Clamp discounts so that a quote total never drops below zero.
    ///
    /// Off by default: a fixed discount larger than the subtotal yields a
    /// negative total.
    #[serde(default)]
    pub clamp_discount: bool,
    /// ISO currency code used when formatting amounts.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            early_checkin_fee: default_flag_fee(),
            late_checkout_fee: default_flag_fee(),
            clamp_discount: false,
            currency: default_currency(),
        }
    }
}

/// Booking submission settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Prefix of generated booking references.
    #[serde(default = "default_reference_prefix")]
    pub reference_prefix: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            reference_prefix: default_reference_prefix(),
        }
    }
}

fn default_flag_fee() -> Decimal {
    Decimal::from(500)
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_reference_prefix() -> String {
    "BK".to_string()
}
