//! Promo code eligibility rule.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::PromoCode;

/// Why a promo code cannot be applied.
///
/// Callers facing guests collapse every variant into one "invalid or
/// expired" message; the variants exist for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ineligibility {
    /// No code with that text exists for the hotel.
    Unknown,
    /// The code is switched off.
    Inactive,
    /// `now` is before `valid_from`.
    NotYetValid,
    /// `now` is after `valid_to`.
    Expired,
    /// `used_count` has reached `usage_limit`.
    Exhausted,
}

impl Ineligibility {
    /// Return the reason as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Inactive => "inactive",
            Self::NotYetValid => "not_yet_valid",
            Self::Expired => "expired",
            Self::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PromoCode {
    /// Check whether the code can be applied at `now`.
    ///
    /// Eligible iff active, `valid_from <= now <= valid_to`, and the usage
    /// limit is unset or not yet reached.
    pub fn check_redeemable_at(&self, now: DateTime<Utc>) -> Result<(), Ineligibility> {
        if !self.is_active {
            return Err(Ineligibility::Inactive);
        }
        if now < self.valid_from {
            return Err(Ineligibility::NotYetValid);
        }
        if now > self.valid_to {
            return Err(Ineligibility::Expired);
        }
        if let Some(limit) = self.usage_limit {
            if self.used_count >= limit {
                return Err(Ineligibility::Exhausted);
            }
        }
        Ok(())
    }

    /// Shorthand for [`check_redeemable_at`](Self::check_redeemable_at).
    pub fn is_redeemable_at(&self, now: DateTime<Utc>) -> bool {
        self.check_redeemable_at(now).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    use hotelsite_core::types::{HotelId, PromoCodeId};

    use crate::promo::DiscountType;

    fn promo(usage_limit: Option<i32>, used_count: i32) -> PromoCode {
        let from = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        PromoCode {
            id: PromoCodeId::new(),
            hotel_id: HotelId::new(),
            code: "SUMMER24".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: dec!(10),
            valid_from: from,
            valid_to: from + Duration::days(30),
            usage_limit,
            used_count,
            is_active: true,
            created_at: from,
        }
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let code = promo(None, 0);
        assert!(code.is_redeemable_at(code.valid_from));
        assert!(code.is_redeemable_at(code.valid_to));
        assert_eq!(
            code.check_redeemable_at(code.valid_from - Duration::seconds(1)),
            Err(Ineligibility::NotYetValid)
        );
        assert_eq!(
            code.check_redeemable_at(code.valid_to + Duration::seconds(1)),
            Err(Ineligibility::Expired)
        );
    }

    #[test]
    fn test_usage_limit() {
        let now = promo(None, 0).valid_from + Duration::days(1);
        assert!(promo(Some(5), 4).is_redeemable_at(now));
        assert_eq!(
            promo(Some(5), 5).check_redeemable_at(now),
            Err(Ineligibility::Exhausted)
        );
        assert!(promo(None, 10_000).is_redeemable_at(now));
    }

    #[test]
    fn test_inactive() {
        let mut code = promo(None, 0);
        code.is_active = false;
        assert_eq!(
            code.check_redeemable_at(code.valid_from),
            Err(Ineligibility::Inactive)
        );
    }

    #[test]
    fn test_remaining_uses() {
        assert_eq!(promo(Some(3), 1).remaining_uses(), Some(2));
        assert_eq!(promo(Some(3), 7).remaining_uses(), Some(0));
        assert_eq!(promo(None, 7).remaining_uses(), None);
    }
}
