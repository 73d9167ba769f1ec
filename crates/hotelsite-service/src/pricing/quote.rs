//! Quote computation: nights × rate × rooms, plus fees, add-ons and
//! package, minus the promo discount.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hotelsite_core::types::{AddonId, PackageId};
use hotelsite_entity::catalog::{Addon, Package};
use hotelsite_entity::promo::PromoCode;

use super::discount::compute_discount;
use super::rules::PricingRules;

/// Everything the calculator looks at. Catalog slices are borrowed so a
/// quote can be recomputed on every draft change without copying.
#[derive(Debug, Clone, Copy)]
pub struct QuoteInput<'a> {
    /// Arrival date, if chosen.
    pub check_in: Option<NaiveDate>,
    /// Departure date, if chosen.
    pub check_out: Option<NaiveDate>,
    /// Nightly room price.
    pub room_rate: Decimal,
    /// Rooms booked.
    pub room_count: u32,
    /// Early check-in requested.
    pub early_checkin: bool,
    /// Late check-out requested.
    pub late_checkout: bool,
    /// Requested quantity per add-on.
    pub addon_selections: &'a BTreeMap<AddonId, u32>,
    /// Selected package.
    pub selected_package_id: Option<PackageId>,
    /// Promo code already checked for eligibility.
    pub promo_code: Option<&'a PromoCode>,
    /// Add-ons the selections resolve against.
    pub addons: &'a [Addon],
    /// Packages the selection resolves against.
    pub packages: &'a [Package],
}

/// Price breakdown of a stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Nights charged.
    pub nights: i64,
    /// `room_rate × nights × room_count`.
    pub base: Decimal,
    /// Early check-in and late check-out fees.
    pub fees: Decimal,
    /// Sum of add-on lines.
    pub addons_total: Decimal,
    /// Package price, if any.
    pub package_total: Decimal,
    /// Sum of all of the above.
    pub subtotal: Decimal,
    /// Promo discount.
    pub discount: Decimal,
    /// `subtotal - discount`. Negative when a fixed discount exceeds the
    /// subtotal and clamping is off.
    pub total: Decimal,
}

/// Nights of a stay; 1 when either date is missing or the range is empty.
pub fn nights_between(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> i64 {
    match (check_in, check_out) {
        (Some(check_in), Some(check_out)) => (check_out - check_in).num_days().max(1),
        _ => 1,
    }
}

/// Compute the quote for `input`. Unknown add-on or package identifiers
/// contribute nothing.
pub fn calculate_quote(input: &QuoteInput<'_>, rules: &PricingRules) -> Quote {
    let nights = nights_between(input.check_in, input.check_out);
    let base = input.room_rate * Decimal::from(nights) * Decimal::from(input.room_count);

    let mut fees = Decimal::ZERO;
    if input.early_checkin {
        fees += rules.early_checkin_fee;
    }
    if input.late_checkout {
        fees += rules.late_checkout_fee;
    }

    let addons_total = input
        .addon_selections
        .iter()
        .filter(|(_, quantity)| **quantity > 0)
        .filter_map(|(id, quantity)| {
            input
                .addons
                .iter()
                .find(|addon| addon.id == *id)
                .map(|addon| addon.price * Decimal::from(*quantity))
        })
        .sum::<Decimal>();

    let package_total = input
        .selected_package_id
        .and_then(|id| input.packages.iter().find(|package| package.id == id))
        .map(|package| package.price)
        .unwrap_or(Decimal::ZERO);

    let subtotal = base + fees + addons_total + package_total;
    let mut discount = compute_discount(input.promo_code, subtotal);
    if rules.clamp_discount {
        discount = discount.min(subtotal.max(Decimal::ZERO));
    }

    Quote {
        nights,
        base,
        fees,
        addons_total,
        package_total,
        subtotal,
        discount,
        total: subtotal - discount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use hotelsite_core::types::{HotelId, PromoCodeId};
    use hotelsite_entity::catalog::PackageType;
    use hotelsite_entity::promo::DiscountType;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn addon(price: Decimal) -> Addon {
        Addon {
            id: AddonId::new(),
            hotel_id: HotelId::new(),
            name: "Airport transfer".to_string(),
            description: None,
            price,
            addon_type: "transport".to_string(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn package(price: Decimal) -> Package {
        Package {
            id: PackageId::new(),
            hotel_id: HotelId::new(),
            name: "Honeymoon".to_string(),
            description: None,
            package_type: PackageType::Honeymoon,
            included_items: vec!["Candle-light dinner".to_string()],
            price,
            validity_days: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn promo(discount_type: DiscountType, value: Decimal) -> PromoCode {
        let now = Utc::now();
        PromoCode {
            id: PromoCodeId::new(),
            hotel_id: HotelId::new(),
            code: "SAVE".to_string(),
            discount_type,
            discount_value: value,
            valid_from: now - Duration::days(1),
            valid_to: now + Duration::days(1),
            usage_limit: None,
            used_count: 0,
            is_active: true,
            created_at: now,
        }
    }

    fn input<'a>(
        selections: &'a BTreeMap<AddonId, u32>,
        addons: &'a [Addon],
        packages: &'a [Package],
    ) -> QuoteInput<'a> {
        QuoteInput {
            check_in: date(2024, 7, 1),
            check_out: date(2024, 7, 2),
            room_rate: dec!(1000),
            room_count: 1,
            early_checkin: false,
            late_checkout: false,
            addon_selections: selections,
            selected_package_id: None,
            promo_code: None,
            addons,
            packages,
        }
    }

    #[test]
    fn test_base_is_rate_times_nights_times_rooms() {
        let selections = BTreeMap::new();
        let mut q = input(&selections, &[], &[]);
        q.check_out = date(2024, 7, 4);
        q.room_rate = dec!(1999.50);
        q.room_count = 2;

        let quote = calculate_quote(&q, &PricingRules::default());
        assert_eq!(quote.nights, 3);
        assert_eq!(quote.base, dec!(11997.00));
        assert_eq!(quote.total, quote.base);
    }

    #[test]
    fn test_quote_is_idempotent() {
        let addons = vec![addon(dec!(300))];
        let selections = BTreeMap::from([(addons[0].id, 2)]);
        let code = promo(DiscountType::Percentage, dec!(15));
        let mut q = input(&selections, &addons, &[]);
        q.promo_code = Some(&code);

        let rules = PricingRules::default();
        assert_eq!(calculate_quote(&q, &rules), calculate_quote(&q, &rules));
    }

    #[test]
    fn test_each_addon_adds_unit_price_times_quantity() {
        let addons = vec![addon(dec!(250)), addon(dec!(120))];
        let empty = BTreeMap::new();
        let one = BTreeMap::from([(addons[0].id, 2)]);
        let two = BTreeMap::from([(addons[0].id, 2), (addons[1].id, 3)]);
        let rules = PricingRules::default();

        let a = calculate_quote(&input(&empty, &addons, &[]), &rules).subtotal;
        let b = calculate_quote(&input(&one, &addons, &[]), &rules).subtotal;
        let c = calculate_quote(&input(&two, &addons, &[]), &rules).subtotal;
        assert_eq!(b - a, dec!(500));
        assert_eq!(c - b, dec!(360));
    }

    #[test]
    fn test_zero_quantity_and_unknown_addons_are_ignored() {
        let addons = vec![addon(dec!(250))];
        let selections = BTreeMap::from([(addons[0].id, 0), (AddonId::new(), 4)]);
        let quote = calculate_quote(&input(&selections, &addons, &[]), &PricingRules::default());
        assert_eq!(quote.addons_total, Decimal::ZERO);
        assert_eq!(quote.subtotal, dec!(1000));
    }

    #[test]
    fn test_percentage_discount() {
        let selections = BTreeMap::new();
        let code = promo(DiscountType::Percentage, dec!(10));
        let mut q = input(&selections, &[], &[]);
        q.promo_code = Some(&code);

        let quote = calculate_quote(&q, &PricingRules::default());
        assert_eq!(quote.subtotal, dec!(1000));
        assert_eq!(quote.discount, dec!(100));
        assert_eq!(quote.total, dec!(900));
    }

    #[test]
    fn test_fixed_discount() {
        let selections = BTreeMap::new();
        let code = promo(DiscountType::Fixed, dec!(200));
        let mut q = input(&selections, &[], &[]);
        q.promo_code = Some(&code);

        let quote = calculate_quote(&q, &PricingRules::default());
        assert_eq!(quote.discount, dec!(200));
        assert_eq!(quote.total, dec!(800));
    }

    #[test]
    fn test_early_and_late_fees() {
        let selections = BTreeMap::new();
        let mut q = input(&selections, &[], &[]);
        q.room_rate = dec!(2000);
        q.early_checkin = true;
        q.late_checkout = true;

        let quote = calculate_quote(&q, &PricingRules::default());
        assert_eq!(quote.fees, dec!(1000));
        assert_eq!(quote.subtotal, dec!(3000));
    }

    #[test]
    fn test_missing_dates_fall_back_to_one_night() {
        let selections = BTreeMap::new();
        let mut q = input(&selections, &[], &[]);
        q.check_in = None;
        q.check_out = None;
        q.room_rate = dec!(1500);

        let quote = calculate_quote(&q, &PricingRules::default());
        assert_eq!(quote.nights, 1);
        assert_eq!(quote.base, dec!(1500));
    }

    #[test]
    fn test_nights_floor_at_one() {
        assert_eq!(nights_between(date(2024, 7, 5), date(2024, 7, 5)), 1);
        assert_eq!(nights_between(date(2024, 7, 5), date(2024, 7, 1)), 1);
        assert_eq!(nights_between(date(2024, 7, 5), None), 1);
        assert_eq!(nights_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
    }

    #[test]
    fn test_three_nights_with_addons() {
        let addons = vec![addon(dec!(300))];
        let selections = BTreeMap::from([(addons[0].id, 2)]);
        let mut q = input(&selections, &addons, &[]);
        q.check_out = date(2024, 7, 4);
        q.room_rate = dec!(2000);

        let quote = calculate_quote(&q, &PricingRules::default());
        assert_eq!(quote.subtotal, dec!(6600));
        assert_eq!(quote.discount, Decimal::ZERO);
        assert_eq!(quote.total, dec!(6600));
    }

    #[test]
    fn test_package_added_once() {
        let packages = vec![package(dec!(4500))];
        let selections = BTreeMap::new();
        let mut q = input(&selections, &[], &packages);
        q.room_count = 3;
        q.selected_package_id = Some(packages[0].id);

        let quote = calculate_quote(&q, &PricingRules::default());
        assert_eq!(quote.package_total, dec!(4500));
        assert_eq!(quote.subtotal, dec!(7500));

        q.selected_package_id = Some(PackageId::new());
        assert_eq!(calculate_quote(&q, &PricingRules::default()).package_total, Decimal::ZERO);
    }

    #[test]
    fn test_fixed_discount_larger_than_subtotal_goes_negative() {
        let selections = BTreeMap::new();
        let code = promo(DiscountType::Fixed, dec!(1000));
        let mut q = input(&selections, &[], &[]);
        q.room_rate = dec!(500);
        q.promo_code = Some(&code);

        let quote = calculate_quote(&q, &PricingRules::default());
        assert_eq!(quote.subtotal, dec!(500));
        assert_eq!(quote.total, dec!(-500));
    }

    #[test]
    fn test_clamped_discount_stops_at_zero() {
        let selections = BTreeMap::new();
        let code = promo(DiscountType::Fixed, dec!(1000));
        let mut q = input(&selections, &[], &[]);
        q.room_rate = dec!(500);
        q.promo_code = Some(&code);
        let rules = PricingRules {
            clamp_discount: true,
            ..PricingRules::default()
        };

        let quote = calculate_quote(&q, &rules);
        assert_eq!(quote.discount, dec!(500));
        assert_eq!(quote.total, Decimal::ZERO);
    }

    #[test]
    fn test_percentage_discount_on_large_subtotal_stays_in_range() {
        let selections = BTreeMap::new();
        let code = promo(DiscountType::Percentage, dec!(50));
        let mut q = input(&selections, &[], &[]);
        q.room_rate = Decimal::MAX / dec!(2);
        q.promo_code = Some(&code);

        let quote = calculate_quote(&q, &PricingRules::default());
        assert!(quote.discount <= quote.subtotal);
        assert!(quote.total >= Decimal::ZERO);
    }
}
