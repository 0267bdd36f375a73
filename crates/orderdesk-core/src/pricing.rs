//! # Pricing Policy
//!
//! Turns a unit price, a quantity and a customer into a final price.
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal   = unit_price × quantity                                     │
//! │                                                                         │
//! │  discount   = volume band      (highest band the quantity exceeds)      │
//! │             + loyalty band     (by tier derived from points)            │
//! │             + age band         (senior or youth, never both)            │
//! │  discount   = min(discount, max_discount)                               │
//! │                                                                         │
//! │  total      = round(subtotal × (1 - discount) × (1 + tax_rate))         │
//! │               exact in i128, rounded half-up to the cent ONCE           │
//! │                                                                         │
//! │  discounted = subtotal - round(subtotal × discount)   (display only)    │
//! │  tax        = total - discounted                      (display only)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Loyalty points are earned on the exact total, before rounding.
//!
//! ## Worked Example
//! Laptop $999.99 × 2 for a 67 year old with 850 points:
//! ```text
//! subtotal   $1999.98
//! discount   0% volume + 2% loyalty (Silver) + 15% senior = 17%
//! total      $1999.98 × 0.83 × 1.08 = $1792.782072 → $1792.78
//! discounted $1999.98 - $340.00 = $1659.98
//! tax        $1792.78 - $1659.98 = $132.80
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PricingConfig;
use crate::customer::Customer;
use crate::error::{CoreError, CoreResult};
use crate::money::{div_round_half_up, Money};
use crate::types::{LoyaltyPoints, MembershipTier, Rate};
use crate::validation::validate_quantity;

// =============================================================================
// Price Breakdown
// =============================================================================

/// Every intermediate value of a price calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub unit_price: Money,
    pub quantity: u32,
    pub subtotal: Money,
    pub volume_discount: Rate,
    pub loyalty_discount: Rate,
    pub age_discount: Rate,
    /// Sum of the three components after the cap.
    pub applied_discount: Rate,
    pub discount_amount: Money,
    pub discounted_total: Money,
    pub tax: Money,
    /// Final price, rounded once from the exact value.
    pub total: Money,
    /// Loyalty points this price earns, computed from the unrounded total.
    pub points_earned: LoyaltyPoints,
}

impl PriceBreakdown {
    /// True when the cap cut into the stacked discount.
    pub fn discount_capped(&self) -> bool {
        let stacked = self
            .volume_discount
            .saturating_add(self.loyalty_discount)
            .saturating_add(self.age_discount);
        stacked > self.applied_discount
    }
}

// =============================================================================
// Pricing Policy
// =============================================================================

/// Validated pricing rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingPolicy {
    config: PricingConfig,
}

impl PricingPolicy {
    /// Builds a policy, rejecting configs that could produce nonsense prices.
    pub fn new(config: PricingConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(PricingPolicy { config })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Tier for a point balance. The single source of tier classification.
    pub fn tier_for(&self, points: LoyaltyPoints) -> MembershipTier {
        self.config.tiers.classify(points)
    }

    pub fn volume_discount(&self, quantity: u32) -> Rate {
        self.config.volume_discount(quantity)
    }

    pub fn loyalty_discount(&self, points: LoyaltyPoints) -> Rate {
        self.config.loyalty_discounts.for_tier(self.tier_for(points))
    }

    pub fn age_discount(&self, age: u32) -> Rate {
        self.config.age.for_age(age)
    }

    /// Prices `quantity` units at `unit_price` for `customer`. Pure.
    pub fn quote(
        &self,
        unit_price: Money,
        quantity: u32,
        customer: &Customer,
    ) -> CoreResult<PriceBreakdown> {
        validate_quantity(quantity)?;

        let subtotal = unit_price
            .checked_multiply_quantity(quantity)
            .ok_or(CoreError::AmountOverflow { what: "subtotal" })?;

        let volume_discount = self.volume_discount(quantity);
        let loyalty_discount = self.loyalty_discount(customer.loyalty_points());
        let age_discount = self.age_discount(customer.age());

        let applied_discount = volume_discount
            .saturating_add(loyalty_discount)
            .saturating_add(age_discount)
            .min(self.config.max_discount);

        let exact = exact_total(subtotal, applied_discount, self.config.tax_rate);
        let total = i64::try_from(div_round_half_up(exact, EXACT_SCALE))
            .map(Money::from_cents)
            .map_err(|_| CoreError::AmountOverflow { what: "total" })?;
        let points_earned =
            LoyaltyPoints::earned_on(exact, EXACT_SCALE, self.config.loyalty_earn_rate);

        let discount_amount = subtotal.apply_rate(applied_discount);
        let discounted_total = subtotal - discount_amount;
        let tax = total - discounted_total;

        debug!(
            %subtotal,
            %volume_discount,
            %loyalty_discount,
            %age_discount,
            %applied_discount,
            %tax,
            %total,
            "Priced order line"
        );

        Ok(PriceBreakdown {
            unit_price,
            quantity,
            subtotal,
            volume_discount,
            loyalty_discount,
            age_discount,
            applied_discount,
            discount_amount,
            discounted_total,
            tax,
            total,
            points_earned,
        })
    }
}

/// Denominator of [`exact_total`]: one cent is `Rate::FULL²` units.
const EXACT_SCALE: i128 = (Rate::FULL.bps() as i128) * (Rate::FULL.bps() as i128);

/// `subtotal × (1 - discount) × (1 + tax)` in units of 1/[`EXACT_SCALE`] cent.
///
/// Cannot overflow: |cents| < 2^63 and both factors are at most 2 × 10^4.
fn exact_total(subtotal: Money, discount: Rate, tax: Rate) -> i128 {
    let full = Rate::FULL.bps() as i128;
    let kept = (full - discount.bps() as i128).max(0);
    let taxed = full + tax.bps() as i128;
    subtotal.cents() as i128 * kept * taxed
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AgeDiscounts, VolumeBand};

    fn policy() -> PricingPolicy {
        PricingPolicy::new(PricingConfig::default()).unwrap()
    }

    fn customer(age: u32, points: u64) -> Customer {
        Customer::new("Test", "test@example.com", "1 Test Lane", age)
            .with_loyalty_points(LoyaltyPoints::from_whole(points))
    }

    #[test]
    fn test_senior_silver_laptop() {
        let price = policy()
            .quote(Money::from_cents(99999), 2, &customer(67, 850))
            .unwrap();

        assert_eq!(price.subtotal.cents(), 199998);
        assert_eq!(price.volume_discount, Rate::zero());
        assert_eq!(price.loyalty_discount, Rate::from_bps(200));
        assert_eq!(price.age_discount, Rate::from_bps(1500));
        assert_eq!(price.applied_discount, Rate::from_bps(1700));
        assert_eq!(price.discount_amount.cents(), 34000);
        assert_eq!(price.discounted_total.cents(), 165998);
        assert_eq!(price.tax.cents(), 13280);
        assert_eq!(price.total.cents(), 179278);
        assert!(!price.discount_capped());
    }

    #[test]
    fn test_bulk_mouse_stacks_volume_band() {
        let price = policy()
            .quote(Money::from_cents(2999), 15, &customer(67, 867))
            .unwrap();

        assert_eq!(price.applied_discount, Rate::from_bps(2700));
        assert_eq!(price.discounted_total.cents(), 32839);
        assert_eq!(price.total.cents(), 35466);
    }

    #[test]
    fn test_no_discounts_only_tax() {
        let price = policy()
            .quote(Money::from_cents(1000), 1, &customer(30, 0))
            .unwrap();
        assert_eq!(price.applied_discount, Rate::zero());
        assert_eq!(price.total.cents(), 1080);
    }

    #[test]
    fn test_youth_gold_bulk() {
        // 30% volume + 5% gold + 10% youth = 45%
        let price = policy()
            .quote(Money::from_cents(100), 101, &customer(16, 1500))
            .unwrap();
        assert_eq!(price.applied_discount, Rate::from_bps(4500));
        assert_eq!(price.discounted_total.cents(), 5555);
    }

    #[test]
    fn test_discount_is_capped() {
        let config = PricingConfig {
            max_discount: Rate::from_bps(4000),
            ..PricingConfig::default()
        };
        let policy = PricingPolicy::new(config).unwrap();

        // 30% + 5% + 15% = 50%, capped at 40%
        let price = policy
            .quote(Money::from_cents(10000), 200, &customer(70, 2000))
            .unwrap();
        assert_eq!(price.applied_discount, Rate::from_bps(4000));
        assert!(price.discount_capped());
        assert_eq!(price.discounted_total.cents(), 1_200_000);
    }

    #[test]
    fn test_extreme_bands_never_go_negative() {
        let config = PricingConfig {
            max_discount: Rate::FULL,
            volume_bands: vec![VolumeBand {
                above_quantity: 0,
                discount: Rate::FULL,
            }],
            age: AgeDiscounts {
                senior: Rate::FULL,
                ..AgeDiscounts::default()
            },
            ..PricingConfig::default()
        };
        let policy = PricingPolicy::new(config).unwrap();

        let price = policy
            .quote(Money::from_cents(5000), 3, &customer(80, 0))
            .unwrap();
        assert_eq!(price.applied_discount, Rate::FULL);
        assert_eq!(price.total, Money::zero());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert!(policy()
            .quote(Money::from_cents(100), 0, &customer(30, 0))
            .is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PricingConfig {
            tax_rate: Rate::from_bps(10_001),
            ..PricingConfig::default()
        };
        assert!(PricingPolicy::new(config).is_err());
    }

    #[test]
    fn test_points_earned() {
        let price = policy()
            .quote(Money::from_cents(99999), 2, &customer(67, 850))
            .unwrap();
        assert_eq!(price.points_earned.to_string(), "17.93");
    }

    #[test]
    fn test_total_rounded_once() {
        // $59.98 × 0.83 × 1.08 = $53.766; rounding discount and tax
        // separately would give $53.76
        let price = policy()
            .quote(Money::from_cents(5998), 2, &customer(67, 850))
            .unwrap();
        assert_eq!(price.total.cents(), 5377);
        assert_eq!(price.total.to_string(), "$53.77");
        assert_eq!(price.discounted_total.cents(), 4978);
        assert_eq!(price.tax.cents(), 399);
    }

    #[test]
    fn test_subtotal_overflow_is_an_error() {
        let result =
            policy().quote(Money::from_cents(4_000_000_000_000_000_000), 3, &customer(30, 0));
        assert!(matches!(
            result,
            Err(CoreError::AmountOverflow { what: "subtotal" })
        ));
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        // Subtotal fits, adding 8% tax does not
        let result =
            policy().quote(Money::from_cents(9_000_000_000_000_000_000), 1, &customer(30, 0));
        assert!(matches!(
            result,
            Err(CoreError::AmountOverflow { what: "total" })
        ));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn band_key(quantity: u32) -> u32 {
            match quantity {
                0..=10 => 0,
                11..=50 => 1,
                51..=100 => 2,
                _ => 3,
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            #[test]
            fn price_non_decreasing_in_unit_price(
                cents in 1i64..1_000_000,
                bump in 0i64..1_000_000,
                quantity in 1u32..500,
                age in 0u32..100,
                points in 0u64..2000,
            ) {
                let policy = policy();
                let customer = customer(age, points);
                let low = policy.quote(Money::from_cents(cents), quantity, &customer).unwrap();
                let high = policy.quote(Money::from_cents(cents + bump), quantity, &customer).unwrap();
                prop_assert!(high.total >= low.total);
            }

            #[test]
            fn price_non_decreasing_in_quantity_within_band(
                cents in 1i64..1_000_000,
                quantity in 1u32..500,
                extra in 0u32..100,
                age in 0u32..100,
                points in 0u64..2000,
            ) {
                prop_assume!(band_key(quantity) == band_key(quantity + extra));
                let policy = policy();
                let customer = customer(age, points);
                let low = policy.quote(Money::from_cents(cents), quantity, &customer).unwrap();
                let high = policy.quote(Money::from_cents(cents), quantity + extra, &customer).unwrap();
                prop_assert!(high.total >= low.total);
            }

            #[test]
            fn discount_is_sum_of_exclusive_bands(
                quantity in 1u32..500,
                age in 0u32..120,
                points in 0u64..3000,
            ) {
                let policy = policy();
                let price = policy
                    .quote(Money::from_cents(1000), quantity, &customer(age, points))
                    .unwrap();

                let volume = [0u32, 1000, 2000, 3000][band_key(quantity) as usize];
                prop_assert_eq!(price.volume_discount.bps(), volume);
                prop_assert!([0u32, 200, 500].contains(&price.loyalty_discount.bps()));
                prop_assert!([0u32, 1000, 1500].contains(&price.age_discount.bps()));
                prop_assert_eq!(
                    price.applied_discount.bps(),
                    price.volume_discount.bps() + price.loyalty_discount.bps() + price.age_discount.bps()
                );
                prop_assert!(price.total.is_positive());
            }
        }
    }
}
