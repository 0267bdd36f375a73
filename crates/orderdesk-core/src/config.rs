//! # Pricing Configuration
//!
//! Every constant the pricing rules use lives here: discount bands, the tax
//! rate, the loyalty earn rate, tier thresholds and the discount cap.
//!
//! ## Defaults
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Volume      qty > 100 → 30%   qty > 50 → 20%   qty > 10 → 10%          │
//! │  Loyalty     Gold (> 1000 pts) → 5%   Silver (> 500 pts) → 2%           │
//! │  Age         age >= 65 → 15%   age <= 18 → 10%                          │
//! │  Cap         combined discount never exceeds 50%                        │
//! │  Tax         8% on the discounted total                                 │
//! │  Earn rate   1% of the final price, in points                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! Rates are basis points. Every section is optional.
//! ```toml
//! tax_rate = 800
//! loyalty_earn_rate = 100
//! max_discount = 5000
//!
//! [[volume_bands]]
//! above_quantity = 10
//! discount = 1000
//!
//! [[volume_bands]]
//! above_quantity = 50
//! discount = 2000
//!
//! [tiers]
//! silver_above = 500
//! gold_above = 1000
//!
//! [loyalty_discounts]
//! silver = 200
//! gold = 500
//!
//! [age]
//! senior_min_age = 65
//! senior = 1500
//! youth_max_age = 18
//! youth = 1000
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ValidationError};
use crate::types::{LoyaltyPoints, MembershipTier, Rate};
use crate::validation::{validate_rate, ValidationResult};

// =============================================================================
// Volume Bands
// =============================================================================

/// A quantity discount that applies when the ordered quantity is strictly
/// greater than `above_quantity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeBand {
    pub above_quantity: u32,
    pub discount: Rate,
}

fn default_volume_bands() -> Vec<VolumeBand> {
    vec![
        VolumeBand {
            above_quantity: 10,
            discount: Rate::from_bps(1000),
        },
        VolumeBand {
            above_quantity: 50,
            discount: Rate::from_bps(2000),
        },
        VolumeBand {
            above_quantity: 100,
            discount: Rate::from_bps(3000),
        },
    ]
}

// =============================================================================
// Tier Thresholds
// =============================================================================

/// Loyalty point thresholds for membership tiers, in whole points.
///
/// This is the only place tiers are derived from points: customer status,
/// the stored membership tier and the loyalty discount all go through
/// [`TierThresholds::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Silver when points are strictly above this.
    #[serde(default = "default_silver_above")]
    pub silver_above: u64,

    /// Gold when points are strictly above this.
    #[serde(default = "default_gold_above")]
    pub gold_above: u64,
}

fn default_silver_above() -> u64 {
    500
}

fn default_gold_above() -> u64 {
    1000
}

impl Default for TierThresholds {
    fn default() -> Self {
        TierThresholds {
            silver_above: default_silver_above(),
            gold_above: default_gold_above(),
        }
    }
}

impl TierThresholds {
    /// Classifies a point balance.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::config::TierThresholds;
    /// use orderdesk_core::types::{LoyaltyPoints, MembershipTier};
    ///
    /// let tiers = TierThresholds::default();
    /// assert_eq!(tiers.classify(LoyaltyPoints::from_whole(500)), MembershipTier::Standard);
    /// assert_eq!(tiers.classify(LoyaltyPoints::from_hundredths(50001)), MembershipTier::Silver);
    /// assert_eq!(tiers.classify(LoyaltyPoints::from_whole(1001)), MembershipTier::Gold);
    /// ```
    pub fn classify(&self, points: LoyaltyPoints) -> MembershipTier {
        let gold = LoyaltyPoints::from_whole(self.gold_above);
        let silver = LoyaltyPoints::from_whole(self.silver_above);

        if points > gold {
            MembershipTier::Gold
        } else if points > silver {
            MembershipTier::Silver
        } else {
            MembershipTier::Standard
        }
    }
}

// =============================================================================
// Loyalty Discounts
// =============================================================================

/// Discount granted per membership tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyDiscounts {
    #[serde(default = "default_silver_discount")]
    pub silver: Rate,

    #[serde(default = "default_gold_discount")]
    pub gold: Rate,
}

fn default_silver_discount() -> Rate {
    Rate::from_bps(200)
}

fn default_gold_discount() -> Rate {
    Rate::from_bps(500)
}

impl Default for LoyaltyDiscounts {
    fn default() -> Self {
        LoyaltyDiscounts {
            silver: default_silver_discount(),
            gold: default_gold_discount(),
        }
    }
}

impl LoyaltyDiscounts {
    pub fn for_tier(&self, tier: MembershipTier) -> Rate {
        match tier {
            MembershipTier::Standard => Rate::zero(),
            MembershipTier::Silver => self.silver,
            MembershipTier::Gold => self.gold,
        }
    }
}

// =============================================================================
// Age Discounts
// =============================================================================

/// Senior and youth discounts. The bands are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeDiscounts {
    /// Customers at or above this age are seniors (also drives the greeting).
    #[serde(default = "default_senior_min_age")]
    pub senior_min_age: u32,

    #[serde(default = "default_senior_discount")]
    pub senior: Rate,

    /// Customers at or below this age get the youth discount.
    #[serde(default = "default_youth_max_age")]
    pub youth_max_age: u32,

    #[serde(default = "default_youth_discount")]
    pub youth: Rate,
}

fn default_senior_min_age() -> u32 {
    65
}

fn default_senior_discount() -> Rate {
    Rate::from_bps(1500)
}

fn default_youth_max_age() -> u32 {
    18
}

fn default_youth_discount() -> Rate {
    Rate::from_bps(1000)
}

impl Default for AgeDiscounts {
    fn default() -> Self {
        AgeDiscounts {
            senior_min_age: default_senior_min_age(),
            senior: default_senior_discount(),
            youth_max_age: default_youth_max_age(),
            youth: default_youth_discount(),
        }
    }
}

impl AgeDiscounts {
    pub fn for_age(&self, age: u32) -> Rate {
        if age >= self.senior_min_age {
            self.senior
        } else if age <= self.youth_max_age {
            self.youth
        } else {
            Rate::zero()
        }
    }
}

// =============================================================================
// Pricing Config
// =============================================================================

/// Complete pricing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Upper bound on the combined discount.
    #[serde(default = "default_max_discount")]
    pub max_discount: Rate,

    /// Tax applied to the discounted total.
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Rate,

    /// Share of the final price credited as loyalty points.
    #[serde(default = "default_loyalty_earn_rate")]
    pub loyalty_earn_rate: Rate,

    /// Quantity discount bands, ascending by `above_quantity`.
    #[serde(default = "default_volume_bands")]
    pub volume_bands: Vec<VolumeBand>,

    #[serde(default)]
    pub loyalty_discounts: LoyaltyDiscounts,

    #[serde(default)]
    pub age: AgeDiscounts,

    #[serde(default)]
    pub tiers: TierThresholds,
}

fn default_max_discount() -> Rate {
    Rate::from_bps(5000)
}

fn default_tax_rate() -> Rate {
    Rate::from_bps(800)
}

fn default_loyalty_earn_rate() -> Rate {
    Rate::from_bps(100)
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            max_discount: default_max_discount(),
            tax_rate: default_tax_rate(),
            loyalty_earn_rate: default_loyalty_earn_rate(),
            volume_bands: default_volume_bands(),
            loyalty_discounts: LoyaltyDiscounts::default(),
            age: AgeDiscounts::default(),
            tiers: TierThresholds::default(),
        }
    }
}

impl PricingConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: PricingConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the rules that keep prices meaningful.
    ///
    /// ## Rules
    /// - Every rate lies within 0%..=100%
    /// - Volume bands are strictly ascending by quantity
    /// - Silver threshold is below the gold threshold
    /// - Youth band ends before the senior band starts
    pub fn validate(&self) -> ValidationResult<()> {
        validate_rate("max_discount", self.max_discount)?;
        validate_rate("tax_rate", self.tax_rate)?;
        validate_rate("loyalty_earn_rate", self.loyalty_earn_rate)?;
        validate_rate("loyalty_discounts.silver", self.loyalty_discounts.silver)?;
        validate_rate("loyalty_discounts.gold", self.loyalty_discounts.gold)?;
        validate_rate("age.senior", self.age.senior)?;
        validate_rate("age.youth", self.age.youth)?;

        for band in &self.volume_bands {
            validate_rate("volume_bands.discount", band.discount)?;
        }

        if self
            .volume_bands
            .windows(2)
            .any(|pair| pair[0].above_quantity >= pair[1].above_quantity)
        {
            return Err(ValidationError::InvalidFormat {
                field: "volume_bands".to_string(),
                reason: "bands must be strictly ascending by above_quantity".to_string(),
            });
        }

        if self.tiers.silver_above >= self.tiers.gold_above {
            return Err(ValidationError::InvalidFormat {
                field: "tiers".to_string(),
                reason: "silver_above must be below gold_above".to_string(),
            });
        }

        if self.age.youth_max_age >= self.age.senior_min_age {
            return Err(ValidationError::InvalidFormat {
                field: "age".to_string(),
                reason: "youth_max_age must be below senior_min_age".to_string(),
            });
        }

        Ok(())
    }

    /// Highest band whose threshold the quantity exceeds, or zero.
    pub fn volume_discount(&self, quantity: u32) -> Rate {
        self.volume_bands
            .iter()
            .rev()
            .find(|band| quantity > band.above_quantity)
            .map(|band| band.discount)
            .unwrap_or_default()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
