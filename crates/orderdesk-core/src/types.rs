//! # Domain Types
//!
//! Small value types shared by pricing, customers and configuration.
//!
//! ```text
//! ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐
//! │      Rate       │   │  LoyaltyPoints  │   │ MembershipTier  │
//! │  ─────────────  │   │  ─────────────  │   │  ─────────────  │
//! │  bps (u32)      │   │  hundredths     │   │  Standard       │
//! │  800 = 8%       │   │  85000 = 850.00 │   │  Silver         │
//! └─────────────────┘   └─────────────────┘   │  Gold           │
//!                                             └─────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::div_round_half_up;

// =============================================================================
// Rate
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 800 bps = 8% and every rate the
/// pricing rules use is an exact integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(u32);

impl Rate {
    /// 100%.
    pub const FULL: Rate = Rate(10_000);

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        Rate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two rates without wrapping.
    #[inline]
    pub const fn saturating_add(self, other: Rate) -> Rate {
        Rate(self.0.saturating_add(other.0))
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

// =============================================================================
// Loyalty Points
// =============================================================================

/// Loyalty point balance, stored as hundredths of a point.
///
/// Points are earned as a percentage of the dollar amount of an order, so a
/// $1792.78 order at 1% earns 17.93 points. Keeping hundredths as an integer
/// means balances never pick up float noise.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LoyaltyPoints(u64);

impl LoyaltyPoints {
    #[inline]
    pub const fn zero() -> Self {
        LoyaltyPoints(0)
    }

    /// Creates a balance from hundredths of a point (`85093` = 850.93).
    #[inline]
    pub const fn from_hundredths(hundredths: u64) -> Self {
        LoyaltyPoints(hundredths)
    }

    /// Creates a balance from whole points.
    #[inline]
    pub const fn from_whole(points: u64) -> Self {
        LoyaltyPoints(points.saturating_mul(100))
    }

    #[inline]
    pub const fn hundredths(&self) -> u64 {
        self.0
    }

    /// Points earned for spending `cents_num / cents_den` cents at
    /// `earn_rate`, rounded half-up to the hundredth. The amount is a
    /// fraction so an unrounded price can be passed in. Non-positive
    /// amounts earn nothing.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::types::{LoyaltyPoints, Rate};
    ///
    /// let earned = LoyaltyPoints::earned_on(179278, 1, Rate::from_bps(100));
    /// assert_eq!(earned, LoyaltyPoints::from_hundredths(1793)); // 17.93 points
    /// ```
    pub fn earned_on(cents_num: i128, cents_den: i128, earn_rate: Rate) -> Self {
        if cents_num <= 0 || cents_den <= 0 {
            return LoyaltyPoints::zero();
        }
        // cents * bps / 10000 == dollars * rate * 100 == hundredths of a point
        let hundredths = div_round_half_up(
            cents_num.saturating_mul(earn_rate.bps() as i128),
            cents_den.saturating_mul(10_000),
        );
        LoyaltyPoints(u64::try_from(hundredths).unwrap_or(u64::MAX))
    }

    /// Adds points without wrapping.
    #[inline]
    pub const fn saturating_add(self, other: LoyaltyPoints) -> LoyaltyPoints {
        LoyaltyPoints(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for LoyaltyPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// =============================================================================
// Membership Tier
// =============================================================================

/// Customer classification derived from loyalty points.
///
/// Ordered so that `Gold > Silver > Standard`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MembershipTier {
    #[default]
    Standard,
    Silver,
    Gold,
}

impl MembershipTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipTier::Standard => "Standard",
            MembershipTier::Silver => "Silver",
            MembershipTier::Gold => "Gold",
        }
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_from_bps() {
        let rate = Rate::from_bps(825);
        assert_eq!(rate.bps(), 825);
        assert!((rate.percentage() - 8.25).abs() < 0.001);
        assert_eq!(rate.to_string(), "8.25%");
    }

    #[test]
    fn test_rate_from_percentage() {
        assert_eq!(Rate::from_percentage(8.0).bps(), 800);
        assert_eq!(Rate::from_percentage(15.0), Rate::from_bps(1500));
    }

    #[test]
    fn test_rate_saturating_add() {
        let sum = Rate::from_bps(200).saturating_add(Rate::from_bps(1500));
        assert_eq!(sum.bps(), 1700);
        assert_eq!(
            Rate::from_bps(u32::MAX).saturating_add(Rate::FULL).bps(),
            u32::MAX
        );
    }

    #[test]
    fn test_loyalty_points_display() {
        assert_eq!(LoyaltyPoints::from_whole(850).to_string(), "850.00");
        assert_eq!(LoyaltyPoints::from_hundredths(87148).to_string(), "871.48");
        assert_eq!(LoyaltyPoints::from_hundredths(5).to_string(), "0.05");
    }

    #[test]
    fn test_points_earned() {
        let rate = Rate::from_bps(100);
        assert_eq!(LoyaltyPoints::earned_on(35466, 1, rate).hundredths(), 355);
        // $49.496 earns 0.49496 points → 0.49, not the 0.50 of its rounded price
        assert_eq!(LoyaltyPoints::earned_on(49496, 10, rate).hundredths(), 49);
        assert_eq!(LoyaltyPoints::earned_on(0, 1, rate), LoyaltyPoints::zero());
        assert_eq!(LoyaltyPoints::earned_on(-500, 1, rate), LoyaltyPoints::zero());
    }

    #[test]
    fn test_tier_ordering_and_display() {
        assert!(MembershipTier::Gold > MembershipTier::Silver);
        assert!(MembershipTier::Silver > MembershipTier::Standard);
        assert_eq!(MembershipTier::default(), MembershipTier::Standard);
        assert_eq!(MembershipTier::Silver.to_string(), "Silver");
    }
}
