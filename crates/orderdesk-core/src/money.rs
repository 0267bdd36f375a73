//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │    Summed over thousands of orders the stray fractions drift.          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Amounts are whole cents. Intermediate products are kept exact in    │
//! │    i128 and rounded half-up once, so the ledger total is exactly the   │
//! │    sum of what each confirmation showed.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use orderdesk_core::money::Money;
//! use orderdesk_core::types::Rate;
//!
//! let price = Money::from_major_minor(29, 99); // $29.99
//! let line = price.checked_multiply_quantity(15).unwrap(); // $449.85
//! assert_eq!(line.cents(), 44985);
//!
//! let tax = line.apply_rate(Rate::from_bps(800));
//! assert_eq!(tax.cents(), 3599);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences (subtotal - discount) stay representable
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serializes as cents**: `{"total": 179278}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::money::Money;
    ///
    /// let price = Money::from_cents(99999); // $999.99
    /// assert_eq!(price.cents(), 99999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// For negative amounts only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns `rate` of this amount, rounded half-up to the cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000` in `i128`, so the
    /// intermediate product cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::money::Money;
    /// use orderdesk_core::types::Rate;
    ///
    /// let discounted = Money::from_cents(165998); // $1659.98
    /// let tax = discounted.apply_rate(Rate::from_bps(800)); // 8%
    /// // $132.7984 → $132.80
    /// assert_eq!(tax.cents(), 13280);
    /// ```
    ///
    /// A result that no longer fits in `i64` saturates.
    pub fn apply_rate(&self, rate: Rate) -> Money {
        let cents = div_round_half_up(self.0 as i128 * rate.bps() as i128, 10_000);
        Money::from_cents(cents.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Multiplies money by an order quantity. `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: u32) -> Option<Money> {
        match self.0.checked_mul(qty as i64) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts. `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Splits this amount evenly over `count` parts, rounded half-up.
    ///
    /// Returns `None` when `count` is zero instead of inventing a value.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::money::Money;
    ///
    /// let revenue = Money::from_cents(214744);
    /// assert_eq!(revenue.average_over(2), Some(Money::from_cents(107372)));
    /// assert_eq!(revenue.average_over(0), None);
    /// ```
    pub fn average_over(&self, count: u64) -> Option<Money> {
        if count == 0 {
            return None;
        }
        let cents = div_round_half_up(self.0 as i128, count as i128);
        // |average| <= |self|, so it always fits
        Some(Money::from_cents(cents as i64))
    }
}

/// `numerator / denominator` rounded half away from zero.
///
/// `denominator` must be positive.
pub(crate) fn div_round_half_up(numerator: i128, denominator: i128) -> i128 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        -((-numerator + half) / denominator)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$1792.78`. Currency text is not localized.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(999, 99).cents(), 99999);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(179278)), "$1792.78");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a.checked_add(b), Some(Money::from_cents(1500)));
        assert_eq!((a - b).cents(), 500);
        assert_eq!(a.checked_multiply_quantity(3), Some(Money::from_cents(3000)));
    }

    #[test]
    fn test_checked_arithmetic_overflow() {
        let huge = Money::from_cents(4_000_000_000_000_000_000);
        assert_eq!(huge.checked_multiply_quantity(3), None);
        assert_eq!(huge.checked_add(huge).and_then(|m| m.checked_add(huge)), None);
        assert_eq!(
            huge.checked_multiply_quantity(2),
            Some(Money::from_cents(8_000_000_000_000_000_000))
        );
    }

    #[test]
    fn test_div_round_half_up() {
        assert_eq!(div_round_half_up(5, 10), 1);
        assert_eq!(div_round_half_up(4, 10), 0);
        assert_eq!(div_round_half_up(-5, 10), -1);
        assert_eq!(div_round_half_up(-4, 10), 0);
        assert_eq!(div_round_half_up(537_660_720_000, 100_000_000), 5377);
    }

    #[test]
    fn test_apply_rate_rounds_half_up() {
        // $10.00 at 8.25% = $0.825 → $0.83
        let amount = Money::from_cents(1000);
        assert_eq!(amount.apply_rate(Rate::from_bps(825)).cents(), 83);

        // 17% of $1999.98 = $339.9966 → $340.00
        let subtotal = Money::from_cents(199998);
        assert_eq!(subtotal.apply_rate(Rate::from_bps(1700)).cents(), 34000);
    }

    #[test]
    fn test_average_over() {
        assert_eq!(
            Money::from_cents(1000).average_over(3),
            Some(Money::from_cents(333))
        );
        assert_eq!(
            Money::from_cents(1001).average_over(2),
            Some(Money::from_cents(501))
        );
        assert_eq!(Money::from_cents(1000).average_over(0), None);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!Money::from_cents(-1).is_positive());
    }
}
