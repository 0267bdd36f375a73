//! # Customer
//!
//! Identity, age and loyalty state for the person placing orders.
//!
//! ## Loyalty Lifecycle
//! ```text
//! Customer::new(..)            points = 0, tier = Standard
//!      │
//!      ▼
//! accrue_points(17.93)         points only ever grow
//!      │
//!      ▼
//! update_membership_tier(..)   tier re-derived from points (explicit step)
//! ```
//!
//! Fields are private; the only way to change the point balance is
//! [`Customer::accrue_points`], so a balance never decreases.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::TierThresholds;
use crate::types::{LoyaltyPoints, MembershipTier};

/// A customer of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    name: String,
    email: String,
    address: String,
    age: u32,
    loyalty_points: LoyaltyPoints,
    membership_tier: MembershipTier,
}

impl Customer {
    /// Creates a customer with no points and the Standard tier.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        age: u32,
    ) -> Self {
        Customer {
            name: name.into(),
            email: email.into(),
            address: address.into(),
            age,
            loyalty_points: LoyaltyPoints::zero(),
            membership_tier: MembershipTier::Standard,
        }
    }

    /// Seeds an opening point balance (e.g. carried over from another
    /// system). The tier is left for [`Customer::update_membership_tier`].
    pub fn with_loyalty_points(mut self, points: LoyaltyPoints) -> Self {
        self.loyalty_points = points;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn loyalty_points(&self) -> LoyaltyPoints {
        self.loyalty_points
    }

    /// Tier as of the last [`Customer::update_membership_tier`] call.
    pub fn membership_tier(&self) -> MembershipTier {
        self.membership_tier
    }

    /// Adds earned points and returns the new balance.
    pub fn accrue_points(&mut self, earned: LoyaltyPoints) -> LoyaltyPoints {
        self.loyalty_points = self.loyalty_points.saturating_add(earned);
        self.loyalty_points
    }

    /// Re-derives the stored tier from the current balance.
    pub fn update_membership_tier(&mut self, tiers: &TierThresholds) -> MembershipTier {
        self.membership_tier = tiers.classify(self.loyalty_points);
        self.membership_tier
    }

    pub fn is_senior(&self, senior_min_age: u32) -> bool {
        self.age >= senior_min_age
    }

    /// Salutation used in order confirmations.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::customer::Customer;
    ///
    /// let alice = Customer::new("Alice", "alice@example.com", "123 Elm Street", 67);
    /// assert_eq!(alice.greeting(65), "Dear Senior Customer Alice");
    ///
    /// let bob = Customer::new("Bob", "bob@example.com", "456 Oak Ave", 22);
    /// assert_eq!(bob.greeting(65), "Hello Bob");
    /// ```
    pub fn greeting(&self, senior_min_age: u32) -> String {
        if self.is_senior(senior_min_age) {
            format!("Dear Senior Customer {}", self.name)
        } else {
            format!("Hello {}", self.name)
        }
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> [{}]", self.name, self.email, self.membership_tier)
    }
}
