//! # orderdesk-core: Order Pricing and Fulfillment
//!
//! Business logic for pricing orders, tracking stock and accruing customer
//! loyalty. Nothing here touches files, the network or the environment.
//! Fulfilled orders are stamped with the wall clock (`Utc::now`) and a
//! random id (`Uuid::new_v4`); everything else is deterministic.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Orderdesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 orderdesk-cli (demo driver)                     │   │
//! │  │    config file + env ──► setup ──► place orders ──► report      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ orderdesk-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │                    ┌──────────────────┐                         │   │
//! │  │                    │  OrderProcessor  │                         │   │
//! │  │                    └───────┬──────────┘                         │   │
//! │  │        ┌──────────┬────────┼─────────┬────────────┐             │   │
//! │  │   ┌────▼────┐ ┌───▼────┐ ┌─▼──────┐ ┌▼────────┐ ┌─▼────────┐   │   │
//! │  │   │ Pricing │ │Catalog │ │Customer│ │ Ledger  │ │ Notifier │   │   │
//! │  │   │ Policy  │ │ stock  │ │ points │ │ history │ │  (trait) │   │   │
//! │  │   └─────────┘ └────────┘ └────────┘ └─────────┘ └──────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO NETWORK • NO ENVIRONMENT • INTEGER MONEY MATH   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Rates, loyalty points, membership tiers
//! - [`config`] - Pricing configuration (discount bands, tax, tiers)
//! - [`pricing`] - Discount stacking and tax
//! - [`customer`] - Customer entity and loyalty accrual
//! - [`catalog`] - Product entries, stock and reservations
//! - [`ledger`] - Order records and running totals
//! - [`notification`] - Order confirmation sink
//! - [`processor`] - The order processor tying everything together
//! - [`report`] - Summary report
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use orderdesk_core::{Customer, LoyaltyPoints, Money, OrderProcessor, PricingConfig};
//!
//! let mut processor = OrderProcessor::new(PricingConfig::default()).unwrap();
//! let laptop = processor
//!     .add_product("Laptop", Money::from_major_minor(999, 99), 50)
//!     .unwrap();
//!
//! processor.set_customer(
//!     Customer::new("Alice Johnson", "alice@example.com", "123 Elm Street", 67)
//!         .with_loyalty_points(LoyaltyPoints::from_whole(850)),
//! );
//!
//! // 17% off (2% loyalty + 15% senior), then 8% tax
//! let outcome = processor.place_order(laptop, 2).unwrap();
//! assert_eq!(outcome.price.total.cents(), 179278);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod customer;
pub mod error;
pub mod ledger;
pub mod money;
pub mod notification;
pub mod pricing;
pub mod processor;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, ProductEntry};
pub use config::{AgeDiscounts, LoyaltyDiscounts, PricingConfig, TierThresholds, VolumeBand};
pub use customer::Customer;
pub use error::{ConfigError, CoreError, CoreResult, ValidationError};
pub use ledger::{OrderLedger, OrderRecord};
pub use money::Money;
pub use notification::{Notifier, OrderConfirmation, RecordingNotifier, TracingNotifier};
pub use pricing::{PriceBreakdown, PricingPolicy};
pub use processor::{OrderOutcome, OrderProcessor};
pub use report::OrderReport;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
