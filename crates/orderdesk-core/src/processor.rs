//! # Order Processor
//!
//! Coordinates the catalog, the active customer, the pricing policy, the
//! ledger and the notifier.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place_order(index, qty)                                                │
//! │       │                                                                 │
//! │       ├── validate qty, customer, index, stock ── Err → nothing changed │
//! │       │                                                                 │
//! │       ├── quote price (discounts + tax), check revenue headroom         │
//! │       │                                                                 │
//! │       ├── decrement stock                                               │
//! │       ├── accrue 1% of final price as points, refresh tier              │
//! │       ├── append order record, bump revenue and order count             │
//! │       └── notify (fire-and-forget)                                      │
//! │                                                                         │
//! │  Ok(OrderOutcome)                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All checks run before the first mutation, so a failed call leaves the
//! processor exactly as it was.
//!
//! Pricing is parameterized on an explicit [`Customer`], so
//! [`OrderProcessor::quote`] can price for anyone; only fulfillment is tied
//! to the active customer.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::{Catalog, ProductEntry};
use crate::config::PricingConfig;
use crate::customer::Customer;
use crate::error::{CoreError, CoreResult};
use crate::ledger::{OrderLedger, OrderRecord};
use crate::money::Money;
use crate::notification::{Notifier, OrderConfirmation, TracingNotifier};
use crate::pricing::{PriceBreakdown, PricingPolicy};
use crate::report::OrderReport;
use crate::types::{LoyaltyPoints, MembershipTier};
use crate::validation::validate_quantity;

// =============================================================================
// Outcome
// =============================================================================

/// Result of a fulfilled order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderOutcome {
    pub order_id: Uuid,
    pub product_index: usize,
    pub product_name: String,
    pub quantity: u32,
    pub price: PriceBreakdown,
    pub points_earned: LoyaltyPoints,
    pub loyalty_balance: LoyaltyPoints,
    pub tier: MembershipTier,
}

/// Which pool of units an order draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StockSource {
    Available,
    Reserved,
}

// =============================================================================
// Processor
// =============================================================================

pub struct OrderProcessor<N = TracingNotifier> {
    pricing: PricingPolicy,
    catalog: Catalog,
    customer: Option<Customer>,
    ledger: OrderLedger,
    notifier: N,
}

impl OrderProcessor<TracingNotifier> {
    /// Creates a processor that logs confirmations through `tracing`.
    pub fn new(config: PricingConfig) -> CoreResult<Self> {
        Self::with_notifier(config, TracingNotifier)
    }
}

impl<N: Notifier> OrderProcessor<N> {
    pub fn with_notifier(config: PricingConfig, notifier: N) -> CoreResult<Self> {
        Ok(OrderProcessor {
            pricing: PricingPolicy::new(config)?,
            catalog: Catalog::new(),
            customer: None,
            ledger: OrderLedger::new(),
            notifier,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &OrderLedger {
        &self.ledger
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Makes `customer` the active customer, returning the previous one.
    /// The stored tier is refreshed so it matches the point balance.
    pub fn set_customer(&mut self, mut customer: Customer) -> Option<Customer> {
        customer.update_membership_tier(&self.pricing.config().tiers);
        info!(
            customer = %customer.name(),
            tier = %customer.membership_tier(),
            loyalty_points = %customer.loyalty_points(),
            "Active customer set"
        );
        self.customer.replace(customer)
    }

    /// Appends a product to the catalog and returns its index.
    pub fn add_product(
        &mut self,
        name: impl Into<String>,
        unit_price: Money,
        stock_level: u32,
    ) -> CoreResult<usize> {
        let index = self.catalog.add_product(name, unit_price, stock_level)?;
        debug!(
            index,
            product = %self.catalog.get(index)?.name(),
            %unit_price,
            stock_level,
            "Product added"
        );
        Ok(index)
    }

    fn active_customer(&self) -> CoreResult<&Customer> {
        self.customer.as_ref().ok_or(CoreError::NoActiveCustomer)
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Prices an order for any customer without touching state.
    pub fn quote(
        &self,
        index: usize,
        quantity: u32,
        customer: &Customer,
    ) -> CoreResult<PriceBreakdown> {
        let product = self.catalog.get(index)?;
        self.pricing.quote(product.unit_price(), quantity, customer)
    }

    /// Full price breakdown for the active customer.
    pub fn price_breakdown(&self, index: usize, quantity: u32) -> CoreResult<PriceBreakdown> {
        self.quote(index, quantity, self.active_customer()?)
    }

    /// Final price (discounts and tax applied) for the active customer.
    pub fn compute_final_price(&self, index: usize, quantity: u32) -> CoreResult<Money> {
        Ok(self.price_breakdown(index, quantity)?.total)
    }

    // =========================================================================
    // Stock
    // =========================================================================

    /// True when `quantity` unreserved units are on hand. Never mutates.
    pub fn check_stock(&self, index: usize, quantity: u32) -> CoreResult<bool> {
        self.catalog.check_stock(index, quantity)
    }

    /// Holds units for a later [`OrderProcessor::fulfill_reservation`].
    pub fn reserve_stock(&mut self, index: usize, quantity: u32) -> CoreResult<()> {
        self.catalog.reserve(index, quantity)?;
        let product = self.catalog.get(index)?;
        info!(
            product = %product.name(),
            quantity,
            reserved = product.reserved_quantity(),
            available = product.available(),
            "Stock reserved"
        );
        Ok(())
    }

    pub fn release_reservation(&mut self, index: usize, quantity: u32) -> CoreResult<()> {
        self.catalog.release(index, quantity)?;
        let product = self.catalog.get(index)?;
        info!(
            product = %product.name(),
            quantity,
            reserved = product.reserved_quantity(),
            "Reservation released"
        );
        Ok(())
    }

    // =========================================================================
    // Fulfillment
    // =========================================================================

    /// Sells `quantity` unreserved units to the active customer.
    pub fn place_order(&mut self, index: usize, quantity: u32) -> CoreResult<OrderOutcome> {
        self.fulfill(index, quantity, StockSource::Available)
    }

    /// Sells previously reserved units to the active customer.
    pub fn fulfill_reservation(&mut self, index: usize, quantity: u32) -> CoreResult<OrderOutcome> {
        self.fulfill(index, quantity, StockSource::Reserved)
    }

    fn fulfill(
        &mut self,
        index: usize,
        quantity: u32,
        source: StockSource,
    ) -> CoreResult<OrderOutcome> {
        // --- checks: nothing below may fail once mutation starts ---
        validate_quantity(quantity)?;
        let customer = self.active_customer()?;

        let checked = match source {
            StockSource::Available => self.catalog.ensure_available(index, quantity),
            StockSource::Reserved => self.catalog.ensure_reserved(index, quantity),
        };
        let product: &ProductEntry = match checked {
            Ok(product) => product,
            Err(err) => {
                warn!(index, quantity, %err, "Order rejected");
                return Err(err);
            }
        };

        let price = self.pricing.quote(product.unit_price(), quantity, customer)?;
        self.ledger.revenue_with(price.total)?;
        let product_name = product.name().to_string();
        let points_earned = price.points_earned;
        let senior_min_age = self.pricing.config().age.senior_min_age;
        let tiers = self.pricing.config().tiers;

        // --- mutation ---
        match source {
            StockSource::Available => self.catalog.take_stock(index, quantity)?,
            StockSource::Reserved => self.catalog.take_reserved(index, quantity)?,
        }

        let customer = self.customer.as_mut().ok_or(CoreError::NoActiveCustomer)?;
        let loyalty_balance = customer.accrue_points(points_earned);
        let tier = customer.update_membership_tier(&tiers);
        let greeting = customer.greeting(senior_min_age);

        let order_id = Uuid::new_v4();
        self.ledger.record(OrderRecord {
            id: order_id,
            placed_at: Utc::now(),
            customer_name: customer.name().to_string(),
            customer_email: customer.email().to_string(),
            product_name: product_name.clone(),
            quantity,
            price: price.total,
            ship_to: customer.address().to_string(),
        })?;

        let confirmation = OrderConfirmation {
            order_id,
            recipient: customer.email().to_string(),
            greeting,
            product_name: product_name.clone(),
            quantity,
            price: price.total,
            loyalty_balance,
            ship_to: customer.address().to_string(),
        };

        info!(
            %order_id,
            customer = %customer.name(),
            product = %product_name,
            quantity,
            total = %price.total,
            points_earned = %points_earned,
            "Order placed"
        );

        self.notifier.send_confirmation(&confirmation);

        Ok(OrderOutcome {
            order_id,
            product_index: index,
            product_name,
            quantity,
            price,
            points_earned,
            loyalty_balance,
            tier,
        })
    }

    // =========================================================================
    // Status & Reporting
    // =========================================================================

    /// The active customer's tier, derived from their current points.
    pub fn customer_status(&self) -> CoreResult<MembershipTier> {
        let customer = self.active_customer()?;
        Ok(self.pricing.tier_for(customer.loyalty_points()))
    }

    /// Summary of all processed orders. `NoOrders` before the first order.
    pub fn generate_report(&self) -> CoreResult<OrderReport> {
        let average_order_value = self.ledger.average_order_value()?;
        let customer = self.active_customer()?;

        Ok(OrderReport {
            generated_at: Utc::now(),
            customer_name: customer.name().to_string(),
            status: self.pricing.tier_for(customer.loyalty_points()),
            total_orders: self.ledger.total_orders_processed(),
            total_revenue: self.ledger.total_revenue(),
            average_order_value,
            history: self.ledger.history().to_vec(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
