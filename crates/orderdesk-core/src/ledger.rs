//! # Order Ledger
//!
//! Append-only history of fulfilled orders plus running totals.
//!
//! Records use the snapshot pattern: customer and product details are
//! copied at the moment of fulfillment, so later changes to the customer
//! or catalog never rewrite history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Order Record
// =============================================================================

/// A fulfilled order, frozen at the time it was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
    pub product_name: String,
    pub quantity: u32,
    /// Final price including discounts and tax.
    pub price: Money,
    pub ship_to: String,
}

/// The flattened history line:
/// `Alice Johnson | alice@example.com | Laptop x2 | $1792.78 | Ship to: 123 Elm Street`
impl fmt::Display for OrderRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} x{} | {} | Ship to: {}",
            self.customer_name,
            self.customer_email,
            self.product_name,
            self.quantity,
            self.price,
            self.ship_to
        )
    }
}

// =============================================================================
// Ledger
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLedger {
    records: Vec<OrderRecord>,
    total_revenue: Money,
    total_orders_processed: u64,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revenue after recording an order worth `price`, or `AmountOverflow`.
    pub fn revenue_with(&self, price: Money) -> CoreResult<Money> {
        self.total_revenue
            .checked_add(price)
            .ok_or(CoreError::AmountOverflow {
                what: "total revenue",
            })
    }

    /// Appends a record and updates revenue and order count together.
    /// On error nothing is recorded.
    pub fn record(&mut self, record: OrderRecord) -> CoreResult<()> {
        self.total_revenue = self.revenue_with(record.price)?;
        self.total_orders_processed += 1;
        self.records.push(record);
        Ok(())
    }

    pub fn history(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn total_revenue(&self) -> Money {
        self.total_revenue
    }

    pub fn total_orders_processed(&self) -> u64 {
        self.total_orders_processed
    }

    /// Revenue divided by order count, or `NoOrders` before the first order.
    pub fn average_order_value(&self) -> CoreResult<Money> {
        self.total_revenue
            .average_over(self.total_orders_processed)
            .ok_or(CoreError::NoOrders)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(product: &str, quantity: u32, cents: i64) -> OrderRecord {
        OrderRecord {
            id: Uuid::new_v4(),
            placed_at: Utc::now(),
            customer_name: "Alice Johnson".to_string(),
            customer_email: "alice@example.com".to_string(),
            product_name: product.to_string(),
            quantity,
            price: Money::from_cents(cents),
            ship_to: "123 Elm Street, Dhaka".to_string(),
        }
    }

    #[test]
    fn test_record_display() {
        assert_eq!(
            record("Laptop", 2, 179278).to_string(),
            "Alice Johnson | alice@example.com | Laptop x2 | $1792.78 | Ship to: 123 Elm Street, Dhaka"
        );
    }

    #[test]
    fn test_totals_track_records() {
        let mut ledger = OrderLedger::new();
        ledger.record(record("Laptop", 2, 179278)).unwrap();
        ledger.record(record("Mouse", 15, 35466)).unwrap();

        assert_eq!(ledger.history().len(), 2);
        assert_eq!(ledger.history()[1].product_name, "Mouse");
        assert_eq!(ledger.total_orders_processed(), 2);
        assert_eq!(ledger.total_revenue().cents(), 214744);
        assert_eq!(ledger.average_order_value().unwrap().cents(), 107372);
    }

    #[test]
    fn test_revenue_overflow_records_nothing() {
        let mut ledger = OrderLedger::new();
        ledger
            .record(record("Yacht", 1, 5_000_000_000_000_000_000))
            .unwrap();

        let err = ledger
            .record(record("Yacht", 1, 5_000_000_000_000_000_000))
            .unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow { .. }));
        assert_eq!(ledger.history().len(), 1);
        assert_eq!(ledger.total_orders_processed(), 1);
        assert_eq!(ledger.total_revenue().cents(), 5_000_000_000_000_000_000);
    }

    #[test]
    fn test_average_without_orders() {
        let ledger = OrderLedger::new();
        assert!(matches!(
            ledger.average_order_value(),
            Err(CoreError::NoOrders)
        ));
    }
}
