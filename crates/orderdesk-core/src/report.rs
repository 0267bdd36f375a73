//! # Summary Report
//!
//! A snapshot of the ledger for the active customer. Renders as text via
//! `Display` and serializes to JSON for machine consumers.
//!
//! ```text
//! === REPORT ===
//! Customer: Alice Johnson [Silver]
//! Total Orders: 2
//! Total Revenue: $2147.44
//! Avg Order Value: $1073.72
//! Order History:
//!   Alice Johnson | alice@example.com | Laptop x2 | $1792.78 | Ship to: ...
//!   Alice Johnson | alice@example.com | Mouse x15 | $354.66 | Ship to: ...
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ledger::OrderRecord;
use crate::money::Money;
use crate::types::MembershipTier;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReport {
    pub generated_at: DateTime<Utc>,
    pub customer_name: String,
    pub status: MembershipTier,
    pub total_orders: u64,
    pub total_revenue: Money,
    pub average_order_value: Money,
    pub history: Vec<OrderRecord>,
}

impl OrderReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for OrderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== REPORT ===")?;
        writeln!(f, "Customer: {} [{}]", self.customer_name, self.status)?;
        writeln!(f, "Total Orders: {}", self.total_orders)?;
        writeln!(f, "Total Revenue: {}", self.total_revenue)?;
        writeln!(f, "Avg Order Value: {}", self.average_order_value)?;
        write!(f, "Order History:")?;
        for record in &self.history {
            write!(f, "\n  {}", record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn report() -> OrderReport {
        OrderReport {
            generated_at: Utc::now(),
            customer_name: "Alice Johnson".to_string(),
            status: MembershipTier::Silver,
            total_orders: 1,
            total_revenue: Money::from_cents(179278),
            average_order_value: Money::from_cents(179278),
            history: vec![OrderRecord {
                id: Uuid::new_v4(),
                placed_at: Utc::now(),
                customer_name: "Alice Johnson".to_string(),
                customer_email: "alice@example.com".to_string(),
                product_name: "Laptop".to_string(),
                quantity: 2,
                price: Money::from_cents(179278),
                ship_to: "123 Elm Street".to_string(),
            }],
        }
    }

    #[test]
    fn test_report_text() {
        let text = report().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "=== REPORT ===",
                "Customer: Alice Johnson [Silver]",
                "Total Orders: 1",
                "Total Revenue: $1792.78",
                "Avg Order Value: $1792.78",
                "Order History:",
                "  Alice Johnson | alice@example.com | Laptop x2 | $1792.78 | Ship to: 123 Elm Street",
            ]
        );
    }

    #[test]
    fn test_report_json() {
        let json = report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "silver");
        assert_eq!(value["total_revenue"], 179278);
        assert_eq!(value["history"][0]["product_name"], "Laptop");
    }
}
