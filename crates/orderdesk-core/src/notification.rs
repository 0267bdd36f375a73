//! # Order Notifications
//!
//! The processor hands a confirmation to a [`Notifier`] after each fulfilled
//! order and moves on. Delivery and formatting belong to the notifier; a
//! notifier cannot fail the order.
//!
//! ## Implementations
//! - [`TracingNotifier`] - emits the confirmation as a structured log event
//! - [`RecordingNotifier`] - keeps confirmations in memory

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use uuid::Uuid;

use crate::money::Money;
use crate::types::LoyaltyPoints;

// =============================================================================
// Confirmation
// =============================================================================

/// Everything a confirmation message needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub recipient: String,
    pub greeting: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: Money,
    pub loyalty_balance: LoyaltyPoints,
    pub ship_to: String,
}

/// Renders the confirmation as a plain-text message.
impl fmt::Display for OrderConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "To: {}", self.recipient)?;
        writeln!(f, "{},", self.greeting)?;
        writeln!(
            f,
            "Your order: {} x{} = {}",
            self.product_name, self.quantity, self.price
        )?;
        writeln!(f, "Loyalty points balance: {}", self.loyalty_balance)?;
        write!(f, "Shipping to: {}", self.ship_to)
    }
}

// =============================================================================
// Notifier Trait
// =============================================================================

/// Sink for order confirmations. Fire-and-forget: nothing is returned.
pub trait Notifier {
    fn send_confirmation(&mut self, confirmation: &OrderConfirmation);
}

/// Logs confirmations through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn send_confirmation(&mut self, confirmation: &OrderConfirmation) {
        info!(
            order_id = %confirmation.order_id,
            to = %confirmation.recipient,
            product = %confirmation.product_name,
            quantity = confirmation.quantity,
            price = %confirmation.price,
            loyalty_balance = %confirmation.loyalty_balance,
            ship_to = %confirmation.ship_to,
            "{}",
            confirmation.greeting
        );
    }
}

/// Stores every confirmation it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Vec<OrderConfirmation>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> &[OrderConfirmation] {
        &self.sent
    }

    /// Hands back everything recorded so far and starts empty.
    pub fn drain(&mut self) -> Vec<OrderConfirmation> {
        std::mem::take(&mut self.sent)
    }
}

impl Notifier for RecordingNotifier {
    fn send_confirmation(&mut self, confirmation: &OrderConfirmation) {
        self.sent.push(confirmation.clone());
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn send_confirmation(&mut self, confirmation: &OrderConfirmation) {
        (**self).send_confirmation(confirmation);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
