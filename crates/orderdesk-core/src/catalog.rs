//! # Catalog
//!
//! Products addressed by their position, with stock and reservations.
//!
//! ## Stock Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stock_level = 200                                                      │
//! │  ├── reserved  =  30   held for a pending order                         │
//! │  └── available = 170   what new orders may take                         │
//! │                                                                         │
//! │  Invariant: 0 <= reserved <= stock_level                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating method checks first and mutates second, so an `Err`
//! leaves the entry untouched.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_product_name, validate_quantity, validate_unit_price};

// =============================================================================
// Product Entry
// =============================================================================

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEntry {
    name: String,
    unit_price: Money,
    stock_level: u32,
    reserved_quantity: u32,
}

impl ProductEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Units on hand, reserved or not.
    pub fn stock_level(&self) -> u32 {
        self.stock_level
    }

    pub fn reserved_quantity(&self) -> u32 {
        self.reserved_quantity
    }

    /// Units that are on hand and not reserved.
    pub fn available(&self) -> u32 {
        self.stock_level - self.reserved_quantity
    }

    fn insufficient(&self, requested: u32) -> CoreError {
        CoreError::InsufficientStock {
            product: self.name.clone(),
            available: self.available(),
            requested,
        }
    }

    fn underflow(&self, requested: u32) -> CoreError {
        CoreError::ReservationUnderflow {
            product: self.name.clone(),
            reserved: self.reserved_quantity,
            requested,
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Ordered collection of products. Entries are never removed, so an index
/// stays valid for the life of the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<ProductEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a product and returns its index.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::catalog::Catalog;
    /// use orderdesk_core::money::Money;
    ///
    /// let mut catalog = Catalog::new();
    /// let mouse = catalog.add_product("Mouse", Money::from_cents(2999), 200).unwrap();
    /// assert_eq!(mouse, 0);
    /// assert_eq!(catalog.get(mouse).unwrap().reserved_quantity(), 0);
    /// ```
    pub fn add_product(
        &mut self,
        name: impl Into<String>,
        unit_price: Money,
        stock_level: u32,
    ) -> CoreResult<usize> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_unit_price(unit_price)?;

        self.products.push(ProductEntry {
            name: name.trim().to_string(),
            unit_price,
            stock_level,
            reserved_quantity: 0,
        });
        Ok(self.products.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductEntry> {
        self.products.iter()
    }

    pub fn get(&self, index: usize) -> CoreResult<&ProductEntry> {
        self.products
            .get(index)
            .ok_or(CoreError::InvalidProductIndex {
                index,
                len: self.products.len(),
            })
    }

    fn get_mut(&mut self, index: usize) -> CoreResult<&mut ProductEntry> {
        let len = self.products.len();
        self.products
            .get_mut(index)
            .ok_or(CoreError::InvalidProductIndex { index, len })
    }

    /// True when `quantity` unreserved units are on hand. Never mutates.
    pub fn check_stock(&self, index: usize, quantity: u32) -> CoreResult<bool> {
        Ok(self.get(index)?.available() >= quantity)
    }

    /// Fails with `InsufficientStock` unless `quantity` units are available.
    pub fn ensure_available(&self, index: usize, quantity: u32) -> CoreResult<&ProductEntry> {
        let entry = self.get(index)?;
        if entry.available() < quantity {
            return Err(entry.insufficient(quantity));
        }
        Ok(entry)
    }

    /// Fails with `ReservationUnderflow` unless `quantity` units are reserved.
    pub fn ensure_reserved(&self, index: usize, quantity: u32) -> CoreResult<&ProductEntry> {
        let entry = self.get(index)?;
        if entry.reserved_quantity < quantity {
            return Err(entry.underflow(quantity));
        }
        Ok(entry)
    }

    /// Removes `quantity` unreserved units from stock.
    pub fn take_stock(&mut self, index: usize, quantity: u32) -> CoreResult<()> {
        let entry = self.get_mut(index)?;
        if entry.available() < quantity {
            return Err(entry.insufficient(quantity));
        }
        entry.stock_level -= quantity;
        Ok(())
    }

    /// Holds `quantity` available units for a later order.
    pub fn reserve(&mut self, index: usize, quantity: u32) -> CoreResult<()> {
        validate_quantity(quantity)?;
        let entry = self.get_mut(index)?;
        if entry.available() < quantity {
            return Err(entry.insufficient(quantity));
        }
        entry.reserved_quantity += quantity;
        Ok(())
    }

    /// Returns held units to the available pool.
    pub fn release(&mut self, index: usize, quantity: u32) -> CoreResult<()> {
        validate_quantity(quantity)?;
        let entry = self.get_mut(index)?;
        if entry.reserved_quantity < quantity {
            return Err(entry.underflow(quantity));
        }
        entry.reserved_quantity -= quantity;
        Ok(())
    }

    /// Removes held units from stock (the reservation is being shipped).
    pub fn take_reserved(&mut self, index: usize, quantity: u32) -> CoreResult<()> {
        let entry = self.get_mut(index)?;
        if entry.reserved_quantity < quantity {
            return Err(entry.underflow(quantity));
        }
        entry.reserved_quantity -= quantity;
        entry.stock_level -= quantity;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
