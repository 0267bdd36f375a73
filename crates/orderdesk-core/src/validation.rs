//! # Validation Module
//!
//! Input validation for catalog entries, order quantities and rates.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Types                                                        │
//! │  ├── u32 quantities and stock (never negative)                         │
//! │  └── Money / Rate newtypes (no raw floats)                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Non-empty names, positive prices and quantities                   │
//! │  └── Rates within 0%..=100%                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog / processor                                          │
//! │  └── Index bounds, stock and reservation checks                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use orderdesk_core::validation::{validate_product_name, validate_quantity};
//!
//! assert!(validate_product_name("Laptop").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Rate;
use crate::MAX_PRODUCT_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most [`MAX_PRODUCT_NAME_LEN`] characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order quantity. Zero is rejected.
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price. Free products are not sold through the catalog,
/// so the price must be strictly positive.
///
/// ## Example
/// ```rust
/// use orderdesk_core::money::Money;
/// use orderdesk_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_cents(2999)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates that a rate lies between 0% and 100%.
pub fn validate_rate(field: &str, rate: Rate) -> ValidationResult<()> {
    if rate > Rate::FULL {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: Rate::FULL.bps() as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
