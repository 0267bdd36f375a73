//! # Error Types
//!
//! Domain-specific error types for orderdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  orderdesk-core errors (this file)                                     │
//! │  ├── CoreError        - Order, stock and reporting failures            │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── ConfigError      - Pricing config could not be parsed/validated   │
//! │                                                                         │
//! │  orderdesk-cli errors (separate crate)                                 │
//! │  └── AppError         - Config file I/O, JSON output                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is reported before any state is touched, so an `Err` from
//! the processor always means "nothing changed".

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A product position outside the catalog was referenced.
    #[error("Invalid product index {index} (catalog has {len} products)")]
    InvalidProductIndex { index: usize, len: usize },

    /// Insufficient stock to fulfill or reserve.
    ///
    /// ## User Workflow
    /// ```text
    /// place_order(mouse, 250)
    ///      │
    ///      ▼
    /// Check stock: available=200
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Mouse", available: 200, requested: 250 }
    ///      │
    ///      ▼
    /// Nothing mutated: stock, revenue and order count unchanged
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: u32,
        requested: u32,
    },

    /// Attempted to release or fulfill more units than are reserved.
    #[error("Cannot release {requested} units of {product}: only {reserved} reserved")]
    ReservationUnderflow {
        product: String,
        reserved: u32,
        requested: u32,
    },

    /// An operation needs a customer but none has been set.
    #[error("No active customer")]
    NoActiveCustomer,

    /// A monetary amount no longer fits in `Money`.
    #[error("Amount overflow while computing {what}")]
    AmountOverflow { what: &'static str },

    /// A report was requested before any order was processed.
    #[error("No orders have been processed")]
    NoOrders,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format or inconsistent combination of values.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Config Error
// =============================================================================

/// Errors raised while turning configuration text into a [`PricingConfig`].
///
/// [`PricingConfig`]: crate::config::PricingConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed.
    #[error("Failed to parse pricing config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but breaks a pricing rule.
    #[error("Invalid pricing config: {0}")]
    Invalid(#[from] ValidationError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
