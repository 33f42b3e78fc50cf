//! # Error Types
//!
//! Domain-specific error types for shopfront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopfront-core errors (this file)                                     │
//! │  ├── CoreError        - Stock, activation and order-limit failures     │
//! │  └── ValidationError  - Bad constructor / setter input                 │
//! │                                                                         │
//! │  shopfront-catalog errors (separate crate)                             │
//! │  └── CatalogError     - Catalog file and bootstrap failures            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CatalogError → host application   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantities)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Every failure surfaces synchronously to the immediate caller. Nothing in
/// this crate retries or recovers silently.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Purchase attempted on a deactivated product.
    #[error("Product {name} is not active")]
    InactiveProduct { name: String },

    /// Requested quantity exceeds available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// buy(5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Pixel 7", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Stock untouched, caller decides what to do
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Requested quantity exceeds the per-order cap of a limited product.
    #[error("Cannot buy more than {maximum} of {name} per order (requested {requested})")]
    ExceedsOrderLimit {
        name: String,
        maximum: i64,
        requested: i64,
    },

    /// Product is not part of the store.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Invalid argument (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns true for bad-input failures (negative price, blank name, ...).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }

    pub(crate) fn amount_overflow(field: &str) -> Self {
        ValidationError::TooLarge {
            field: field.to_string(),
        }
        .into()
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by constructors and setters before any state is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be zero or greater.
    #[error("{field} cannot be negative")]
    MustBeNonNegative { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Computed amount does not fit in a `Money`.
    #[error("{field} is too large")]
    TooLarge { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
