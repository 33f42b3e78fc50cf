//! # Validation Module
//!
//! Input validation for constructors and setters.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog file (shopfront-catalog)                             │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── Cross references (promotion names)                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Names, prices, quantities, percentages                            │
//! │  └── Called by every constructor and setter in the core                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::validation::{validate_product_name, validate_stock_quantity};
//!
//! assert!(validate_product_name("MacBook Air M2").is_ok());
//! assert!(validate_stock_quantity(-3).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace only
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Google Pixel 7").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_required("name", name)
}

/// Validates a promotion label.
pub fn validate_promotion_name(name: &str) -> ValidationResult<()> {
    validate_required("promotion name", name)
}

fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use shopfront_core::money::Money;
/// use shopfront_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-500)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level (constructor or `set_quantity`).
///
/// ## Rules
/// - Must be non-negative (>= 0)
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates the quantity of a purchase.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_order_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "order quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates the per-order cap of a limited product.
pub fn validate_order_limit(maximum: i64) -> ValidationResult<()> {
    if maximum <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "maximum".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount percentage.
///
/// ## Rules
/// - Must be a finite number between 0 and 100 (inclusive)
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::validate_percent;
///
/// assert!(validate_percent(30.0).is_ok());
/// assert!(validate_percent(100.0).is_ok());
/// assert!(validate_percent(120.0).is_err());
/// assert!(validate_percent(f64::NAN).is_err());
/// ```
pub fn validate_percent(percent: f64) -> ValidationResult<()> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: "percent".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
