//! # shopfront-core: Pure Pricing and Order Logic
//!
//! This crate contains the inventory model of Shopfront: products with
//! price and stock, promotional pricing rules, and a store that processes
//! multi-line orders. Zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Host application (catalog UI, checkout)            │   │
//! │  │     get_all_products, get_total_quantity, order(line_items)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 shopfront-catalog (bootstrap)                   │   │
//! │  │          catalog.toml / catalog.json → Store                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ shopfront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │ promotion │  │  product  │  │   store   │  │   │
//! │  │   │   Money   │  │ Percent   │  │ Standard  │  │  order()  │  │   │
//! │  │   │           │  │ 2nd Half  │  │ NonStock  │  │ combine() │  │   │
//! │  │   │           │  │ 3rd Free  │  │ Limited   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • SINGLE-THREADED              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic
//! - [`promotion`] - Pricing rules
//! - [`product`] - Products, product kinds and shared handles
//! - [`store`] - Product collections and order processing
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::{Money, Product, Promotion, SharedProduct, Store};
//!
//! let pixel = SharedProduct::new(
//!     Product::new("Google Pixel 7", Money::from_major_minor(500, 0), 250).unwrap(),
//! );
//! pixel.set_promotion(Promotion::third_one_free("Third One Free!").unwrap());
//!
//! let store = Store::new(vec![pixel.clone()]);
//! let total = store.order([(&pixel, 3)]).unwrap();
//!
//! assert_eq!(total, Money::from_major_minor(1000, 0));
//! assert_eq!(store.get_total_quantity(), 247);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod product;
pub mod promotion;
pub mod store;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use product::{Product, ProductKind, SharedProduct};
pub use promotion::{Promotion, PromotionKind};
pub use store::{LineItem, Store};
