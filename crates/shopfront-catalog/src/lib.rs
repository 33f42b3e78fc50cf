//! # shopfront-catalog: Store Bootstrap
//!
//! Reads a catalog file (promotions + products) and builds the initial
//! [`Store`](shopfront_core::Store). All file and environment access of the
//! workspace lives here, so `shopfront-core` stays pure.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  init_tracing()            RUST_LOG or "info,shopfront_core=debug,..." │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogConfig::load(path) file → env overrides → validate             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  config.build_store()      promotions built once, products attached    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store ready for get_all_products / order                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use shopfront_catalog::CatalogConfig;
//!
//! let store = CatalogConfig::builtin().build_store().unwrap();
//! assert_eq!(store.get_all_products().len(), 5);
//! ```

pub mod config;
pub mod error;

pub use config::{
    CatalogConfig, ProductEntry, ProductEntryKind, PromotionEntry, PromotionRule, StoreSettings,
};
pub use error::{CatalogError, CatalogResult};

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,shopfront_core=debug,shopfront_catalog=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopfront_core=trace` - Trace the core only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Returns false if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
