//! # Catalog Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   File access   │  │     Format      │  │   Catalog contents      │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Io             │  │  TomlParse      │  │  InvalidConfig          │ │
//! │  │                 │  │  TomlSerialize  │  │  UnknownPromotion       │ │
//! │  │                 │  │  JsonParse      │  │  DuplicatePromotion     │ │
//! │  │                 │  │                 │  │  Core (bad product)     │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopfront_core::CoreError;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while loading a catalog or building a store from it.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading or writing the catalog file failed.
    #[error("Catalog file error: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML catalog could not be parsed.
    #[error("Invalid TOML catalog: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The catalog could not be written as TOML.
    #[error("Failed to serialize catalog: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// The JSON catalog could not be parsed.
    #[error("Invalid JSON catalog: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Catalog contents are inconsistent.
    #[error("Invalid catalog: {0}")]
    InvalidConfig(String),

    /// A product references a promotion that is not declared.
    #[error("Product {product} references unknown promotion '{promotion}'")]
    UnknownPromotion { product: String, promotion: String },

    /// Two promotions share a name.
    #[error("Promotion '{0}' is declared more than once")]
    DuplicatePromotion(String),

    /// A product or promotion was rejected by the core.
    #[error(transparent)]
    Core(#[from] CoreError),
}
