//! # Catalog Configuration
//!
//! Declarative description of a store's promotions and products.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHOPFRONT_STORE_NAME="Best Buy"                                    │
//! │                                                                         │
//! │  2. Catalog File, first match of:                                      │
//! │     • path passed to `CatalogConfig::load`                             │
//! │     • SHOPFRONT_CATALOG=/srv/shop/catalog.json                         │
//! │     • ~/.config/shopfront/catalog.toml (Linux)                         │
//! │       ~/Library/Application Support/com.shopfront.shopfront/... (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     empty catalog, store name "Shopfront"                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Catalog File Format
//! ```toml
//! [store]
//! name = "Best Buy"
//!
//! [[promotions]]
//! name = "30% off!"
//! kind = "percent_discount"
//! percent = 30.0
//!
//! [[products]]
//! name = "MacBook Air M2"
//! price_cents = 145000
//! quantity = 100
//! promotion = "30% off!"
//!
//! [[products]]
//! name = "Shipping"
//! kind = "limited"
//! price_cents = 1000
//! quantity = 250
//! maximum = 1
//! ```
//!
//! Files ending in `.json` are read as JSON with the same shape.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use shopfront_core::{Money, Product, Promotion, SharedProduct, Store};

use crate::error::{CatalogError, CatalogResult};

/// Environment variable naming the catalog file.
pub const CATALOG_PATH_ENV: &str = "SHOPFRONT_CATALOG";

/// Environment variable overriding the store name.
pub const STORE_NAME_ENV: &str = "SHOPFRONT_STORE_NAME";

// =============================================================================
// Store Settings
// =============================================================================

/// Store-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Human-readable store name, used in log output.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "Shopfront".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
        }
    }
}

// =============================================================================
// Promotions
// =============================================================================

/// Pricing rule of a declared promotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PromotionRule {
    PercentDiscount { percent: f64 },
    SecondHalfPrice,
    ThirdOneFree,
}

/// A named promotion that products can reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionEntry {
    pub name: String,

    #[serde(flatten)]
    pub rule: PromotionRule,
}

impl PromotionEntry {
    /// Builds the core promotion value.
    pub fn build(&self) -> CatalogResult<Promotion> {
        let promotion = match self.rule {
            PromotionRule::PercentDiscount { percent } => {
                Promotion::percent_discount(self.name.as_str(), percent)?
            }
            PromotionRule::SecondHalfPrice => Promotion::second_half_price(self.name.as_str())?,
            PromotionRule::ThirdOneFree => Promotion::third_one_free(self.name.as_str())?,
        };
        Ok(promotion)
    }
}

// =============================================================================
// Products
// =============================================================================

/// Stock policy of a declared product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductEntryKind {
    #[default]
    Standard,
    NonStocked,
    Limited,
}

/// A product declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    pub name: String,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Initial stock. Ignored for non-stocked products.
    #[serde(default)]
    pub quantity: i64,

    #[serde(default)]
    pub kind: ProductEntryKind,

    /// Per-order cap. Required for limited products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,

    /// Name of a declared promotion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,

    /// Set to false to list a product that is not on sale yet.
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl ProductEntry {
    /// Builds the core product, without its promotion.
    pub fn build(&self) -> CatalogResult<Product> {
        let price = Money::from_cents(self.price_cents);
        let mut product = match self.kind {
            ProductEntryKind::Standard => Product::new(self.name.as_str(), price, self.quantity)?,
            ProductEntryKind::NonStocked => Product::non_stocked(self.name.as_str(), price)?,
            ProductEntryKind::Limited => {
                let maximum = self.maximum.ok_or_else(|| {
                    CatalogError::InvalidConfig(format!(
                        "limited product {} needs a maximum",
                        self.name
                    ))
                })?;
                Product::limited(self.name.as_str(), price, self.quantity, maximum)?
            }
        };

        if !self.active {
            product.deactivate();
        }

        Ok(product)
    }
}

// =============================================================================
// Catalog Config
// =============================================================================

/// Complete catalog: store settings, promotions and products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub promotions: Vec<PromotionEntry>,

    #[serde(default)]
    pub products: Vec<ProductEntry>,
}

impl CatalogConfig {
    /// Parses a TOML catalog.
    pub fn from_toml_str(contents: &str) -> CatalogResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Parses a JSON catalog.
    pub fn from_json_str(contents: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Reads a catalog file. `.json` files are parsed as JSON, anything else
    /// as TOML.
    pub fn from_file(path: &Path) -> CatalogResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        if is_json(path) {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    /// Loads the catalog from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Catalog file (explicit path, `SHOPFRONT_CATALOG`, platform default)
    /// 3. Environment variables
    ///
    /// A missing file is not an error: the catalog is simply empty.
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var_os(CATALOG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading catalog from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Catalog file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads the catalog or returns an empty one if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load catalog: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the catalog as TOML.
    pub fn save(&self, path: &Path) -> CatalogResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        info!(?path, "Catalog saved");
        Ok(())
    }

    /// Checks cross references that the file format cannot express.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(CatalogError::InvalidConfig(
                "store name must not be empty".into(),
            ));
        }

        let mut declared = HashSet::with_capacity(self.promotions.len());
        for promotion in &self.promotions {
            if !declared.insert(promotion.name.as_str()) {
                return Err(CatalogError::DuplicatePromotion(promotion.name.clone()));
            }
        }

        for product in &self.products {
            if let Some(promotion) = &product.promotion {
                if !declared.contains(promotion.as_str()) {
                    return Err(CatalogError::UnknownPromotion {
                        product: product.name.clone(),
                        promotion: promotion.clone(),
                    });
                }
            }

            match product.kind {
                ProductEntryKind::Limited if product.maximum.is_none() => {
                    return Err(CatalogError::InvalidConfig(format!(
                        "limited product {} needs a maximum",
                        product.name
                    )));
                }
                ProductEntryKind::Limited => {}
                _ if product.maximum.is_some() => {
                    warn!(product = %product.name, "maximum is only used by limited products");
                }
                _ => {}
            }

            if product.kind == ProductEntryKind::NonStocked && product.quantity != 0 {
                warn!(product = %product.name, "quantity is ignored for non-stocked products");
            }
        }

        Ok(())
    }

    /// Builds the store described by this catalog.
    ///
    /// Promotions are built once and cloned onto every product that names
    /// them.
    pub fn build_store(&self) -> CatalogResult<Store> {
        self.validate()?;

        let mut promotions = HashMap::with_capacity(self.promotions.len());
        for entry in &self.promotions {
            promotions.insert(entry.name.as_str(), entry.build()?);
        }

        let mut store = Store::default();
        for entry in &self.products {
            let mut product = entry.build()?;
            if let Some(promotion) = entry
                .promotion
                .as_deref()
                .and_then(|name| promotions.get(name))
            {
                product.set_promotion(promotion.clone());
            }
            store.add_product(SharedProduct::new(product));
        }

        info!(
            store = %self.store.name,
            products = store.len(),
            promotions = promotions.len(),
            total_quantity = store.get_total_quantity(),
            "Store built from catalog"
        );

        Ok(store)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var(STORE_NAME_ENV) {
            debug!(store = %name, "Overriding store name from environment");
            self.store.name = name;
        }
    }

    /// Returns the default catalog file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopfront", "shopfront")
            .map(|dirs| dirs.config_dir().join("catalog.toml"))
    }

    /// The reference electronics catalog: five products, three promotions.
    pub fn builtin() -> Self {
        let product = |name: &str, price_cents, quantity, promotion: Option<&str>| ProductEntry {
            name: name.to_string(),
            price_cents,
            quantity,
            kind: ProductEntryKind::Standard,
            maximum: None,
            promotion: promotion.map(str::to_string),
            active: true,
        };

        CatalogConfig {
            store: StoreSettings {
                name: "Best Buy".to_string(),
            },
            promotions: vec![
                PromotionEntry {
                    name: "Second Half price!".to_string(),
                    rule: PromotionRule::SecondHalfPrice,
                },
                PromotionEntry {
                    name: "Third One Free!".to_string(),
                    rule: PromotionRule::ThirdOneFree,
                },
                PromotionEntry {
                    name: "30% off!".to_string(),
                    rule: PromotionRule::PercentDiscount { percent: 30.0 },
                },
            ],
            products: vec![
                product("MacBook Air M2", 145000, 100, Some("Second Half price!")),
                product("Bose QuietComfort Earbuds", 25000, 500, Some("Third One Free!")),
                product("Google Pixel 7", 50000, 250, Some("30% off!")),
                ProductEntry {
                    kind: ProductEntryKind::NonStocked,
                    ..product("Windows License", 12500, 0, None)
                },
                ProductEntry {
                    kind: ProductEntryKind::Limited,
                    maximum: Some(1),
                    ..product("Shipping", 1000, 250, None)
                },
            ],
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

// =============================================================================
// Unit Tests
// =============================================================================
