//! # Products
//!
//! A product owns its price, stock level, activation flag and optional
//! promotion. `buy` is the only operation that both mutates stock and
//! produces money.
//!
//! ## Product Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Kind         Stock checks        Deactivates at 0   Promotions         │
//! │  ───────────  ──────────────────  ─────────────────  ──────────────     │
//! │  Standard     active + quantity   yes                applied            │
//! │  NonStocked   none (unlimited)    no                 ignored            │
//! │  Limited      per-order cap,      yes                applied            │
//! │               then as Standard                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Buy Flow
//! ```text
//! buy(q)
//!   │
//!   ├── q <= 0?                 → InvalidArgument
//!   ├── NonStocked?             → price × q (nothing else happens)
//!   ├── Limited and q > max?    → ExceedsOrderLimit
//!   ├── inactive?               → InactiveProduct
//!   ├── q > quantity?           → InsufficientStock (stock untouched)
//!   │
//!   ├── quantity -= q           (deactivates at 0)
//!   └── promotion(price, q) or price × q
//! ```

use serde::Serialize;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::promotion::Promotion;
use crate::validation::{
    validate_order_limit, validate_order_quantity, validate_price, validate_product_name,
    validate_stock_quantity,
};

// =============================================================================
// Product Kind
// =============================================================================

/// Stock policy of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    /// Finite stock, deactivates when sold out.
    #[default]
    Standard,
    /// Unlimited availability (licenses, services). Quantity stays at 0.
    NonStocked,
    /// Finite stock with a cap on units per purchase.
    Limited { maximum: i64 },
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Not `Clone`: a product has identity. Share it through [`SharedProduct`].
#[derive(Debug, Serialize)]
pub struct Product {
    /// Unique identifier (UUID v4), generated at construction.
    id: String,

    /// Display name.
    name: String,

    /// Unit price.
    price: Money,

    /// Current stock level.
    quantity: i64,

    /// Whether the product can currently be bought.
    active: bool,

    /// Optional pricing rule (last one set wins).
    promotion: Option<Promotion>,

    #[serde(flatten)]
    kind: ProductKind,
}

impl Product {
    /// Creates a standard stocked product.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    /// use shopfront_core::product::Product;
    ///
    /// let pixel = Product::new("Google Pixel 7", Money::from_cents(50000), 250).unwrap();
    /// assert!(pixel.is_active());
    ///
    /// assert!(Product::new("", Money::from_cents(50000), 250).is_err());
    /// assert!(Product::new("Pixel", Money::from_cents(-1), 250).is_err());
    /// assert!(Product::new("Pixel", Money::from_cents(50000), -3).is_err());
    /// ```
    pub fn new(name: impl Into<String>, price: Money, quantity: i64) -> CoreResult<Self> {
        Self::build(name.into(), price, quantity, ProductKind::Standard)
    }

    /// Creates a product with unlimited availability.
    ///
    /// Quantity is fixed at 0 and the product starts (and stays) active.
    pub fn non_stocked(name: impl Into<String>, price: Money) -> CoreResult<Self> {
        let mut product = Self::build(name.into(), price, 0, ProductKind::NonStocked)?;
        product.active = true;
        Ok(product)
    }

    /// Creates a stocked product that can be bought at most `maximum` units
    /// per purchase.
    pub fn limited(
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        maximum: i64,
    ) -> CoreResult<Self> {
        validate_order_limit(maximum)?;
        Self::build(name.into(), price, quantity, ProductKind::Limited { maximum })
    }

    fn build(name: String, price: Money, quantity: i64, kind: ProductKind) -> CoreResult<Self> {
        validate_product_name(&name)?;
        validate_price(price)?;
        validate_stock_quantity(quantity)?;

        Ok(Product {
            id: Uuid::new_v4().to_string(),
            name,
            price,
            quantity,
            active: quantity > 0,
            promotion: None,
            kind,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    /// Per-order cap, for limited products.
    pub fn maximum(&self) -> Option<i64> {
        match self.kind {
            ProductKind::Limited { maximum } => Some(maximum),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    // =========================================================================
    // State Changes
    // =========================================================================

    /// Forces the product on sale, regardless of stock.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Takes the product off sale, regardless of stock.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Sets the stock level and recomputes the active flag.
    ///
    /// Restocking a sold-out product reactivates it. Non-stocked products
    /// ignore the call.
    pub fn set_quantity(&mut self, quantity: i64) -> CoreResult<()> {
        if self.kind == ProductKind::NonStocked {
            debug!(product = %self.name, quantity, "Ignoring quantity change on non-stocked product");
            return Ok(());
        }

        validate_stock_quantity(quantity)?;
        self.store_quantity(quantity);
        Ok(())
    }

    fn store_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
        self.active = quantity > 0;
    }

    /// Attaches a promotion, replacing any previous one.
    pub fn set_promotion(&mut self, promotion: Promotion) {
        self.promotion = Some(promotion);
    }

    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    /// Removes the promotion, if any, and returns it.
    pub fn clear_promotion(&mut self) -> Option<Promotion> {
        self.promotion.take()
    }

    // =========================================================================
    // Buying
    // =========================================================================

    /// Buys `quantity` units and returns the line total.
    ///
    /// The total is priced on the requested quantity at the nominal unit
    /// price. A total too large for `Money` fails before stock is touched.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    /// use shopfront_core::product::Product;
    ///
    /// let mut earbuds = Product::new("Bose Earbuds", Money::from_cents(2000), 5).unwrap();
    /// assert_eq!(earbuds.buy(3).unwrap(), Money::from_cents(6000));
    /// assert_eq!(earbuds.quantity(), 2);
    /// ```
    pub fn buy(&mut self, quantity: i64) -> CoreResult<Money> {
        validate_order_quantity(quantity)?;

        match self.kind {
            ProductKind::NonStocked => {
                let total = self
                    .price
                    .checked_multiply_quantity(quantity)
                    .ok_or_else(|| CoreError::amount_overflow("line total"))?;
                debug!(product = %self.name, quantity, %total, "Non-stocked product bought");
                return Ok(total);
            }
            ProductKind::Limited { maximum } if quantity > maximum => {
                return Err(CoreError::ExceedsOrderLimit {
                    name: self.name.clone(),
                    maximum,
                    requested: quantity,
                });
            }
            _ => {}
        }

        if !self.active {
            return Err(CoreError::InactiveProduct {
                name: self.name.clone(),
            });
        }

        if quantity > self.quantity {
            return Err(CoreError::InsufficientStock {
                name: self.name.clone(),
                available: self.quantity,
                requested: quantity,
            });
        }

        let total = match &self.promotion {
            Some(promotion) => promotion.apply_promotion(self.price, quantity)?,
            None => self
                .price
                .checked_multiply_quantity(quantity)
                .ok_or_else(|| CoreError::amount_overflow("line total"))?,
        };

        self.store_quantity(self.quantity - quantity);

        debug!(
            product = %self.name,
            quantity,
            remaining = self.quantity,
            %total,
            "Product bought"
        );

        Ok(total)
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// Orders two products by unit price only.
    pub fn compare_by_price(&self, other: &Product) -> Ordering {
        self.price.cmp(&other.price)
    }

    pub fn is_cheaper_than(&self, other: &Product) -> bool {
        self.compare_by_price(other) == Ordering::Less
    }

    pub fn is_pricier_than(&self, other: &Product) -> bool {
        self.compare_by_price(other) == Ordering::Greater
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, Price: {}, Quantity: {}",
            self.name, self.price, self.quantity
        )?;

        if let Some(promotion) = &self.promotion {
            write!(f, " (Promotion: {})", promotion)?;
        }

        match self.kind {
            ProductKind::Standard => Ok(()),
            ProductKind::NonStocked => write!(f, " (Non-stocked item)"),
            ProductKind::Limited { maximum } => write!(f, " (Limit: {} per order)", maximum),
        }
    }
}

// =============================================================================
// Shared Handle
// =============================================================================

/// A cloneable handle to a product.
///
/// Stores and line items hold handles, never copies: stock sold through one
/// handle is visible through every other. Single-threaded by construction
/// (`Rc<RefCell<_>>`); a host that needs threads must lock the whole store.
#[derive(Debug, Clone)]
pub struct SharedProduct(Rc<RefCell<Product>>);

impl SharedProduct {
    pub fn new(product: Product) -> Self {
        SharedProduct(Rc::new(RefCell::new(product)))
    }

    /// Executes a function with read access to the product.
    ///
    /// ## Usage
    /// ```rust
    /// use shopfront_core::money::Money;
    /// use shopfront_core::product::{Product, SharedProduct};
    ///
    /// let mac = SharedProduct::new(Product::new("Mac", Money::from_cents(120000), 1).unwrap());
    /// let label = mac.with(|p| p.to_string());
    /// assert_eq!(label, "Mac, Price: $1200.00, Quantity: 1");
    /// ```
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Product) -> R,
    {
        f(&self.0.borrow())
    }

    /// Executes a function with write access to the product.
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Product) -> R,
    {
        f(&mut self.0.borrow_mut())
    }

    /// True when both handles point at the same product.
    pub fn same_product(&self, other: &SharedProduct) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn id(&self) -> String {
        self.with(|p| p.id.clone())
    }

    pub fn name(&self) -> String {
        self.with(|p| p.name.clone())
    }

    pub fn price(&self) -> Money {
        self.with(Product::price)
    }

    pub fn quantity(&self) -> i64 {
        self.with(Product::quantity)
    }

    pub fn is_active(&self) -> bool {
        self.with(Product::is_active)
    }

    pub fn buy(&self, quantity: i64) -> CoreResult<Money> {
        self.with_mut(|p| p.buy(quantity))
    }

    pub fn set_quantity(&self, quantity: i64) -> CoreResult<()> {
        self.with_mut(|p| p.set_quantity(quantity))
    }

    pub fn set_promotion(&self, promotion: Promotion) {
        self.with_mut(|p| p.set_promotion(promotion))
    }

    pub fn activate(&self) {
        self.with_mut(Product::activate)
    }

    pub fn deactivate(&self) {
        self.with_mut(Product::deactivate)
    }

    /// Orders two products by unit price only.
    pub fn compare_by_price(&self, other: &SharedProduct) -> Ordering {
        self.price().cmp(&other.price())
    }
}

impl From<Product> for SharedProduct {
    fn from(product: Product) -> Self {
        SharedProduct::new(product)
    }
}

/// Identity, not field equality.
impl PartialEq for SharedProduct {
    fn eq(&self, other: &Self) -> bool {
        self.same_product(other)
    }
}

impl Eq for SharedProduct {}

impl fmt::Display for SharedProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|p| fmt::Display::fmt(p, f))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
