//! # Store
//!
//! An ordered collection of shared products that processes multi-line orders.
//!
//! ## Order Processing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  order([(MacBook, 1), (Pixel, 2), (Shipping, 1)])                       │
//! │                                                                         │
//! │  line 1: MacBook.buy(1)  ──► $1450.00   stock 100 → 99                 │
//! │  line 2: Pixel.buy(2)    ──► $1000.00   stock 250 → 248                │
//! │  line 3: Shipping.buy(1) ──► $10.00     stock 250 → 249                │
//! │                              ────────                                   │
//! │                              $2460.00                                   │
//! │                                                                         │
//! │  If line 3 fails, lines 1 and 2 STAY applied. There is no rollback:    │
//! │  callers needing all-or-nothing must pre-check stock themselves.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::SharedProduct;

// =============================================================================
// Line Item
// =============================================================================

/// A (product, quantity) pair submitted as part of an order.
#[derive(Debug, Clone)]
pub struct LineItem {
    pub product: SharedProduct,
    pub quantity: i64,
}

impl LineItem {
    pub fn new(product: &SharedProduct, quantity: i64) -> Self {
        LineItem {
            product: product.clone(),
            quantity,
        }
    }
}

impl From<(SharedProduct, i64)> for LineItem {
    fn from((product, quantity): (SharedProduct, i64)) -> Self {
        LineItem { product, quantity }
    }
}

impl From<(&SharedProduct, i64)> for LineItem {
    fn from((product, quantity): (&SharedProduct, i64)) -> Self {
        LineItem::new(product, quantity)
    }
}

// =============================================================================
// Store
// =============================================================================

/// A store holding shared product handles.
///
/// ## Invariants
/// - Insertion order is preserved
/// - Duplicates are allowed (the same handle may appear twice)
/// - "Active products" is always derived, never stored
#[derive(Debug, Clone, Default)]
pub struct Store {
    products: Vec<SharedProduct>,
}

impl Store {
    /// Creates a store from an initial product list.
    pub fn new(products: Vec<SharedProduct>) -> Self {
        Store { products }
    }

    /// Appends a product.
    pub fn add_product(&mut self, product: SharedProduct) {
        debug!(product = %product.name(), "Adding product to store");
        self.products.push(product);
    }

    /// Removes the first occurrence of `product`.
    ///
    /// ## Returns
    /// - `Ok(())` on success
    /// - `Err(CoreError::ProductNotFound)` if the product is not in the store
    pub fn remove_product(&mut self, product: &SharedProduct) -> CoreResult<()> {
        let position = self
            .products
            .iter()
            .position(|p| p.same_product(product))
            .ok_or_else(|| CoreError::ProductNotFound(product.name()))?;

        let removed = self.products.remove(position);
        debug!(product = %removed.name(), "Removed product from store");
        Ok(())
    }

    /// Returns the active products, in insertion order.
    pub fn get_all_products(&self) -> Vec<SharedProduct> {
        self.products
            .iter()
            .filter(|p| p.is_active())
            .cloned()
            .collect()
    }

    /// Returns every product, active or not, in insertion order.
    pub fn products(&self) -> &[SharedProduct] {
        &self.products
    }

    /// Sums the stock of active products only.
    pub fn get_total_quantity(&self) -> i64 {
        self.products
            .iter()
            .filter(|p| p.is_active())
            .map(SharedProduct::quantity)
            .sum()
    }

    /// Processes an order line by line and returns the grand total.
    ///
    /// The first failing line aborts the order and its error is returned
    /// unchanged. Lines before it are NOT rolled back. A grand total too large
    /// for `Money` aborts the order the same way, after the offending line
    /// has been bought.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    /// use shopfront_core::product::{Product, SharedProduct};
    /// use shopfront_core::store::Store;
    ///
    /// let p1 = SharedProduct::new(Product::new("Item1", Money::from_cents(5000), 5).unwrap());
    /// let p2 = SharedProduct::new(Product::new("Item2", Money::from_cents(3000), 5).unwrap());
    /// let store = Store::new(vec![p1.clone(), p2.clone()]);
    ///
    /// let total = store.order([(&p1, 2), (&p2, 1)]).unwrap();
    /// assert_eq!(total, Money::from_cents(13000));
    /// assert_eq!(p1.quantity(), 3);
    /// ```
    pub fn order<I, L>(&self, line_items: I) -> CoreResult<Money>
    where
        I: IntoIterator<Item = L>,
        L: Into<LineItem>,
    {
        let mut total = Money::zero();
        let mut lines = 0usize;

        for line in line_items {
            let LineItem { product, quantity } = line.into();
            let priced = product.buy(quantity).and_then(|line_total| {
                total
                    .checked_add(line_total)
                    .ok_or_else(|| CoreError::amount_overflow("order total"))
            });
            match priced {
                Ok(running_total) => {
                    total = running_total;
                    lines += 1;
                }
                Err(e) => {
                    warn!(
                        product = %product.name(),
                        quantity,
                        applied_lines = lines,
                        error = %e,
                        "Order aborted"
                    );
                    return Err(e);
                }
            }
        }

        info!(lines, %total, "Order processed");
        Ok(total)
    }

    /// Membership test against the full collection (active or not).
    pub fn contains(&self, product: &SharedProduct) -> bool {
        self.products.iter().any(|p| p.same_product(product))
    }

    /// Returns a new store holding this store's products followed by
    /// `other`'s. Handles are shared, not copied, and nothing is deduplicated.
    pub fn combine(&self, other: &Store) -> Store {
        let products = self
            .products
            .iter()
            .chain(other.products.iter())
            .cloned()
            .collect();
        Store::new(products)
    }

    /// Finds a product by its identifier.
    pub fn find_by_id(&self, id: &str) -> CoreResult<SharedProduct> {
        self.products
            .iter()
            .find(|p| p.with(|inner| inner.id() == id))
            .cloned()
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Finds the first product with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<SharedProduct> {
        self.products
            .iter()
            .find(|p| p.with(|inner| inner.name() == name))
            .cloned()
    }

    /// Number of products, active or not (duplicates counted).
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<SharedProduct> for Store {
    fn from_iter<T: IntoIterator<Item = SharedProduct>>(iter: T) -> Self {
        Store::new(iter.into_iter().collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Product;
    use crate::promotion::Promotion;

    fn shared(name: &str, dollars: i64, quantity: i64) -> SharedProduct {
        SharedProduct::new(Product::new(name, Money::from_major_minor(dollars, 0), quantity).unwrap())
    }

    #[test]
    fn test_store_order_successful() {
        let p1 = shared("Item1", 50, 5);
        let p2 = shared("Item2", 30, 5);
        let store = Store::new(vec![p1.clone(), p2.clone()]);

        let total = store.order([(&p1, 2), (&p2, 1)]).unwrap();
        assert_eq!(total, Money::from_major_minor(130, 0));
        assert_eq!(p1.quantity(), 3);
        assert_eq!(p2.quantity(), 4);
    }

    #[test]
    fn test_store_order_exceeds_quantity() {
        let p = shared("Limited", 100, 1);
        let store = Store::new(vec![p.clone()]);
        let err = store.order([(&p, 2)]).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        assert_eq!(p.quantity(), 1);
    }

    #[test]
    fn test_store_order_partial_failure_is_not_rolled_back() {
        let p1 = shared("Item1", 50, 5);
        let p2 = shared("Item2", 30, 1);
        let store = Store::new(vec![p1.clone(), p2.clone()]);

        let err = store.order([(&p1, 2), (&p2, 3)]).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        assert_eq!(p1.quantity(), 3);
        assert_eq!(p2.quantity(), 1);
    }

    #[test]
    fn test_store_order_stops_at_first_failure() {
        let p1 = shared("Item1", 50, 5);
        let sold_out = shared("Item2", 30, 0);
        let p3 = shared("Item3", 10, 5);
        let store = Store::new(vec![p1.clone(), sold_out.clone(), p3.clone()]);

        let err = store
            .order([(&p1, 1), (&sold_out, 1), (&p3, 1)])
            .unwrap_err();
        assert!(matches!(err, CoreError::InactiveProduct { .. }));
        assert_eq!(p1.quantity(), 4);
        assert_eq!(p3.quantity(), 5);
    }

    #[test]
    fn test_store_order_with_promotions_and_variants() {
        let mac = shared("MacBook Air M2", 1450, 100);
        mac.set_promotion(Promotion::second_half_price("Second Half price!").unwrap());
        let license = SharedProduct::new(
            Product::non_stocked("Windows License", Money::from_major_minor(125, 0)).unwrap(),
        );
        let shipping = SharedProduct::new(
            Product::limited("Shipping", Money::from_major_minor(10, 0), 250, 1).unwrap(),
        );
        let store = Store::new(vec![mac.clone(), license.clone(), shipping.clone()]);

        let lines = vec![
            LineItem::new(&mac, 2),
            LineItem::new(&license, 3),
            LineItem::new(&shipping, 1),
        ];
        let total = store.order(lines).unwrap();
        // 1450 + 725 + 3 × 125 + 10
        assert_eq!(total, Money::from_major_minor(2560, 0));
        assert_eq!(mac.quantity(), 98);
        assert_eq!(shipping.quantity(), 249);

        let err = store.order([(&shipping, 2)]).unwrap_err();
        assert!(matches!(err, CoreError::ExceedsOrderLimit { .. }));
    }

    #[test]
    fn test_store_order_total_overflow_is_invalid_argument() {
        let price = Money::from_cents(i64::MAX / 2 + 1);
        let a = SharedProduct::new(Product::new("A", price, 1).unwrap());
        let b = SharedProduct::new(Product::new("B", price, 1).unwrap());
        let store = Store::new(vec![a.clone(), b.clone()]);

        let err = store.order([(&a, 1), (&b, 1)]).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(a.quantity(), 0);
        assert_eq!(b.quantity(), 0);
    }

    #[test]
    fn test_deactivated_non_stocked_is_hidden_but_sellable() {
        let license = SharedProduct::new(
            Product::non_stocked("Windows License", Money::from_major_minor(125, 0)).unwrap(),
        );
        let mac = shared("MacBook Air M2", 1450, 100);
        let store = Store::new(vec![license.clone(), mac.clone()]);

        license.deactivate();
        assert_eq!(store.get_all_products(), vec![mac]);
        assert!(store.contains(&license));

        let total = store.order([(&license, 4)]).unwrap();
        assert_eq!(total, Money::from_major_minor(500, 0));
    }

    #[test]
    fn test_empty_order_totals_zero() {
        let store = Store::default();
        let total = store.order(Vec::<LineItem>::new()).unwrap();
        assert!(total.is_zero());
    }

    #[test]
    fn test_get_all_products_filters_inactive() {
        let a = shared("A", 10, 1);
        let b = shared("B", 20, 0);
        let c = shared("C", 30, 4);
        let store = Store::new(vec![a.clone(), b.clone(), c.clone()]);

        let active = store.get_all_products();
        assert_eq!(active, vec![a.clone(), c.clone()]);
        assert_eq!(store.len(), 3);

        c.deactivate();
        assert_eq!(store.get_all_products(), vec![a]);
    }

    #[test]
    fn test_total_quantity_counts_active_only() {
        let a = shared("A", 10, 3);
        let b = shared("B", 20, 7);
        let store = Store::new(vec![a.clone(), b.clone()]);
        assert_eq!(store.get_total_quantity(), 10);

        b.deactivate();
        assert_eq!(store.get_total_quantity(), 3);

        a.buy(3).unwrap();
        assert_eq!(store.get_total_quantity(), 0);
    }

    #[test]
    fn test_add_and_remove_product() {
        let a = shared("A", 10, 1);
        let b = shared("B", 20, 1);
        let mut store = Store::new(vec![a.clone()]);

        store.add_product(b.clone());
        assert!(store.contains(&b));

        store.remove_product(&a).unwrap();
        assert!(!store.contains(&a));
        assert!(matches!(
            store.remove_product(&a).unwrap_err(),
            CoreError::ProductNotFound(_)
        ));
    }

    #[test]
    fn test_duplicates_are_allowed() {
        let a = shared("A", 10, 1);
        let mut store = Store::new(vec![a.clone(), a.clone()]);
        assert_eq!(store.len(), 2);

        store.remove_product(&a).unwrap();
        assert!(store.contains(&a));
    }

    #[test]
    fn test_contains_uses_identity() {
        let a = shared("A", 10, 1);
        let twin = shared("A", 10, 1);
        let store = Store::new(vec![a.clone()]);
        assert!(store.contains(&a));
        assert!(!store.contains(&twin));

        a.buy(1).unwrap();
        assert!(store.contains(&a));
    }

    #[test]
    fn test_store_contains_and_combine() {
        let p1 = shared("A", 10, 1);
        let p2 = shared("B", 20, 1);
        let s1 = Store::new(vec![p1.clone()]);
        let s2 = Store::new(vec![p2.clone()]);

        let s3 = s1.combine(&s2);
        assert!(s3.contains(&p1));
        assert!(s3.contains(&p2));
        assert_eq!(s3.products(), &[p1.clone(), p2.clone()][..]);

        // Shared handles: selling through the combined store drains the source store.
        s3.order([(&p1, 1)]).unwrap();
        assert_eq!(s1.get_total_quantity(), 0);
    }

    #[test]
    fn test_combine_does_not_deduplicate() {
        let p = shared("A", 10, 1);
        let s1 = Store::new(vec![p.clone()]);
        let combined = s1.combine(&s1);
        assert_eq!(combined.len(), 2);
    }

    #[test]
    fn test_find_products() {
        let a = shared("A", 10, 1);
        let store: Store = vec![a.clone()].into_iter().collect();

        assert_eq!(store.find_by_id(&a.id()).unwrap(), a);
        assert!(store.find_by_id("missing").is_err());
        assert_eq!(store.find_by_name("A"), Some(a));
        assert!(store.find_by_name("Z").is_none());
    }
}
