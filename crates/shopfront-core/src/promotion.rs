//! # Promotions
//!
//! Pricing strategies that turn a unit price and a quantity into a line total.
//!
//! ## Available Promotions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Promotion            Rule                          $100 × 3            │
//! │  ───────────────────  ────────────────────────────  ─────────────────   │
//! │  PercentDiscount(30)  total × (1 - 30/100)          $210.00             │
//! │  SecondHalfPrice      every 2nd unit at 50%         $250.00             │
//! │  ThirdOneFree         every 3rd unit free           $200.00             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A promotion knows nothing about the products it is attached to. The same
//! value can be cloned onto any number of products.

use serde::Serialize;
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_percent, validate_promotion_name};

/// Basis points charged for the discounted unit of a pair.
const HALF_PRICE_BPS: u32 = 5_000;

// =============================================================================
// Promotion Kind
// =============================================================================

/// The closed set of pricing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PromotionKind {
    /// Flat percentage off the whole line, stored in basis points.
    PercentDiscount { discount_bps: u32 },
    /// Every second unit is charged at half price.
    SecondHalfPrice,
    /// Every third unit is free.
    ThirdOneFree,
}

// =============================================================================
// Promotion
// =============================================================================

/// A named pricing rule.
///
/// ## Example
/// ```rust
/// use shopfront_core::money::Money;
/// use shopfront_core::promotion::Promotion;
///
/// let promo = Promotion::third_one_free("Third One Free!").unwrap();
/// let total = promo.apply_promotion(Money::from_cents(10000), 6).unwrap();
/// assert_eq!(total, Money::from_cents(40000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Promotion {
    name: String,
    #[serde(flatten)]
    kind: PromotionKind,
}

impl Promotion {
    /// Creates a percentage discount.
    ///
    /// `percent` must lie in `[0, 100]`; it is stored as basis points, so
    /// anything finer than 0.01% is rounded.
    pub fn percent_discount(name: impl Into<String>, percent: f64) -> CoreResult<Self> {
        validate_percent(percent)?;
        let discount_bps = (percent * 100.0).round() as u32;
        Self::new(name, PromotionKind::PercentDiscount { discount_bps })
    }

    /// Creates a "second item at half price" promotion.
    pub fn second_half_price(name: impl Into<String>) -> CoreResult<Self> {
        Self::new(name, PromotionKind::SecondHalfPrice)
    }

    /// Creates a "buy two, get the third free" promotion.
    pub fn third_one_free(name: impl Into<String>) -> CoreResult<Self> {
        Self::new(name, PromotionKind::ThirdOneFree)
    }

    fn new(name: impl Into<String>, kind: PromotionKind) -> CoreResult<Self> {
        let name = name.into();
        validate_promotion_name(&name)?;
        Ok(Promotion { name, kind })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PromotionKind {
        self.kind
    }

    /// Returns the discount percentage for `PercentDiscount`, `None` otherwise.
    pub fn percent(&self) -> Option<f64> {
        match self.kind {
            PromotionKind::PercentDiscount { discount_bps } => Some(discount_bps as f64 / 100.0),
            _ => None,
        }
    }

    /// Computes the total price of `quantity` units at `unit_price`.
    ///
    /// Pure: the result depends only on the arguments. A total that does not
    /// fit in `Money` is an invalid argument. Each fractional split
    /// is rounded once, half-up, to a whole cent.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    /// use shopfront_core::promotion::Promotion;
    ///
    /// let promo = Promotion::second_half_price("Second Half price!").unwrap();
    /// // $100 + $50 + $100
    /// assert_eq!(promo.apply_promotion(Money::from_cents(10000), 3).unwrap().cents(), 25000);
    /// ```
    pub fn apply_promotion(&self, unit_price: Money, quantity: i64) -> CoreResult<Money> {
        let total = match self.kind {
            PromotionKind::PercentDiscount { discount_bps } => unit_price
                .checked_multiply_quantity(quantity)
                .map(|subtotal| subtotal.apply_percentage_discount(discount_bps)),
            PromotionKind::SecondHalfPrice => {
                let pairs = quantity / 2;
                let remainder = quantity % 2;
                unit_price.checked_multiply_quantity(pairs).and_then(|full_units| {
                    full_units
                        .checked_add(full_units.percentage_of(HALF_PRICE_BPS))?
                        .checked_add(unit_price.checked_multiply_quantity(remainder)?)
                })
            }
            PromotionKind::ThirdOneFree => {
                let free = quantity / 3;
                unit_price.checked_multiply_quantity(quantity - free)
            }
        };

        total.ok_or_else(|| CoreError::amount_overflow("line total"))
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const HUNDRED: Money = Money::from_cents(10000);

    #[test]
    fn test_percent_discount() {
        let promo = Promotion::percent_discount("30% off!", 30.0).unwrap();
        assert_eq!(promo.apply_promotion(HUNDRED, 2).unwrap(), Money::from_cents(14000));
        assert_eq!(promo.percent(), Some(30.0));
    }

    #[test]
    fn test_percent_discount_bounds() {
        let free = Promotion::percent_discount("Giveaway", 100.0).unwrap();
        assert!(free.apply_promotion(HUNDRED, 4).unwrap().is_zero());

        let none = Promotion::percent_discount("Nothing off", 0.0).unwrap();
        assert_eq!(none.apply_promotion(HUNDRED, 4).unwrap(), Money::from_cents(40000));

        let err = Promotion::percent_discount("Too much", 150.0).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(Promotion::percent_discount("Negative", -5.0).is_err());
    }

    #[test]
    fn test_percent_discount_rounds_to_cent() {
        // $0.99 × 3 = $2.97, 10% off = $2.673 → $2.67
        let promo = Promotion::percent_discount("10% off", 10.0).unwrap();
        assert_eq!(promo.apply_promotion(Money::from_cents(99), 3).unwrap().cents(), 267);
    }

    #[test]
    fn test_second_half_price() {
        let promo = Promotion::second_half_price("Second Half price!").unwrap();
        assert_eq!(promo.apply_promotion(HUNDRED, 1).unwrap(), Money::from_cents(10000));
        assert_eq!(promo.apply_promotion(HUNDRED, 2).unwrap(), Money::from_cents(15000));
        assert_eq!(promo.apply_promotion(HUNDRED, 3).unwrap(), Money::from_cents(25000));
        assert_eq!(promo.apply_promotion(HUNDRED, 4).unwrap(), Money::from_cents(30000));
    }

    #[test]
    fn test_second_half_price_odd_cents() {
        // $1.99 + $0.995 → $2.99 (half rounded up)
        let promo = Promotion::second_half_price("Second Half price!").unwrap();
        assert_eq!(promo.apply_promotion(Money::from_cents(199), 2).unwrap().cents(), 299);
    }

    #[test]
    fn test_third_one_free() {
        let promo = Promotion::third_one_free("Third One Free!").unwrap();
        assert_eq!(promo.apply_promotion(HUNDRED, 2).unwrap(), Money::from_cents(20000));
        assert_eq!(promo.apply_promotion(HUNDRED, 3).unwrap(), Money::from_cents(20000));
        assert_eq!(promo.apply_promotion(HUNDRED, 6).unwrap(), Money::from_cents(40000));
        assert_eq!(promo.apply_promotion(HUNDRED, 7).unwrap(), Money::from_cents(50000));
    }

    #[test]
    fn test_overflowing_total_is_invalid_argument() {
        let price = Money::from_cents(i64::MAX / 2 + 1);
        let promo = Promotion::third_one_free("Third One Free!").unwrap();
        assert!(promo.apply_promotion(price, 3).unwrap_err().is_invalid_argument());

        let promo = Promotion::percent_discount("30% off!", 30.0).unwrap();
        assert!(promo.apply_promotion(price, 2).is_err());

        let promo = Promotion::second_half_price("Second Half price!").unwrap();
        assert!(promo.apply_promotion(price, 5).is_err());
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(Promotion::third_one_free("  ").is_err());
    }

    #[test]
    fn test_display_is_name() {
        let promo = Promotion::third_one_free("Third One Free!").unwrap();
        assert_eq!(promo.to_string(), "Third One Free!");
        assert_eq!(promo.percent(), None);
    }

    #[test]
    fn test_serialize() {
        let promo = Promotion::percent_discount("30% off!", 30.0).unwrap();
        let json = serde_json::to_value(&promo).unwrap();
        assert_eq!(json["name"], "30% off!");
        assert_eq!(json["kind"], "percent_discount");
        assert_eq!(json["discount_bps"], 3000);
    }
}
