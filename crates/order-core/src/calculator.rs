//! # Order Calculator
//!
//! The cart plus the pricing pipeline.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      OrderCalculator                                    │
//! │                                                                         │
//! │  Mutators            Accessors            Pricing (pure)                │
//! │  ────────            ─────────            ──────────────                │
//! │  add_item     ──►    get_subtotal   ──►   apply_discount                │
//! │  remove_item         total_items          calculate_shipping            │
//! │  clear_order         list_items           calculate_tax                 │
//! │                      is_empty                   │                       │
//! │                                                 ▼                       │
//! │                                         calculate_total (orchestrator)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## States
//! ```text
//!            add_item
//!   ┌───────┐ ───────► ┌──────────┐
//!   │ Empty │          │ NonEmpty │  get_subtotal / calculate_total
//!   └───────┘ ◄─────── └──────────┘  only succeed here
//!        remove last item / clear_order
//! ```

use tracing::debug;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{DiscountRate, LineItem, OrderSummary, TaxRate};
use crate::validation::{
    parse_non_negative_amount, validate_item_name, validate_non_negative, validate_quantity,
    validate_unit_price,
};

/// Default tax rate: 23%.
pub const DEFAULT_TAX_RATE: f64 = 0.23;

/// Default post-discount amount at which shipping becomes free.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: f64 = 100.0;

/// Default flat shipping fee below the threshold.
pub const DEFAULT_SHIPPING_COST: f64 = 10.0;

// =============================================================================
// Pricing Configuration
// =============================================================================

/// Tax and shipping parameters, validated once and fixed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingConfig {
    tax_rate: TaxRate,
    free_shipping_threshold: Money,
    shipping_cost: Money,
}

impl PricingConfig {
    /// Builds a configuration from real-valued parameters.
    ///
    /// ## Rules
    /// - `tax_rate` in [0, 1]
    /// - `free_shipping_threshold` ≥ 0
    /// - `shipping_cost` ≥ 0
    ///
    /// ## Example
    /// ```rust
    /// use order_core::calculator::PricingConfig;
    ///
    /// let config = PricingConfig::new(0.08, 50.0, 4.99).unwrap();
    /// assert_eq!(config.shipping_cost().to_f64(), 4.99);
    ///
    /// assert!(PricingConfig::new(1.2, 50.0, 4.99).is_err());
    /// ```
    pub fn new(
        tax_rate: f64,
        free_shipping_threshold: f64,
        shipping_cost: f64,
    ) -> CoreResult<Self> {
        let tax_rate = TaxRate::from_fraction(tax_rate)?;
        let free_shipping_threshold =
            parse_non_negative_amount("free_shipping_threshold", free_shipping_threshold)?;
        let shipping_cost = parse_non_negative_amount("shipping_cost", shipping_cost)?;

        Self::from_parts(tax_rate, free_shipping_threshold, shipping_cost)
    }

    /// Builds a configuration from already-converted parts.
    pub fn from_parts(
        tax_rate: TaxRate,
        free_shipping_threshold: Money,
        shipping_cost: Money,
    ) -> CoreResult<Self> {
        validate_non_negative("free_shipping_threshold", free_shipping_threshold)?;
        validate_non_negative("shipping_cost", shipping_cost)?;

        Ok(PricingConfig {
            tax_rate,
            free_shipping_threshold,
            shipping_cost,
        })
    }

    /// Tax rate applied to discounted merchandise plus shipping.
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Minimum post-discount amount that ships free (inclusive).
    pub fn free_shipping_threshold(&self) -> Money {
        self.free_shipping_threshold
    }

    /// Shipping fee charged below the threshold.
    pub fn shipping_cost(&self) -> Money {
        self.shipping_cost
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            tax_rate: TaxRate::DEFAULT,
            free_shipping_threshold: Money::from_cents(10_000),
            shipping_cost: Money::from_cents(1_000),
        }
    }
}

// =============================================================================
// Order Calculator
// =============================================================================

/// A cart of line items and the pricing pipeline over it.
///
/// Single-threaded by itself; `order-service` wraps it in a mutex for
/// shared use.
#[derive(Debug, Clone, Default)]
pub struct OrderCalculator {
    config: PricingConfig,
    cart: Cart,
}

impl OrderCalculator {
    /// Creates a calculator with an empty cart.
    pub fn new(config: PricingConfig) -> Self {
        OrderCalculator {
            config,
            cart: Cart::new(),
        }
    }

    /// The configuration fixed at construction.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    // =========================================================================
    // Cart Mutation
    // =========================================================================

    /// Adds `quantity` units of `name` at `price`.
    ///
    /// ## Behavior
    /// - New name: inserted as a new line item
    /// - Existing name at the same price: quantity increases
    /// - Existing name at another price: `PriceConflict`, cart unchanged
    ///
    /// ## Example
    /// ```rust
    /// use order_core::{Money, OrderCalculator};
    ///
    /// let mut calc = OrderCalculator::default();
    /// calc.add_item("Apple", Money::from_cents(250), 3).unwrap();
    /// calc.add_item("Apple", Money::from_cents(250), 2).unwrap();
    ///
    /// assert_eq!(calc.total_items(), 5);
    /// assert_eq!(calc.get_subtotal().unwrap(), Money::from_cents(1250));
    /// ```
    pub fn add_item(&mut self, name: &str, price: Money, quantity: i64) -> CoreResult<()> {
        validate_item_name(name)?;
        validate_unit_price(price)?;
        validate_quantity(quantity)?;

        self.cart.add(name, price, quantity)?;
        debug!(name = %name, price = %price, quantity, "Item added");
        Ok(())
    }

    /// Removes the whole line item for `name`, regardless of quantity.
    pub fn remove_item(&mut self, name: &str) -> CoreResult<LineItem> {
        let removed = self.cart.remove(name)?;
        debug!(name = %name, quantity = removed.quantity, "Item removed");
        Ok(removed)
    }

    /// Empties the cart. Always succeeds.
    pub fn clear_order(&mut self) {
        self.cart.clear();
        debug!("Order cleared");
    }

    // =========================================================================
    // Read Accessors
    // =========================================================================

    /// Σ(unit price × quantity). Fails on an empty cart.
    pub fn get_subtotal(&self) -> CoreResult<Money> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        self.cart.subtotal()
    }

    /// Σ(quantity); 0 for an empty cart.
    pub fn total_items(&self) -> i64 {
        self.cart.total_quantity()
    }

    /// Distinct item names, in the order they were first added.
    pub fn list_items(&self) -> Vec<String> {
        self.cart.items().iter().map(|i| i.name.clone()).collect()
    }

    /// True iff the cart holds no line items.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Looks up the line item for `name`.
    pub fn get_item(&self, name: &str) -> Option<&LineItem> {
        self.cart.get(name)
    }

    // =========================================================================
    // Pricing Pipeline
    // =========================================================================

    /// Returns `subtotal × (1 − discount)`.
    ///
    /// ## Rules
    /// - `subtotal` ≥ 0
    /// - `discount` in [0, 1], guaranteed by [`DiscountRate`]
    pub fn apply_discount(&self, subtotal: Money, discount: DiscountRate) -> CoreResult<Money> {
        validate_non_negative("subtotal", subtotal)?;

        Ok(subtotal.apply_percentage_discount(discount))
    }

    /// Shipping fee for a post-discount `amount`.
    ///
    /// Free when `amount ≥ free_shipping_threshold` (inclusive), otherwise
    /// `shipping_cost`. Any amount is accepted; negatives pay shipping.
    pub fn calculate_shipping(&self, amount: Money) -> Money {
        if amount >= self.config.free_shipping_threshold {
            Money::zero()
        } else {
            self.config.shipping_cost
        }
    }

    /// Returns `amount × tax_rate`. Rejects negative amounts.
    pub fn calculate_tax(&self, amount: Money) -> CoreResult<Money> {
        validate_non_negative("amount", amount)?;

        Ok(amount.calculate_tax(self.config.tax_rate))
    }

    /// Final order total after discount, shipping and tax.
    ///
    /// ## Example
    /// ```rust
    /// use order_core::{DiscountRate, Money, OrderCalculator};
    ///
    /// let mut calc = OrderCalculator::default();
    /// calc.add_item("Item1", Money::from_cents(11000), 1).unwrap();
    ///
    /// let total = calc.calculate_total(DiscountRate::from_fraction(0.1).unwrap()).unwrap();
    /// assert_eq!(total.to_f64(), 134.07);
    /// ```
    pub fn calculate_total(&self, discount: DiscountRate) -> CoreResult<Money> {
        self.summary(discount).map(|summary| summary.total)
    }

    /// Runs the pricing pipeline and returns every intermediate amount.
    ///
    /// ## Pipeline (strictly ordered)
    /// ```text
    /// 1. subtotal   ← get_subtotal()
    /// 2. discounted ← apply_discount(subtotal, discount)
    /// 3. shipping   ← calculate_shipping(discounted)      ← AFTER discount
    /// 4. tax        ← calculate_tax(discounted + shipping)
    /// 5. total      ← discounted + shipping + tax
    /// ```
    ///
    /// A discount that drops the order below the threshold brings the
    /// shipping fee back. The cart is never modified.
    pub fn summary(&self, discount: DiscountRate) -> CoreResult<OrderSummary> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let subtotal = self.get_subtotal()?;
        let discounted = self.apply_discount(subtotal, discount)?;
        let shipping = self.calculate_shipping(discounted);
        let taxable = discounted
            .checked_add(shipping)
            .ok_or(CoreError::AmountOverflow("taxable amount"))?;
        let tax = self.calculate_tax(taxable)?;
        let total = taxable
            .checked_add(tax)
            .ok_or(CoreError::AmountOverflow("total"))?;
        let discount_amount = subtotal
            .checked_sub(discounted)
            .ok_or(CoreError::AmountOverflow("discount amount"))?;

        debug!(
            subtotal = %subtotal,
            discounted = %discounted,
            shipping = %shipping,
            tax = %tax,
            total = %total,
            "Order total calculated"
        );

        Ok(OrderSummary {
            item_count: self.cart.item_count(),
            total_items: self.cart.total_quantity(),
            subtotal,
            discount_amount,
            discounted,
            shipping,
            tax,
            total,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
