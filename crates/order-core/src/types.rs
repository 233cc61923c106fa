//! # Domain Types
//!
//! Core domain types used by the pricing engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │    TaxRate      │   │  DiscountRate   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (key)     │   │  Decimal [0,1]  │   │  Decimal [0,1]  │       │
//! │  │  unit_price     │   │  0.23 = 23%     │   │  0.1 = 10% off  │       │
//! │  │  quantity       │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────┐     │
//! │  │  OrderSummary: subtotal → discounted → shipping → tax → total │     │
//! │  └───────────────────────────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::ValidationResult;

/// Converts a fraction in [0, 1] to an exact decimal.
fn parse_fraction(field: &str, fraction: f64) -> ValidationResult<Decimal> {
    if !fraction.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if !(0.0..=1.0).contains(&fraction) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: 1.0,
        });
    }

    Decimal::from_str(&fraction.to_string()).map_err(|_| ValidationError::Unrepresentable {
        field: field.to_string(),
    })
}

/// Checks a decimal rate against [0, 1].
fn check_unit_interval(field: &str, rate: Decimal) -> ValidationResult<Decimal> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: 1.0,
        });
    }

    Ok(rate)
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as an exact fraction in [0, 1] (0.23 = 23%).
///
/// Only the validating constructors exist, so every `TaxRate` is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// 23%, the engine default.
    pub const DEFAULT: TaxRate = TaxRate(Decimal::from_parts(23, 0, 0, false, 2));

    /// Creates a tax rate from a decimal fraction.
    pub fn new(rate: Decimal) -> ValidationResult<Self> {
        check_unit_interval("tax_rate", rate).map(TaxRate)
    }

    /// Creates a tax rate from a fraction (`0.23` = 23%).
    ///
    /// ## Example
    /// ```rust
    /// use order_core::types::TaxRate;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(TaxRate::from_fraction(0.23).unwrap().amount(), Decimal::new(23, 2));
    /// assert!(TaxRate::from_fraction(1.5).is_err());
    /// ```
    pub fn from_fraction(fraction: f64) -> ValidationResult<Self> {
        parse_fraction("tax_rate", fraction).map(TaxRate)
    }

    /// Returns the rate as an exact decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as the nearest `f64`.
    pub fn fraction(&self) -> f64 {
        self.0.to_string().parse().unwrap_or_default()
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Percentage discount as an exact fraction in [0, 1]; `1` means 100% off.
///
/// Only the validating constructors exist, so every `DiscountRate` is in
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DiscountRate(Decimal);

impl DiscountRate {
    /// Creates a discount from a decimal fraction.
    pub fn new(rate: Decimal) -> ValidationResult<Self> {
        check_unit_interval("discount", rate).map(DiscountRate)
    }

    /// Creates a discount from a fraction (`0.1` = 10% off, `1.0` = free).
    ///
    /// ## Example
    /// ```rust
    /// use order_core::types::DiscountRate;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(DiscountRate::from_fraction(0.1).unwrap().amount(), Decimal::new(1, 1));
    /// assert!(DiscountRate::from_fraction(-0.1).is_err());
    /// ```
    pub fn from_fraction(fraction: f64) -> ValidationResult<Self> {
        parse_fraction("discount", fraction).map(DiscountRate)
    }

    /// No discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(Decimal::ZERO)
    }

    /// Returns the discount as an exact decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One (name, unit price, quantity) record in the cart.
///
/// ## Invariants
/// - `name` is non-empty and unique within its cart
/// - `unit_price` is positive and never changes once the item exists
/// - `quantity` is at least 1 and only grows through repeated adds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Identifying name, the cart key.
    pub name: String,

    /// Price per unit, frozen when the name is first added.
    pub unit_price: Money,

    /// Units of this item in the cart.
    pub quantity: i64,
}

impl LineItem {
    /// Calculates the line total (unit price × quantity).
    ///
    /// Returns `None` if the product overflows.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.checked_mul_quantity(self.quantity)
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// Every intermediate amount of one `calculate_total` run.
///
/// ```text
/// subtotal ──► discounted ──► shipping(discounted) ──► tax(discounted + shipping)
///                                                            │
///                        total = discounted + shipping + tax ◄┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Distinct line items.
    pub item_count: usize,
    /// Sum of quantities.
    pub total_items: i64,
    pub subtotal: Money,
    pub discount_amount: Money,
    pub discounted: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
