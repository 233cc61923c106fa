//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Decimal amounts                                          │
//! │    Real-valued inputs become the decimal they were written as          │
//! │    (2.504 stays 2.504, 99.996 stays 99.996). Nothing is rounded to     │
//! │    cents; sums, products and threshold checks are exact.               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use order_core::money::Money;
//!
//! let price = Money::from_f64(10.99).unwrap();
//! let line = price.checked_mul_quantity(3).unwrap();
//! assert_eq!(line.to_f64(), 32.97);
//!
//! // Sub-cent precision is kept
//! assert_eq!(Money::from_f64(2.504).unwrap().to_string(), "2.504");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{DiscountRate, TaxRate};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in major units, held as an exact decimal.
///
/// ## Design Decisions
/// - **Signed**: shipping checks accept any real amount, negatives included
/// - **No fixed scale**: a price of 0.004 is a valid, positive price
/// - **Checked arithmetic**: cart sums report overflow instead of panicking
///
/// ## Where Money is Used
/// ```text
/// LineItem.unit_price ──► LineItem.line_total ──► subtotal
///                                                    │
///            discounted ◄── apply_discount ◄─────────┘
///                │
///                ├──► calculate_shipping ──► shipping
///                │
///                └──► calculate_tax(discounted + shipping) ──► tax
///
/// total = discounted + shipping + tax
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use order_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.to_f64(), 10.99);
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Converts a real-valued amount to Money without rounding it.
    ///
    /// The amount becomes the shortest decimal that reads back as the same
    /// `f64`, so `0.1` is exactly `0.1`. Returns `None` for NaN, infinities
    /// and magnitudes a 96-bit decimal cannot hold.
    ///
    /// ## Example
    /// ```rust
    /// use order_core::money::Money;
    ///
    /// assert_eq!(Money::from_f64(134.07).unwrap(), Money::from_cents(13407));
    /// assert_eq!(Money::from_f64(0.004).unwrap().to_string(), "0.004");
    /// assert!(Money::from_f64(f64::NAN).is_none());
    /// assert!(Money::from_f64(1e300).is_none());
    /// ```
    pub fn from_f64(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        // f64 Display is the shortest round-trip form, never exponent notation
        Decimal::from_str(&amount.to_string()).ok().map(Money)
    }

    /// Returns the exact decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the nearest `f64`, for reporting back to callers.
    ///
    /// ## Example
    /// ```rust
    /// use order_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(22140).to_f64(), 221.4);
    /// ```
    pub fn to_f64(&self) -> f64 {
        // Decimal's Display is plain notation, which f64 parsing rounds correctly
        self.0.to_string().parse().unwrap_or_default()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtracts `other`, returning `None` on overflow.
    #[inline]
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Multiplies money by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use order_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(250); // 2.50
    /// let line_total = unit_price.checked_mul_quantity(5).unwrap();
    /// assert_eq!(line_total, Money::from_cents(1250)); // 12.50
    /// ```
    #[inline]
    pub fn checked_mul_quantity(self, qty: i64) -> Option<Money> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Returns `self × rate`, unrounded.
    ///
    /// ## Example
    /// ```rust
    /// use order_core::money::Money;
    /// use order_core::types::TaxRate;
    ///
    /// let amount = Money::from_cents(10900); // 109.00
    /// let rate = TaxRate::from_fraction(0.23).unwrap();
    ///
    /// assert_eq!(amount.calculate_tax(rate), Money::from_cents(2507));
    /// assert_eq!(Money::from_cents(1).calculate_tax(rate).to_f64(), 0.0023);
    /// ```
    ///
    /// Callers reject negative amounts before getting here.
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // rate <= 1, so the product never exceeds the amount
        Money(self.0 * rate.amount())
    }

    /// Returns `self × (1 − discount)`, unrounded.
    ///
    /// A [`DiscountRate`] is always in [0, 1], so the result lies between
    /// zero and `self` for non-negative amounts.
    pub(crate) fn apply_percentage_discount(&self, discount: DiscountRate) -> Money {
        Money(self.0 * (Decimal::ONE - discount.amount()))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the plain decimal amount, without trailing zeros.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(fraction: f64) -> TaxRate {
        TaxRate::from_fraction(fraction).unwrap()
    }

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), Decimal::new(1099, 2));
        assert_eq!(money.to_f64(), 10.99);
    }

    #[test]
    fn test_from_f64_keeps_full_precision() {
        assert_eq!(Money::from_f64(100.0).unwrap(), Money::from_cents(10_000));
        assert_eq!(Money::from_f64(0.1).unwrap(), Money::from_cents(10));
        assert_eq!(Money::from_f64(2.501).unwrap().to_string(), "2.501");
        assert_eq!(Money::from_f64(99.996).unwrap().to_string(), "99.996");
        assert_eq!(Money::from_f64(-5.5).unwrap(), Money::from_cents(-550));

        assert_ne!(Money::from_f64(2.501), Money::from_f64(2.504));
        assert!(Money::from_f64(0.004).unwrap().is_positive());
        assert!(Money::from_f64(99.996).unwrap() < Money::from_cents(10_000));
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert!(Money::from_f64(f64::NAN).is_none());
        assert!(Money::from_f64(f64::INFINITY).is_none());
        assert!(Money::from_f64(f64::NEG_INFINITY).is_none());
        assert!(Money::from_f64(1e300).is_none());
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(Money::from_cents(22140).to_f64(), 221.4);
        assert_eq!(Money::from_cents(13407).to_f64(), 134.07);
        assert_eq!(Money::from_f64(99.996).unwrap().to_f64(), 99.996);
        assert_eq!(Money::zero().to_f64(), 0.0);
    }

    #[test]
    fn test_display_is_plain_decimal() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.5");
        assert_eq!(Money::zero().to_string(), "0");
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a.checked_add(b), Some(Money::from_cents(1500)));
        assert_eq!(a.checked_sub(b), Some(Money::from_cents(500)));
        assert_eq!(a.checked_mul_quantity(3), Some(Money::from_cents(3000)));

        let max = Money::new(Decimal::MAX);
        assert_eq!(max.checked_add(b), None);
        assert_eq!(max.checked_mul_quantity(2), None);
    }

    #[test]
    fn test_tax_calculation_basic() {
        // 180.00 at 23% = 41.40
        let tax = Money::from_cents(18000).calculate_tax(rate(0.23));
        assert_eq!(tax, Money::from_cents(4140));
    }

    #[test]
    fn test_tax_calculation_is_not_rounded() {
        // 10.00 at 8.25% = 0.825
        let tax = Money::from_cents(1000).calculate_tax(rate(0.0825));
        assert_eq!(tax.to_string(), "0.825");

        let tax = Money::from_f64(0.01).unwrap().calculate_tax(rate(0.23));
        assert_eq!(tax.to_f64(), 0.0023);
    }

    #[test]
    fn test_percentage_discount() {
        let subtotal = Money::from_cents(11000); // 110.00
        let ten_off = DiscountRate::from_fraction(0.1).unwrap();
        assert_eq!(subtotal.apply_percentage_discount(ten_off), Money::from_cents(9900));

        let all_off = DiscountRate::from_fraction(1.0).unwrap();
        assert!(subtotal.apply_percentage_discount(all_off).is_zero());

        let none_off = subtotal.apply_percentage_discount(DiscountRate::zero());
        assert_eq!(none_off, subtotal);

        let tiny = DiscountRate::from_fraction(0.00004).unwrap();
        let discounted = Money::from_cents(10_000).apply_percentage_discount(tiny);
        assert_eq!(discounted.to_f64(), 99.996);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(!negative.is_zero());
        assert!(!negative.is_positive());
        assert!(negative.is_negative());
    }
}
