//! # order-core: Pure Pricing Logic
//!
//! This crate is the **heart** of the order engine. It holds the cart and the
//! pricing pipeline as pure computations with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Order Engine Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 order-service (boundary layer)                  │   │
//! │  │   config file + env ─► CalculatorState ─► JSON commands         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ order-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │calculator │  │   │
//! │  │   │ LineItem  │  │   Money   │  │   Cart    │  │ pricing   │  │   │
//! │  │   │ TaxRate   │  │  Decimal  │  │ by name   │  │ pipeline  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, TaxRate, DiscountRate, OrderSummary)
//! - [`money`] - Money type over exact decimal arithmetic
//! - [`cart`] - Insertion-ordered cart keyed by item name
//! - [`calculator`] - PricingConfig and the OrderCalculator pipeline
//! - [`error`] - Domain error types and the Type/Value error kinds
//! - [`validation`] - Type checks for untyped arguments and value rules
//!
//! ## Example Usage
//!
//! ```rust
//! use order_core::{DiscountRate, Money, OrderCalculator};
//!
//! let mut calc = OrderCalculator::default(); // 23% tax, free shipping from 100
//! calc.add_item("Item1", Money::from_cents(10_000), 2).unwrap();
//!
//! // 200 → 10% off → 180, ships free, tax 41.40
//! let total = calc.calculate_total(DiscountRate::from_fraction(0.1).unwrap()).unwrap();
//! assert_eq!(total, Money::from_cents(22_140));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{OrderCalculator, PricingConfig};
pub use cart::Cart;
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use types::*;
