//! # Cart
//!
//! Insertion-ordered collection of line items keyed by name.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Operation                 Cart State Change                            │
//! │  ─────────                 ─────────────────                            │
//! │                                                                         │
//! │  add (new name) ─────────► items.push(item)                             │
//! │                                                                         │
//! │  add (same name, price) ─► items[i].quantity += qty                     │
//! │                                                                         │
//! │  add (same name, other) ─► PriceConflict, nothing changes               │
//! │                                                                         │
//! │  remove ─────────────────► items.remove(i)  (whole line, any quantity)  │
//! │                                                                         │
//! │  clear ──────────────────► items.clear()                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart trusts its caller to have validated names, prices and
//! quantities; `OrderCalculator` does that before every mutation.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::LineItem;

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `name` (adding the same name increases quantity)
/// - A name's unit price never changes while the line item exists
/// - Items keep the order in which their names were first added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds units of an item or increases its quantity if already present.
    ///
    /// ## Behavior
    /// - Name not in cart: appends a new line item
    /// - Name in cart at the same price: adds `quantity` to it
    /// - Name in cart at a different price: `PriceConflict`, cart unchanged
    pub fn add(&mut self, name: &str, unit_price: Money, quantity: i64) -> CoreResult<()> {
        if let Some(item) = self.items.iter_mut().find(|i| i.name == name) {
            if item.unit_price != unit_price {
                return Err(CoreError::PriceConflict {
                    name: name.to_string(),
                    existing: item.unit_price,
                    requested: unit_price,
                });
            }

            item.quantity = item
                .quantity
                .checked_add(quantity)
                .ok_or(CoreError::AmountOverflow("quantity"))?;
            return Ok(());
        }

        self.items.push(LineItem {
            name: name.to_string(),
            unit_price,
            quantity,
        });
        Ok(())
    }

    /// Removes a line item by name, whatever its quantity.
    pub fn remove(&mut self, name: &str) -> CoreResult<LineItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.name == name)
            .ok_or_else(|| CoreError::ItemNotFound(name.to_string()))?;

        Ok(self.items.remove(index))
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Looks up a line item by name.
    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the number of distinct items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items (saturates at `i64::MAX`).
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Calculates Σ(unit price × quantity).
    pub fn subtotal(&self) -> CoreResult<Money> {
        self.items.iter().try_fold(Money::zero(), |acc, item| {
            item.line_total()
                .and_then(|line| acc.checked_add(line))
                .ok_or(CoreError::AmountOverflow("subtotal"))
        })
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
