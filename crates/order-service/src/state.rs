//! # Calculator State
//!
//! Shares one `OrderCalculator` between callers.
//!
//! ## Thread Safety
//! The calculator is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple callers may access/modify the same order
//! 2. Only one caller should modify the cart at a time
//! 3. Queries must see a consistent snapshot, never a half-applied add
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  with_calculator_mut(|c| c.add_item(..))   ── exclusive lock ──►  cart  │
//! │  with_calculator(|c| c.calculate_total(..)) ── same lock ───────►  read │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Not RwLock?
//! Every closure here finishes in microseconds and most commands mutate.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use order_core::{OrderCalculator, PricingConfig};

/// Shared, lock-protected calculator. Clones share the same order.
#[derive(Debug, Clone, Default)]
pub struct CalculatorState {
    calculator: Arc<Mutex<OrderCalculator>>,
}

impl CalculatorState {
    /// Creates state around a fresh calculator with an empty cart.
    pub fn new(config: PricingConfig) -> Self {
        CalculatorState {
            calculator: Arc::new(Mutex::new(OrderCalculator::new(config))),
        }
    }

    /// Executes a function with read access to the calculator.
    ///
    /// ## Usage
    /// ```rust
    /// use order_service::state::CalculatorState;
    ///
    /// let state = CalculatorState::default();
    /// assert!(state.with_calculator(|c| c.is_empty()));
    /// ```
    pub fn with_calculator<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderCalculator) -> R,
    {
        let calculator = self.lock();
        f(&calculator)
    }

    /// Executes a function with write access to the calculator.
    ///
    /// ## Usage
    /// ```rust
    /// use order_core::Money;
    /// use order_service::state::CalculatorState;
    ///
    /// let state = CalculatorState::default();
    /// state
    ///     .with_calculator_mut(|c| c.add_item("Apple", Money::from_cents(250), 1))
    ///     .unwrap();
    /// assert_eq!(state.with_calculator(|c| c.total_items()), 1);
    /// ```
    pub fn with_calculator_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderCalculator) -> R,
    {
        let mut calculator = self.lock();
        f(&mut calculator)
    }

    /// Every mutation validates before it touches the cart, so the data
    /// behind a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, OrderCalculator> {
        self.calculator
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
