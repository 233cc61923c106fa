//! # Commands
//!
//! The untyped boundary of the engine. Arguments arrive as JSON objects,
//! the way a frontend bridge or scripting host would send them, and are
//! type-checked here before the calculator sees them.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Lifecycle                                      │
//! │                                                                         │
//! │  create_calculator                                                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ┌──────────┐  add_item   ┌──────────┐  calculate_total  ┌──────────┐  │
//! │  │  Empty   │────────────►│ NonEmpty │──────────────────►│  Total   │  │
//! │  │  Order   │◄────────────│          │  order_summary    │  (pure)  │  │
//! │  └──────────┘ clear_order └──────────┘                   └──────────┘  │
//! │               remove_item      │                                        │
//! │               (last item)      └── get_subtotal / total_items /         │
//! │                                    list_items / is_empty                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Argument Types
//! - names are JSON strings
//! - prices, amounts, rates and discounts are JSON numbers (not booleans)
//! - quantities are JSON integers; `2.0` is a type error
//!
//! ## Usage
//! ```rust
//! use order_service::commands;
//! use order_service::config::EngineConfig;
//! use serde_json::json;
//!
//! let state = commands::create_calculator(&EngineConfig::default(), &json!({})).unwrap();
//! commands::invoke(&state, "add_item", &json!({ "name": "Item1", "price": 100.0, "quantity": 2 }))
//!     .unwrap();
//!
//! let total = commands::invoke(&state, "calculate_total", &json!({ "discount": 0.1 })).unwrap();
//! assert_eq!(total, json!(221.4));
//! ```

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use order_core::validation::{
    expect_integer, expect_number, expect_str, parse_amount, parse_price, type_name,
};
use order_core::{
    CoreError, CoreResult, DiscountRate, LineItem, OrderCalculator, OrderSummary, PricingConfig,
};

use crate::config::EngineConfig;
use crate::error::ApiError;
use crate::state::CalculatorState;

/// Every command name accepted by [`invoke`].
pub const COMMANDS: &[&str] = &[
    "add_item",
    "remove_item",
    "clear_order",
    "get_cart",
    "get_subtotal",
    "total_items",
    "list_items",
    "is_empty",
    "apply_discount",
    "calculate_shipping",
    "calculate_tax",
    "calculate_total",
    "order_summary",
];

// =============================================================================
// Responses
// =============================================================================

/// A line item as returned to callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemView {
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
    /// `None` if the line total overflows.
    pub line_total: Option<f64>,
}

impl From<&LineItem> for LineItemView {
    fn from(item: &LineItem) -> Self {
        LineItemView {
            name: item.name.clone(),
            unit_price: item.unit_price.to_f64(),
            quantity: item.quantity,
            line_total: item.line_total().map(|m| m.to_f64()),
        }
    }
}

/// Cart contents returned by the mutating commands and `get_cart`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItemView>,
    pub total_items: i64,
}

impl From<&OrderCalculator> for CartResponse {
    fn from(calculator: &OrderCalculator) -> Self {
        CartResponse {
            items: calculator.items().iter().map(LineItemView::from).collect(),
            total_items: calculator.total_items(),
        }
    }
}

/// Every pricing step of `order_summary`, in major units.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub item_count: usize,
    pub total_items: i64,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub discounted: f64,
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,
}

impl From<OrderSummary> for SummaryResponse {
    fn from(s: OrderSummary) -> Self {
        SummaryResponse {
            item_count: s.item_count,
            total_items: s.total_items,
            subtotal: s.subtotal.to_f64(),
            discount_amount: s.discount_amount.to_f64(),
            discounted: s.discounted.to_f64(),
            shipping: s.shipping.to_f64(),
            tax: s.tax.to_f64(),
            total: s.total.to_f64(),
        }
    }
}

// =============================================================================
// Argument Access
// =============================================================================

/// Named arguments of one command. `null` means "no arguments".
struct Args<'a>(Option<&'a Map<String, Value>>);

impl<'a> Args<'a> {
    fn new(args: &'a Value) -> CoreResult<Self> {
        match args {
            Value::Null => Ok(Args(None)),
            Value::Object(map) => Ok(Args(Some(map))),
            other => Err(CoreError::invalid_type("arguments", "an object", type_name(other))),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.and_then(|map| map.get(key))
    }

    /// A missing required argument is a type error, like a call with too
    /// few arguments.
    fn required(&self, key: &str, expected: &'static str) -> CoreResult<&'a Value> {
        self.get(key)
            .ok_or_else(|| CoreError::invalid_type(key, expected, "nothing"))
    }

    fn str(&self, key: &str) -> CoreResult<&'a str> {
        expect_str(key, self.required(key, "a string")?)
    }

    fn number(&self, key: &str) -> CoreResult<f64> {
        expect_number(key, self.required(key, "a number")?)
    }

    fn number_or(&self, key: &str, default: f64) -> CoreResult<f64> {
        self.get(key).map_or(Ok(default), |v| expect_number(key, v))
    }

    fn integer_or(&self, key: &str, default: i64) -> CoreResult<i64> {
        self.get(key).map_or(Ok(default), |v| expect_integer(key, v))
    }
}

// =============================================================================
// Construction
// =============================================================================

/// Creates a calculator from optional `tax_rate`, `free_shipping_threshold`
/// and `shipping_cost` arguments; missing ones come from `defaults`.
pub fn create_calculator(defaults: &EngineConfig, args: &Value) -> Result<CalculatorState, ApiError> {
    let args = Args::new(args)?;
    let base = &defaults.pricing;

    let tax_rate = args.number_or("tax_rate", base.tax_rate)?;
    let threshold = args.number_or("free_shipping_threshold", base.free_shipping_threshold)?;
    let shipping_cost = args.number_or("shipping_cost", base.shipping_cost)?;

    let config = PricingConfig::new(tax_rate, threshold, shipping_cost)?;
    info!(
        tax_rate,
        free_shipping_threshold = threshold,
        shipping_cost,
        "Calculator created"
    );
    Ok(CalculatorState::new(config))
}

// =============================================================================
// Cart Mutation
// =============================================================================

/// Adds `quantity` (default 1) units of `name` at `price`.
///
/// ## Returns
/// Updated cart
pub fn add_item(state: &CalculatorState, args: &Value) -> Result<CartResponse, ApiError> {
    let args = Args::new(args)?;
    let name = args.str("name")?;
    let price = args.number("price")?;
    let quantity = args.integer_or("quantity", 1)?;
    debug!(name = %name, price, quantity, "add_item command");

    let price = parse_price(price).map_err(CoreError::from)?;
    state.with_calculator_mut(|c| {
        c.add_item(name, price, quantity)?;
        Ok::<_, ApiError>(CartResponse::from(&*c))
    })
}

/// Removes the line item for `name` entirely.
pub fn remove_item(state: &CalculatorState, args: &Value) -> Result<CartResponse, ApiError> {
    let args = Args::new(args)?;
    let name = args.str("name")?;
    debug!(name = %name, "remove_item command");

    state.with_calculator_mut(|c| {
        c.remove_item(name)?;
        Ok::<_, ApiError>(CartResponse::from(&*c))
    })
}

/// Empties the cart. Always succeeds.
pub fn clear_order(state: &CalculatorState) -> CartResponse {
    debug!("clear_order command");

    state.with_calculator_mut(|c| {
        c.clear_order();
        CartResponse::from(&*c)
    })
}

// =============================================================================
// Queries
// =============================================================================

/// Current cart contents.
pub fn get_cart(state: &CalculatorState) -> CartResponse {
    state.with_calculator(|c| CartResponse::from(c))
}

/// Σ(unit price × quantity); fails on an empty cart.
pub fn get_subtotal(state: &CalculatorState) -> Result<f64, ApiError> {
    let subtotal = state.with_calculator(|c| c.get_subtotal())?;
    Ok(subtotal.to_f64())
}

/// Σ(quantity).
pub fn total_items(state: &CalculatorState) -> i64 {
    state.with_calculator(|c| c.total_items())
}

/// Distinct item names.
pub fn list_items(state: &CalculatorState) -> Vec<String> {
    state.with_calculator(|c| c.list_items())
}

/// True iff the cart holds no line items.
pub fn is_empty(state: &CalculatorState) -> bool {
    state.with_calculator(|c| c.is_empty())
}

// =============================================================================
// Pricing
// =============================================================================

/// `subtotal × (1 − discount)` for `{ subtotal, discount }`.
pub fn apply_discount(state: &CalculatorState, args: &Value) -> Result<f64, ApiError> {
    let args = Args::new(args)?;
    let subtotal = args.number("subtotal")?;
    let discount = args.number("discount")?;

    let subtotal = parse_amount("subtotal", subtotal).map_err(CoreError::from)?;
    let discount = DiscountRate::from_fraction(discount).map_err(CoreError::from)?;
    let discounted = state.with_calculator(|c| c.apply_discount(subtotal, discount))?;
    Ok(discounted.to_f64())
}

/// Shipping fee for `{ amount }`.
pub fn calculate_shipping(state: &CalculatorState, args: &Value) -> Result<f64, ApiError> {
    let args = Args::new(args)?;
    let amount = args.number("amount")?;

    let amount = parse_amount("amount", amount).map_err(CoreError::from)?;
    Ok(state.with_calculator(|c| c.calculate_shipping(amount)).to_f64())
}

/// Tax on `{ amount }`; negative amounts are rejected.
pub fn calculate_tax(state: &CalculatorState, args: &Value) -> Result<f64, ApiError> {
    let args = Args::new(args)?;
    let amount = args.number("amount")?;

    let amount = parse_amount("amount", amount).map_err(CoreError::from)?;
    let tax = state.with_calculator(|c| c.calculate_tax(amount))?;
    Ok(tax.to_f64())
}

/// Final total for `{ discount }` (default 0).
pub fn calculate_total(state: &CalculatorState, args: &Value) -> Result<f64, ApiError> {
    Ok(order_summary(state, args)?.total)
}

/// Every pricing step for `{ discount }` (default 0).
///
/// Argument types are checked first, then the empty cart, then the
/// discount range.
pub fn order_summary(state: &CalculatorState, args: &Value) -> Result<SummaryResponse, ApiError> {
    let args = Args::new(args)?;
    let discount = args.number_or("discount", 0.0)?;
    debug!(discount, "order_summary command");

    let summary = state.with_calculator(|c| {
        if c.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        c.summary(DiscountRate::from_fraction(discount)?)
    })?;
    Ok(SummaryResponse::from(summary))
}

// =============================================================================
// Dispatch
// =============================================================================

/// Runs `command` with `args` and returns its JSON result.
pub fn invoke(state: &CalculatorState, command: &str, args: &Value) -> Result<Value, ApiError> {
    debug!(command = %command, "invoke");

    let result = match command {
        "add_item" => json!(add_item(state, args)?),
        "remove_item" => json!(remove_item(state, args)?),
        "clear_order" => json!(clear_order(state)),
        "get_cart" => json!(get_cart(state)),
        "get_subtotal" => json!(get_subtotal(state)?),
        "total_items" => json!(total_items(state)),
        "list_items" => json!(list_items(state)),
        "is_empty" => json!(is_empty(state)),
        "apply_discount" => json!(apply_discount(state, args)?),
        "calculate_shipping" => json!(calculate_shipping(state, args)?),
        "calculate_tax" => json!(calculate_tax(state, args)?),
        "calculate_total" => json!(calculate_total(state, args)?),
        "order_summary" => json!(order_summary(state, args)?),
        other => return Err(ApiError::unknown_command(other)),
    };

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn new_state() -> CalculatorState {
        create_calculator(&EngineConfig::default(), &Value::Null).unwrap()
    }

    #[test]
    fn test_add_item_type_errors() {
        let state = new_state();

        for args in [
            json!({ "name": 42, "price": 1.0 }),
            json!({ "name": "Apple", "price": "1.0" }),
            json!({ "name": "Apple", "price": true }),
            json!({ "name": "Apple", "price": 1.0, "quantity": 2.0 }),
            json!({ "name": "Apple", "price": 1.0, "quantity": "2" }),
            json!({ "price": 1.0 }),
            json!(["Apple", 1.0]),
        ] {
            let err = add_item(&state, &args).unwrap_err();
            assert_eq!(err.code, ErrorCode::TypeError, "{args}");
        }

        assert!(is_empty(&state));
    }

    #[test]
    fn test_add_item_value_errors() {
        let state = new_state();

        for args in [
            json!({ "name": "", "price": 1.0 }),
            json!({ "name": "Apple", "price": 0 }),
            json!({ "name": "Apple", "price": -2.5 }),
            json!({ "name": "Apple", "price": 1.0, "quantity": 0 }),
        ] {
            let err = add_item(&state, &args).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValueError, "{args}");
        }

        assert!(is_empty(&state));
    }

    #[test]
    fn test_add_item_defaults_quantity_to_one() {
        let state = new_state();
        let cart = add_item(&state, &json!({ "name": "Apple", "price": 2.5 })).unwrap();

        assert_eq!(cart.total_items, 1);
        assert_eq!(cart.items[0].unit_price, 2.5);
        assert_eq!(cart.items[0].line_total, Some(2.5));
    }

    #[test]
    fn test_remove_item_type_and_value_errors() {
        let state = new_state();

        let err = remove_item(&state, &json!({ "name": 1 })).unwrap_err();
        assert_eq!(err.code, ErrorCode::TypeError);

        let err = remove_item(&state, &json!({ "name": "Ghost" })).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueError);
    }

    #[test]
    fn test_pricing_argument_checks() {
        let state = new_state();

        let err = calculate_tax(&state, &json!({ "amount": -1.0 })).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueError);
        let err = calculate_tax(&state, &json!({ "amount": "10" })).unwrap_err();
        assert_eq!(err.code, ErrorCode::TypeError);

        let err = apply_discount(&state, &json!({ "subtotal": 100.0, "discount": 1.5 })).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueError);
        let err = apply_discount(&state, &json!({ "subtotal": -1.0, "discount": 0.5 })).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueError);
        let err = apply_discount(&state, &json!({ "subtotal": 100.0, "discount": "10%" })).unwrap_err();
        assert_eq!(err.code, ErrorCode::TypeError);

        let err = calculate_shipping(&state, &json!({ "amount": null })).unwrap_err();
        assert_eq!(err.code, ErrorCode::TypeError);
        assert_eq!(calculate_shipping(&state, &json!({ "amount": -5 })).unwrap(), 10.0);
    }

    #[test]
    fn test_amounts_are_not_rounded_to_cents() {
        let state = new_state();

        assert_eq!(calculate_shipping(&state, &json!({ "amount": 99.996 })).unwrap(), 10.0);
        assert_eq!(calculate_tax(&state, &json!({ "amount": 0.01 })).unwrap(), 0.0023);
        assert_eq!(
            apply_discount(&state, &json!({ "subtotal": 100, "discount": 0.00004 })).unwrap(),
            99.996
        );
    }

    #[test]
    fn test_sub_cent_prices() {
        let state = new_state();

        let cart = add_item(&state, &json!({ "name": "Bolt", "price": 0.004 })).unwrap();
        assert_eq!(cart.items[0].unit_price, 0.004);

        add_item(&state, &json!({ "name": "A", "price": 2.501 })).unwrap();
        let err = add_item(&state, &json!({ "name": "A", "price": 2.504 })).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueError);
        assert_eq!(err.message, "Item A already in cart at 2.501, cannot add at 2.504");

        let cart = get_cart(&state);
        assert_eq!(cart.items[1].quantity, 1);
        assert_eq!(cart.items[1].unit_price, 2.501);
    }

    #[test]
    fn test_calculate_total_checks_empty_before_discount_range() {
        let state = new_state();

        let err = calculate_total(&state, &json!({ "discount": 5.0 })).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueError);
        assert_eq!(err.message, "Order is empty");

        let err = calculate_total(&state, &json!({ "discount": "none" })).unwrap_err();
        assert_eq!(err.code, ErrorCode::TypeError);
    }

    #[test]
    fn test_create_calculator_arguments() {
        let defaults = EngineConfig::default();

        let state = create_calculator(&defaults, &json!({ "shipping_cost": 4 })).unwrap();
        assert_eq!(state.with_calculator(|c| c.config().shipping_cost().to_f64()), 4.0);

        let err = create_calculator(&defaults, &json!({ "tax_rate": "0.2" })).unwrap_err();
        assert_eq!(err.code, ErrorCode::TypeError);

        let err = create_calculator(&defaults, &json!({ "tax_rate": 2 })).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueError);

        let err = create_calculator(&defaults, &json!({ "free_shipping_threshold": -1 })).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueError);
    }

    #[test]
    fn test_invoke_unknown_command() {
        let state = new_state();
        let err = invoke(&state, "checkout", &Value::Null).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownCommand);
    }

    #[test]
    fn test_every_listed_command_dispatches() {
        let state = new_state();
        add_item(&state, &json!({ "name": "Apple", "price": 2.5 })).unwrap();

        let args = json!({ "name": "Apple", "amount": 10.0, "subtotal": 10.0, "discount": 0.0, "price": 2.5 });
        for command in COMMANDS {
            let result = invoke(&state, command, &args);
            if let Err(err) = result {
                assert_ne!(err.code, ErrorCode::UnknownCommand, "{command}");
            }
        }
    }
}
