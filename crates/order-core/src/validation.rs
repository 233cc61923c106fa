//! # Validation Module
//!
//! Argument validation for the pricing engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Type checks (untyped JSON arguments)                         │
//! │  ├── expect_str / expect_number / expect_integer                       │
//! │  └── Wrong runtime type → CoreError::InvalidType (TypeKind)            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Value checks (typed arguments)                               │
//! │  ├── validate_item_name, validate_quantity, parse_price, ...           │
//! │  └── Bad value → ValidationError (ValueKind)                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart rules (OrderCalculator)                                 │
//! │  └── price conflicts, missing items, empty cart                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use order_core::validation::{expect_integer, validate_quantity};
//! use serde_json::json;
//!
//! let qty = expect_integer("quantity", &json!(3)).unwrap();
//! validate_quantity(qty).unwrap();
//!
//! // 2.0 is numerically whole but not an integer
//! assert!(expect_integer("quantity", &json!(2.0)).is_err());
//! ```

use serde_json::Value;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Type Checks
// =============================================================================

/// Describes the runtime type of a JSON value for error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Requires a string argument.
pub fn expect_str<'a>(field: &str, value: &'a Value) -> CoreResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| CoreError::invalid_type(field, "a string", type_name(value)))
}

/// Requires a numeric argument (integer or float; booleans are not numbers).
pub fn expect_number(field: &str, value: &Value) -> CoreResult<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| CoreError::invalid_type(field, "a number", "non-finite number")),
        other => Err(CoreError::invalid_type(field, "a number", type_name(other))),
    }
}

/// Requires an integer argument.
///
/// A float is rejected even when it is numerically whole (`2.0`).
/// Integers beyond the `i64` range have the right type but an invalid value.
pub fn expect_integer(field: &str, value: &Value) -> CoreResult<i64> {
    match value {
        Value::Number(n) if n.is_i64() => n
            .as_i64()
            .ok_or_else(|| CoreError::invalid_type(field, "an integer", "integer")),
        Value::Number(n) if n.is_u64() => Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: i64::MIN as f64,
            max: i64::MAX as f64,
        }
        .into()),
        other => Err(CoreError::invalid_type(field, "an integer", type_name(other))),
    }
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty
///
/// ## Example
/// ```rust
/// use order_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Apple").is_ok());
/// assert!(validate_item_name("").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be at least 1
///
/// ## User Workflow
/// ```text
/// add_item("Apple", 2.50, qty)
///       │
///       ▼
/// validate_quantity(qty) ← THIS FUNCTION
///       │
///       ├── qty <= 0? → Error: "quantity must be positive"
///       │
///       └── OK → insert or increment the line item
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be strictly positive; zero is rejected, not just negatives
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates that an amount is zero or greater.
pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Converts a real amount to [`Money`] at full precision.
///
/// ## Rules
/// - Must be finite
/// - Must fit in a 96-bit decimal (28 significant digits)
pub fn parse_amount(field: &str, amount: f64) -> ValidationResult<Money> {
    if !amount.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    Money::from_f64(amount).ok_or_else(|| ValidationError::Unrepresentable {
        field: field.to_string(),
    })
}

/// Converts a real amount to [`Money`], rejecting negatives.
///
/// ## Example
/// ```rust
/// use order_core::money::Money;
/// use order_core::validation::parse_non_negative_amount;
///
/// assert_eq!(
///     parse_non_negative_amount("shipping_cost", 10.0).unwrap(),
///     Money::from_cents(1000)
/// );
/// assert!(parse_non_negative_amount("shipping_cost", 0.0).is_ok());
/// assert!(parse_non_negative_amount("shipping_cost", -1.0).is_err());
/// ```
pub fn parse_non_negative_amount(field: &str, amount: f64) -> ValidationResult<Money> {
    let money = parse_amount(field, amount)?;
    validate_non_negative(field, money)?;
    Ok(money)
}

/// Converts a real unit price to [`Money`], exactly as given.
///
/// ## Rules
/// - Must be finite
/// - Must be greater than zero; any positive price is kept, `0.004` included
pub fn parse_price(price: f64) -> ValidationResult<Money> {
    if price.is_nan() {
        return Err(ValidationError::NotFinite {
            field: "price".to_string(),
        });
    }

    if price <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    let money = parse_amount("price", price)?;
    validate_unit_price(money)?;
    Ok(money)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_expect_str() {
        assert_eq!(expect_str("name", &json!("Apple")).unwrap(), "Apple");

        let err = expect_str("name", &json!(42)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(err.to_string(), "name must be a string, got integer");

        assert!(expect_str("name", &Value::Null).is_err());
    }

    #[test]
    fn test_expect_number() {
        assert_eq!(expect_number("price", &json!(2.5)).unwrap(), 2.5);
        assert_eq!(expect_number("price", &json!(3)).unwrap(), 3.0);

        for bad in [json!("2.5"), json!(true), json!(null), json!([1])] {
            let err = expect_number("price", &bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Type);
        }
    }

    #[test]
    fn test_expect_integer() {
        assert_eq!(expect_integer("quantity", &json!(2)).unwrap(), 2);
        assert_eq!(expect_integer("quantity", &json!(-3)).unwrap(), -3);

        let err = expect_integer("quantity", &json!(2.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(err.to_string(), "quantity must be an integer, got float");

        let err = expect_integer("quantity", &json!("2")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);

        let err = expect_integer("quantity", &json!(u64::MAX)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Apple").is_ok());
        assert!(validate_item_name(" ").is_ok());
        assert!(matches!(
            validate_item_name(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1_000_000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(2.5).unwrap(), Money::from_cents(250));
        assert_eq!(parse_price(0.01).unwrap(), Money::from_cents(1));

        assert!(matches!(
            parse_price(0.0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(parse_price(-1.0).is_err());
        assert!(matches!(
            parse_price(f64::NAN),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(parse_price(f64::INFINITY).is_err());
        assert!(matches!(
            parse_price(1e300),
            Err(ValidationError::Unrepresentable { .. })
        ));
    }

    #[test]
    fn test_parse_price_keeps_sub_cent_prices() {
        let bolt = parse_price(0.004).unwrap();
        assert!(bolt.is_positive());
        assert_eq!(bolt.to_f64(), 0.004);

        assert_ne!(parse_price(2.501).unwrap(), parse_price(2.504).unwrap());
        assert_eq!(parse_price(2.504).unwrap().to_f64(), 2.504);
    }

    #[test]
    fn test_parse_non_negative_amount() {
        assert!(parse_non_negative_amount("amount", 0.0).unwrap().is_zero());
        assert!(matches!(
            parse_non_negative_amount("amount", -0.5),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
        assert!(matches!(
            parse_non_negative_amount("amount", f64::NEG_INFINITY),
            Err(ValidationError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("amount", Money::zero()).is_ok());
        assert!(validate_non_negative("amount", Money::from_cents(-1)).is_err());
    }
}
