//! # Error Types
//!
//! Domain-specific error types for order-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  order-core errors (this file)                                         │
//! │  ├── CoreError        - Cart and pricing failures                      │
//! │  └── ValidationError  - Field-level value checks                       │
//! │                                                                         │
//! │  order-service errors (separate crate)                                 │
//! │  ├── ConfigError      - Config file / environment failures             │
//! │  └── ApiError         - What command callers see (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Error Kinds
//! Every [`CoreError`] belongs to exactly one [`ErrorKind`]:
//! - `Type`: an argument had the wrong runtime type (string for a number,
//!   fractional number for a quantity).
//! - `Value`: the type was right but the value is not allowed.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Error Kind
// =============================================================================

/// The category a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong runtime type for an argument.
    Type,
    /// Correct type, invalid value.
    Value,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Type => write!(f, "type"),
            ErrorKind::Value => write!(f, "value"),
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Cart and pricing errors.
///
/// Raised synchronously at the start of each public operation. A failing
/// operation never leaves a partial mutation behind.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An argument had the wrong runtime type.
    ///
    /// ## When This Occurs
    /// - A string where a number is required
    /// - A fractional number (even `2.0`) where an integer quantity is required
    /// - A number where an item name is required
    #[error("{field} must be {expected}, got {found}")]
    InvalidType {
        field: String,
        expected: &'static str,
        found: String,
    },

    /// Field-level validation failure (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The same item name was added again with a different unit price.
    ///
    /// ## User Workflow
    /// ```text
    /// add_item("Apple", 2.5, 1)   → OK
    /// add_item("Apple", 3.0, 1)
    ///      │
    ///      ▼
    /// PriceConflict { name: "Apple", existing: 2.5, requested: 3 }
    ///      │
    ///      ▼
    /// Cart still holds 1 × Apple @ 2.5
    /// ```
    #[error("Item {name} already in cart at {existing}, cannot add at {requested}")]
    PriceConflict {
        name: String,
        existing: Money,
        requested: Money,
    },

    /// The named item is not in the cart.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// The operation needs at least one line item.
    #[error("Order is empty")]
    EmptyCart,

    /// An amount left the representable range.
    #[error("Amount overflow while computing {0}")]
    AmountOverflow(&'static str),
}

impl CoreError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidType { .. } => ErrorKind::Type,
            CoreError::Validation(_)
            | CoreError::PriceConflict { .. }
            | CoreError::ItemNotFound(_)
            | CoreError::EmptyCart
            | CoreError::AmountOverflow(_) => ErrorKind::Value,
        }
    }

    /// Builds a type error for `field`.
    pub fn invalid_type(field: &str, expected: &'static str, found: impl Into<String>) -> Self {
        CoreError::InvalidType {
            field: field.to_string(),
            expected,
            found: found.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level value errors.
///
/// These occur when an argument has the right type but the value does not
/// meet the field's requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// NaN or infinity where a real amount is required.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Finite, but outside what a 96-bit decimal can hold.
    #[error("{field} is outside the representable range")]
    Unrepresentable { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::PriceConflict {
            name: "Apple".to_string(),
            existing: Money::from_cents(250),
            requested: Money::from_cents(300),
        };
        assert_eq!(
            err.to_string(),
            "Item Apple already in cart at 2.5, cannot add at 3"
        );

        let err = CoreError::PriceConflict {
            name: "A".to_string(),
            existing: Money::from_f64(2.501).unwrap(),
            requested: Money::from_f64(2.504).unwrap(),
        };
        assert_eq!(err.to_string(), "Item A already in cart at 2.501, cannot add at 2.504");
        assert_eq!(CoreError::EmptyCart.to_string(), "Order is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0.0,
            max: 1.0,
        };
        assert_eq!(err.to_string(), "tax_rate must be between 0 and 1");
    }

    #[test]
    fn test_error_kinds() {
        let err = CoreError::invalid_type("price", "a number", "string");
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(err.to_string(), "price must be a number, got string");

        assert_eq!(CoreError::EmptyCart.kind(), ErrorKind::Value);
        assert_eq!(CoreError::ItemNotFound("x".into()).kind(), ErrorKind::Value);
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.kind(), ErrorKind::Value);
    }
}
