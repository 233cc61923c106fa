//! # Service Error Types
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow                                           │
//! │                                                                         │
//! │  invoke("add_item", { "name": 42 })                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<Value, ApiError>                                         │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Wrong type? ──── CoreError::InvalidType ───── TYPE_ERROR ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad value? ───── CoreError::Validation/... ── VALUE_ERROR ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use order_core::{CoreError, ErrorKind};

// =============================================================================
// Config Error
// =============================================================================

/// Failures while loading or saving the engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed.
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`crate::config::EngineConfig`].
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be rendered as TOML.
    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A pricing parameter is out of range.
    #[error("Invalid pricing config: {0}")]
    Invalid(#[from] CoreError),
}

/// Convenience type alias for config Results.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// API Error
// =============================================================================

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALUE_ERROR",
///   "message": "Item not found: Apple"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// An argument had the wrong runtime type
    TypeError,

    /// An argument had the right type but an invalid value
    ValueError,

    /// Configuration could not be loaded
    ConfigError,

    /// No command with that name
    UnknownCommand,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates an unknown command error.
    pub fn unknown_command(name: &str) -> Self {
        ApiError::new(ErrorCode::UnknownCommand, format!("Unknown command: {}", name))
    }
}

/// Converts core errors to API errors by their kind.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match err.kind() {
            ErrorKind::Type => ErrorCode::TypeError,
            ErrorKind::Value => ErrorCode::ValueError,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts config errors to API errors.
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            // Bad values keep their kind
            ConfigError::Invalid(core) => ApiError::from(core),
            other => {
                tracing::error!("Config failure: {}", other);
                ApiError::new(ErrorCode::ConfigError, other.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_maps_by_kind() {
        let err = ApiError::from(CoreError::invalid_type("price", "a number", "string"));
        assert_eq!(err.code, ErrorCode::TypeError);

        let err = ApiError::from(CoreError::ItemNotFound("Apple".into()));
        assert_eq!(err.code, ErrorCode::ValueError);
        assert_eq!(err.message, "Item not found: Apple");
    }

    #[test]
    fn test_serialization() {
        let err = ApiError::new(ErrorCode::TypeError, "quantity must be an integer, got float");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "TYPE_ERROR");
        assert_eq!(json["message"], "quantity must be an integer, got float");
    }

    #[test]
    fn test_config_error_mapping() {
        let io = ConfigError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(ApiError::from(io).code, ErrorCode::ConfigError);

        let invalid = ConfigError::Invalid(CoreError::EmptyCart);
        assert_eq!(ApiError::from(invalid).code, ErrorCode::ValueError);
    }
}
