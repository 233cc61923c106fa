//! # order-service: Boundary Layer for the Order Engine
//!
//! Wraps the pure `order-core` calculator for hosts that load settings from
//! disk, share one order between threads, or pass arguments as JSON.
//!
//! ## Module Organization
//! ```text
//! order_service/
//! ├── lib.rs          ◄─── You are here
//! ├── config.rs       ◄─── pricing.toml + ORDER_* environment overrides
//! ├── state.rs        ◄─── Arc<Mutex<OrderCalculator>>
//! ├── commands.rs     ◄─── JSON argument type checks and dispatch
//! ├── logging.rs      ◄─── tracing-subscriber setup
//! └── error.rs        ◄─── ConfigError, ApiError
//! ```
//!
//! ## Startup Sequence
//! ```rust,no_run
//! use order_service::{commands, logging, EngineConfig};
//! use serde_json::json;
//!
//! logging::init();
//! let config = EngineConfig::load(Some(std::path::Path::new("pricing.toml"))).unwrap();
//! let state = commands::create_calculator(&config, &json!(null)).unwrap();
//!
//! commands::invoke(&state, "add_item", &json!({ "name": "Apple", "price": 2.5, "quantity": 3 }))
//!     .unwrap();
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;

pub use config::EngineConfig;
pub use error::{ApiError, ConfigError, ErrorCode};
pub use state::CalculatorState;
