//! # Logging
//!
//! Installs the `tracing` subscriber used by hosts of the engine.
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show every cart mutation and pricing step
//! - `RUST_LOG=order_core=debug` - Pricing pipeline only
//! - Default: INFO level

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a fmt subscriber filtered by `RUST_LOG` (default: info).
///
/// Returns `false` if a global subscriber was already installed, so hosts
/// and tests can call it more than once.
pub fn init() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
