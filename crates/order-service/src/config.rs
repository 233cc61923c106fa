//! # Engine Configuration
//!
//! Loads the pricing parameters for new calculators.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ORDER_TAX_RATE=0.2                                                 │
//! │     ORDER_FREE_SHIPPING_THRESHOLD=75                                   │
//! │     ORDER_SHIPPING_COST=5.5                                            │
//! │                                                                         │
//! │  2. TOML Config File (path given by the caller)                        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     23% tax, free shipping from 100.00, 10.00 shipping                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pricing.toml
//! [pricing]
//! tax_rate = 0.23
//! free_shipping_threshold = 100.0
//! shipping_cost = 10.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

use order_core::calculator::{
    DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_SHIPPING_COST, DEFAULT_TAX_RATE,
};
use order_core::PricingConfig;

use crate::error::ConfigResult;

/// Environment variable overriding `pricing.tax_rate`.
pub const ENV_TAX_RATE: &str = "ORDER_TAX_RATE";

/// Environment variable overriding `pricing.free_shipping_threshold`.
pub const ENV_FREE_SHIPPING_THRESHOLD: &str = "ORDER_FREE_SHIPPING_THRESHOLD";

/// Environment variable overriding `pricing.shipping_cost`.
pub const ENV_SHIPPING_COST: &str = "ORDER_SHIPPING_COST";

// =============================================================================
// Pricing Settings
// =============================================================================

/// Raw pricing parameters as written in the config file.
///
/// Values are validated by [`EngineConfig::pricing`], not on parse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Tax rate as a fraction (0.23 = 23%).
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,

    /// Post-discount amount at which shipping becomes free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: f64,

    /// Flat shipping fee below the threshold.
    #[serde(default = "default_shipping_cost")]
    pub shipping_cost: f64,
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

fn default_free_shipping_threshold() -> f64 {
    DEFAULT_FREE_SHIPPING_THRESHOLD
}

fn default_shipping_cost() -> f64 {
    DEFAULT_SHIPPING_COST
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            tax_rate: default_tax_rate(),
            free_shipping_threshold: default_free_shipping_threshold(),
            shipping_cost: default_shipping_cost(),
        }
    }
}

// =============================================================================
// Engine Configuration
// =============================================================================

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Pricing parameters.
    #[serde(default)]
    pub pricing: PricingSettings,
}

impl EngineConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file, if `config_path` is given and exists
    /// 3. Environment variables
    ///
    /// The result is validated before it is returned.
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                info!(?path, "Loading pricing config from file");
                let contents = std::fs::read_to_string(path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.pricing()?;

        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to `path` as pretty TOML.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        info!(?path, "Pricing config saved");
        Ok(())
    }

    /// Validates the settings into a core [`PricingConfig`].
    pub fn pricing(&self) -> ConfigResult<PricingConfig> {
        let p = &self.pricing;
        Ok(PricingConfig::new(
            p.tax_rate,
            p.free_shipping_threshold,
            p.shipping_cost,
        )?)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`; unparsable values are logged and skipped.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields: [(&str, &mut f64); 3] = [
            (ENV_TAX_RATE, &mut self.pricing.tax_rate),
            (
                ENV_FREE_SHIPPING_THRESHOLD,
                &mut self.pricing.free_shipping_threshold,
            ),
            (ENV_SHIPPING_COST, &mut self.pricing.shipping_cost),
        ];

        for (key, field) in fields {
            let Some(raw) = lookup(key) else {
                continue;
            };

            match raw.trim().parse::<f64>() {
                Ok(value) => {
                    debug!(key, value, "Overriding pricing setting from environment");
                    *field = value;
                }
                Err(_) => warn!(key, value = %raw, "Ignoring unparsable pricing override"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.pricing.tax_rate, 0.23);
        assert_eq!(config.pricing.free_shipping_threshold, 100.0);
        assert_eq!(config.pricing.shipping_cost, 10.0);
        assert_eq!(config.pricing().unwrap(), PricingConfig::default());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = EngineConfig::from_toml_str(
            r#"
            [pricing]
            tax_rate = 0.08
            "#,
        )
        .unwrap();

        assert_eq!(config.pricing.tax_rate, 0.08);
        assert_eq!(config.pricing.shipping_cost, 10.0);

        let empty = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(empty, EngineConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_wrong_types() {
        let err = EngineConfig::from_toml_str("[pricing]\ntax_rate = \"high\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let config = EngineConfig::from_toml_str("[pricing]\ntax_rate = 1.5").unwrap();
        assert!(matches!(config.pricing(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_TAX_RATE, "0.2"),
            (ENV_SHIPPING_COST, "not-a-number"),
            (ENV_FREE_SHIPPING_THRESHOLD, " 75 "),
        ]);

        let mut config = EngineConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.pricing.tax_rate, 0.2);
        assert_eq!(config.pricing.free_shipping_threshold, 75.0);
        // Unparsable override is ignored
        assert_eq!(config.pricing.shipping_cost, 10.0);
    }

    #[test]
    fn test_load_and_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pricing.toml");

        let mut config = EngineConfig::default();
        config.pricing.free_shipping_threshold = 50.0;
        config.save(&path).unwrap();

        let mut loaded = EngineConfig::from_toml_str(&std::fs::read_to_string(&path).unwrap())
            .unwrap();
        loaded.apply_overrides(|_| None);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_invalid_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pricing.toml");
        std::fs::write(&path, "[pricing]\nshipping_cost = -1.0\n").unwrap();

        assert!(EngineConfig::load(Some(&path)).is_err());
    }
}
