//! Configuration for series acquisition.
//!
//! The TOML document carries the two completeness thresholds:
//!
//! ```toml
//! max_empty_bars_fraction = 0.05
//! max_empty_bars_consecutive = 12
//! ```
//!
//! Missing keys fall back to [`MarketDataConfig::default`]. After parsing,
//! the environment variables [`ENV_MAX_EMPTY_BARS_FRACTION`] and
//! [`ENV_MAX_EMPTY_BARS_CONSECUTIVE`] override the file values when set.

use std::path::Path;

use serde::{Deserialize, Serialize};
use shared_utils::{config::ConfigError, env::get_env_parsed};

use crate::gate::CompletenessGate;

pub const ENV_MAX_EMPTY_BARS_FRACTION: &str = "MARKET_DATA_MAX_EMPTY_BARS_FRACTION";
pub const ENV_MAX_EMPTY_BARS_CONSECUTIVE: &str = "MARKET_DATA_MAX_EMPTY_BARS_CONSECUTIVE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketDataConfig {
    /// Upper bound on the fraction of empty bars in an acquired series.
    pub max_empty_bars_fraction: f64,
    /// Upper bound on the longest run of empty bars; huge values disable it.
    pub max_empty_bars_consecutive: f64,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        let gate = CompletenessGate::default();
        Self {
            max_empty_bars_fraction: gate.max_empty_bars_fraction(),
            max_empty_bars_consecutive: gate.max_empty_bars_consecutive(),
        }
    }
}

impl MarketDataConfig {
    /// Applies environment overrides in place.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(v) = get_env_parsed::<f64>(ENV_MAX_EMPTY_BARS_FRACTION)? {
            self.max_empty_bars_fraction = v;
        }
        if let Some(v) = get_env_parsed::<f64>(ENV_MAX_EMPTY_BARS_CONSECUTIVE)? {
            self.max_empty_bars_consecutive = v;
        }
        Ok(())
    }

    /// Builds the validated gate described by this configuration.
    pub fn gate(&self) -> Result<CompletenessGate, ConfigError> {
        CompletenessGate::new(self.max_empty_bars_fraction, self.max_empty_bars_consecutive)
    }
}

/// Parses a TOML string, applies environment overrides and validates the result.
pub fn load_config_str(toml_str: &str) -> Result<MarketDataConfig, ConfigError> {
    let mut config: MarketDataConfig =
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.apply_env()?;
    config.gate()?;
    Ok(config)
}

/// Reads a TOML file from disk; see [`load_config_str`].
pub fn load_config_path(path: impl AsRef<Path>) -> Result<MarketDataConfig, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    load_config_str(&text)
}
