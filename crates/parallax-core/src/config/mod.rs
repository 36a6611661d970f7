//! Per-concern configuration, all serde-derived with defaults so a partial
//! TOML file (or none at all) yields a working config.

pub mod defaults;

mod cache_config;
mod scheduler_config;
mod threshold_config;

pub use cache_config::CacheConfig;
pub use scheduler_config::SchedulerConfig;
pub use threshold_config::ThresholdConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{ParallaxError, ParallaxResult};

/// Top-level configuration for the Parallax engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub threshold: ThresholdConfig,
    pub cache: CacheConfig,
    pub scheduler: SchedulerConfig,
}

impl ParallaxConfig {
    /// Parse a TOML document; absent keys fall back to defaults.
    pub fn from_toml_str(s: &str) -> ParallaxResult<Self> {
        toml::from_str(s).map_err(|e| ParallaxError::Config {
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = ParallaxConfig::from_toml_str("").unwrap();
        assert_eq!(config.threshold.default_threshold, 5);
        assert_eq!(config.cache.visualization_ttl_secs, 300);
    }

    #[test]
    fn partial_toml_overrides_one_section() {
        let config = ParallaxConfig::from_toml_str(
            "[threshold]\ndefault_threshold = 7\n",
        )
        .unwrap();
        assert_eq!(config.threshold.default_threshold, 7);
        assert_eq!(config.threshold.min_threshold, 3);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        assert!(ParallaxConfig::from_toml_str("threshold = [").is_err());
    }
}
