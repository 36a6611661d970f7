use serde::{Deserialize, Serialize};

use super::defaults;

/// Adaptive-threshold controller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub default_threshold: u32,
    pub min_threshold: u32,
    pub max_threshold: u32,
    /// Only outcomes younger than this take part in recalculation.
    pub window_days: i64,
    /// At most this many recent outcomes are considered.
    pub max_samples: usize,
    /// Below this sample count the threshold never moves.
    pub min_samples: usize,
    /// Change rate below which the threshold is raised (compare less).
    pub change_rate_low: f64,
    /// Change rate above which the threshold is lowered (compare more).
    pub change_rate_high: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            default_threshold: defaults::DEFAULT_THRESHOLD,
            min_threshold: defaults::MIN_THRESHOLD,
            max_threshold: defaults::MAX_THRESHOLD,
            window_days: defaults::OUTCOME_WINDOW_DAYS,
            max_samples: defaults::OUTCOME_MAX_SAMPLES,
            min_samples: defaults::OUTCOME_MIN_SAMPLES,
            change_rate_low: defaults::CHANGE_RATE_LOW,
            change_rate_high: defaults::CHANGE_RATE_HIGH,
        }
    }
}
