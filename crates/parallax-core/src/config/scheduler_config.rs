use serde::{Deserialize, Serialize};

use super::defaults;

/// Activity-scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Cadence of the unconditional counter sweep.
    pub cleanup_interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            cleanup_interval_secs: defaults::CLEANUP_INTERVAL_SECS,
        }
    }
}
