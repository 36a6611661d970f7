use serde::{Deserialize, Serialize};

use super::defaults;

/// TTLs for the three cache keyspaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub edge_decision_ttl_secs: u64,
    pub diff_resolution_ttl_secs: u64,
    pub visualization_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            edge_decision_ttl_secs: defaults::EDGE_DECISION_TTL_SECS,
            diff_resolution_ttl_secs: defaults::DIFF_RESOLUTION_TTL_SECS,
            visualization_ttl_secs: defaults::VISUALIZATION_TTL_SECS,
        }
    }
}
