use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded comparison outcome: did the diff show any changes?
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdOutcome {
    pub user_id: String,
    pub had_changes: bool,
    pub recorded_at: DateTime<Utc>,
}

impl ThresholdOutcome {
    pub fn now(user_id: impl Into<String>, had_changes: bool) -> Self {
        Self {
            user_id: user_id.into(),
            had_changes,
            recorded_at: Utc::now(),
        }
    }
}

/// Read-only view of a user's adaptive threshold state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdStatistics {
    pub current_threshold: u32,
    pub sample_count: usize,
    /// Fraction of recent outcomes that had changes; 0.0 with no samples.
    pub change_rate: f64,
}
