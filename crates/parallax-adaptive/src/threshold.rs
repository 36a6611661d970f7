//! Per-user adaptive threshold, tuned by a rolling window of comparison
//! outcomes.
//!
//! Thresholds live in this controller instance (injectable, so tests build
//! isolated controllers); outcomes are durable, so a restarted controller
//! re-converges once enough samples fall inside the window.

use std::sync::Arc;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use tracing::{debug, warn};

use parallax_core::config::ThresholdConfig;
use parallax_core::errors::ParallaxResult;
use parallax_core::models::{ThresholdOutcome, ThresholdStatistics};
use parallax_core::traits::IGraphStore;

/// Maintains per-user thresholds and records comparison outcomes to tune
/// them.
pub struct ThresholdController {
    store: Arc<dyn IGraphStore>,
    config: ThresholdConfig,
    thresholds: DashMap<String, u32>,
}

impl ThresholdController {
    pub fn new(store: Arc<dyn IGraphStore>) -> Self {
        Self::with_config(store, ThresholdConfig::default())
    }

    pub fn with_config(store: Arc<dyn IGraphStore>, config: ThresholdConfig) -> Self {
        Self {
            store,
            config,
            thresholds: DashMap::new(),
        }
    }

    /// The user's current threshold, defaulting when never tuned.
    pub fn threshold(&self, user_id: &str) -> u32 {
        self.thresholds
            .get(user_id)
            .map(|t| *t)
            .unwrap_or(self.config.default_threshold)
    }

    /// Record a comparison outcome and maybe recalculate the threshold.
    ///
    /// Persistence is best-effort: a storage failure is logged and the
    /// recalculation proceeds over whatever outcomes are already stored.
    pub fn record_outcome(&self, user_id: &str, had_changes: bool) {
        if let Err(e) = self
            .store
            .record_outcome(&ThresholdOutcome::now(user_id, had_changes))
        {
            warn!(user_id = %user_id, error = %e, "failed to persist threshold outcome");
        }
        self.recalculate(user_id);
    }

    /// Pull the recent outcome window and adjust the threshold: a low
    /// change rate means comparisons rarely find anything (raise the
    /// threshold, compare less); a high rate means the learner is moving
    /// fast (lower it, compare more).
    fn recalculate(&self, user_id: &str) {
        let since = Utc::now() - Duration::days(self.config.window_days);
        let outcomes = match self
            .store
            .recent_outcomes(user_id, since, self.config.max_samples)
        {
            Ok(outcomes) => outcomes,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "failed to load outcome window");
                return;
            }
        };
        if outcomes.len() < self.config.min_samples {
            return;
        }

        let changed = outcomes.iter().filter(|o| o.had_changes).count();
        let change_rate = changed as f64 / outcomes.len() as f64;
        let current = self.threshold(user_id);

        let next = if change_rate < self.config.change_rate_low {
            (current + 1).min(self.config.max_threshold)
        } else if change_rate > self.config.change_rate_high {
            current
                .saturating_sub(1)
                .max(self.config.min_threshold)
        } else {
            current
        };

        if next != current {
            debug!(
                user_id = %user_id,
                change_rate = change_rate,
                from = current,
                to = next,
                "threshold recalculated"
            );
            self.thresholds.insert(user_id.to_string(), next);
        }
    }

    /// Read-only view for observability: current threshold, sample count,
    /// change rate. No side effects.
    pub fn statistics(&self, user_id: &str) -> ParallaxResult<ThresholdStatistics> {
        let since = Utc::now() - Duration::days(self.config.window_days);
        let outcomes = self
            .store
            .recent_outcomes(user_id, since, self.config.max_samples)?;
        let changed = outcomes.iter().filter(|o| o.had_changes).count();
        let change_rate = if outcomes.is_empty() {
            0.0
        } else {
            changed as f64 / outcomes.len() as f64
        };
        Ok(ThresholdStatistics {
            current_threshold: self.threshold(user_id),
            sample_count: outcomes.len(),
            change_rate,
        })
    }
}
