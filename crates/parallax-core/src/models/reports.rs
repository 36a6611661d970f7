use serde::{Deserialize, Serialize};

/// Result of a baseline build. `warnings` carries best-effort failures
/// (registry linking, cache consults) that did not fail the build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildReport {
    pub graph_id: String,
    pub nodes_created: usize,
    pub edges_created: usize,
    pub nodes_total: usize,
    /// Registry linking counters, when linking ran.
    pub linked: usize,
    pub candidates_created: usize,
    pub warnings: Vec<String>,
}

/// Registry linking counters, for observability.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LinkReport {
    pub matched: usize,
    pub candidates_created: usize,
}

/// Result of ingesting one learner event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventReceipt {
    /// Learner graph the event landed on. Empty when the event was a no-op.
    pub graph_id: String,
    pub nodes_touched: usize,
    pub edges_touched: usize,
    pub warnings: Vec<String>,
}

impl EventReceipt {
    /// Receipt for an event that was dropped (unknown kind).
    pub fn noop(warning: impl Into<String>) -> Self {
        Self {
            warnings: vec![warning.into()],
            ..Default::default()
        }
    }
}
