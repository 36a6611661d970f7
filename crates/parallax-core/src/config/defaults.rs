//! Default values shared by the config structs.

/// Adaptive threshold bounds and default.
pub const DEFAULT_THRESHOLD: u32 = 5;
pub const MIN_THRESHOLD: u32 = 3;
pub const MAX_THRESHOLD: u32 = 10;

/// Outcome window for threshold recalculation.
pub const OUTCOME_WINDOW_DAYS: i64 = 30;
pub const OUTCOME_MAX_SAMPLES: usize = 50;
pub const OUTCOME_MIN_SAMPLES: usize = 10;

/// Change-rate bands: below the low rate the threshold rises, above the
/// high rate it falls.
pub const CHANGE_RATE_LOW: f64 = 0.30;
pub const CHANGE_RATE_HIGH: f64 = 0.70;

/// Cache TTLs per keyspace.
pub const EDGE_DECISION_TTL_SECS: u64 = 30 * 24 * 3600;
pub const DIFF_RESOLUTION_TTL_SECS: u64 = 7 * 24 * 3600;
pub const VISUALIZATION_TTL_SECS: u64 = 5 * 60;

/// Activity-counter cleanup cadence (daily).
pub const CLEANUP_INTERVAL_SECS: u64 = 24 * 3600;
