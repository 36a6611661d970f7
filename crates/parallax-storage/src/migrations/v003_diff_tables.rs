//! v003: graph_diffs, keyed by (user_id, content_id) — recomputation
//! replaces the previous row.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS graph_diffs (
    id                 TEXT NOT NULL,
    user_id            TEXT NOT NULL,
    content_id         TEXT NOT NULL,
    baseline_graph_id  TEXT NOT NULL,
    learner_graph_id   TEXT NOT NULL,
    payload            TEXT NOT NULL,
    summary            TEXT NOT NULL,
    computed_at        TEXT NOT NULL,
    PRIMARY KEY (user_id, content_id)
);

CREATE INDEX IF NOT EXISTS idx_diffs_user_time ON graph_diffs(user_id, computed_at);
";
