//! v004: threshold_outcomes, node_annotations.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS threshold_outcomes (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id      TEXT NOT NULL,
    had_changes  INTEGER NOT NULL,
    recorded_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_outcomes_user_time ON threshold_outcomes(user_id, recorded_at);

CREATE TABLE IF NOT EXISTS node_annotations (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     TEXT NOT NULL,
    content_id  TEXT NOT NULL,
    node_id     TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_annotations_user_content ON node_annotations(user_id, content_id);
";
