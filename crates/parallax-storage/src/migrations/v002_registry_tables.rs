//! v002: topic_registry.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS topic_registry (
    id               TEXT PRIMARY KEY,
    canonical_label  TEXT NOT NULL,
    slug             TEXT NOT NULL,
    aliases          TEXT NOT NULL DEFAULT '[]',
    scope_type       TEXT NOT NULL,
    scope_id         TEXT NOT NULL DEFAULT '',
    status           TEXT NOT NULL,
    confidence       REAL NOT NULL,
    stats            TEXT NOT NULL DEFAULT '{}',
    created_at       TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_registry_slug ON topic_registry(slug);
CREATE INDEX IF NOT EXISTS idx_registry_scope_status ON topic_registry(scope_type, status);
";
