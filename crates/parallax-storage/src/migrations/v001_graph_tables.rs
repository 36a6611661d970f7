//! v001: topic_graphs, topic_nodes, topic_edges, edge_evidence.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS topic_graphs (
    id                TEXT PRIMARY KEY,
    kind              TEXT NOT NULL,
    scope_type        TEXT NOT NULL,
    scope_id          TEXT NOT NULL DEFAULT '',
    content_id        TEXT,
    user_id           TEXT,
    created_at        TEXT NOT NULL,
    last_compared_at  TEXT
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_graphs_baseline_identity
    ON topic_graphs(content_id, scope_type, scope_id) WHERE kind = 'BASELINE';
CREATE UNIQUE INDEX IF NOT EXISTS idx_graphs_learner_identity
    ON topic_graphs(user_id, content_id) WHERE kind = 'LEARNER';
CREATE INDEX IF NOT EXISTS idx_graphs_kind ON topic_graphs(kind);

CREATE TABLE IF NOT EXISTS topic_nodes (
    id                  TEXT PRIMARY KEY,
    graph_id            TEXT NOT NULL REFERENCES topic_graphs(id) ON DELETE CASCADE,
    canonical_label     TEXT NOT NULL,
    slug                TEXT NOT NULL,
    aliases             TEXT NOT NULL DEFAULT '[]',
    confidence          REAL NOT NULL,
    source              TEXT NOT NULL,
    last_reinforced_at  TEXT NOT NULL,
    attributes          TEXT NOT NULL DEFAULT '{}'
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_nodes_graph_slug ON topic_nodes(graph_id, slug);
CREATE INDEX IF NOT EXISTS idx_nodes_slug ON topic_nodes(slug);

CREATE TABLE IF NOT EXISTS topic_edges (
    id          TEXT PRIMARY KEY,
    graph_id    TEXT NOT NULL REFERENCES topic_graphs(id) ON DELETE CASCADE,
    from_node   TEXT NOT NULL,
    to_node     TEXT NOT NULL,
    edge_type   TEXT NOT NULL,
    confidence  REAL NOT NULL,
    source      TEXT NOT NULL,
    rationale   TEXT NOT NULL DEFAULT 'null',
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_edges_graph ON topic_edges(graph_id);
CREATE INDEX IF NOT EXISTS idx_edges_signature
    ON topic_edges(graph_id, from_node, to_node, edge_type);

CREATE TABLE IF NOT EXISTS edge_evidence (
    id                   TEXT PRIMARY KEY,
    edge_id              TEXT NOT NULL REFERENCES topic_edges(id) ON DELETE CASCADE,
    evidence_type        TEXT NOT NULL,
    source_highlight_id  TEXT,
    source_note_id       TEXT,
    page                 INTEGER,
    timestamp_ref        TEXT,
    excerpt              TEXT,
    created_at           TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_evidence_edge ON edge_evidence(edge_id);
";
