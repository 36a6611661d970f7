//! Insert and find operations for topic_graphs.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use parallax_core::errors::ParallaxResult;
use parallax_core::graph::{GraphKind, GraphScope, ScopeType, TopicGraph};

use super::util::{parse_opt_ts, parse_ts};
use crate::{to_decode_err, to_storage_err};

const GRAPH_COLUMNS: &str =
    "id, kind, scope_type, scope_id, content_id, user_id, created_at, last_compared_at";

pub fn insert_graph(conn: &Connection, graph: &TopicGraph) -> ParallaxResult<()> {
    conn.execute(
        "INSERT INTO topic_graphs (
            id, kind, scope_type, scope_id, content_id, user_id, created_at, last_compared_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            graph.id,
            graph.kind.as_str(),
            graph.scope.scope_type.as_str(),
            graph.scope.scope_id,
            graph.content_id,
            graph.user_id,
            graph.created_at.to_rfc3339(),
            graph.last_compared_at.map(|t| t.to_rfc3339()),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_graph(conn: &Connection, id: &str) -> ParallaxResult<Option<TopicGraph>> {
    find_one(
        conn,
        &format!("SELECT {GRAPH_COLUMNS} FROM topic_graphs WHERE id = ?1"),
        params![id],
    )
}

pub fn find_baseline(
    conn: &Connection,
    content_id: &str,
    scope: &GraphScope,
) -> ParallaxResult<Option<TopicGraph>> {
    find_one(
        conn,
        &format!(
            "SELECT {GRAPH_COLUMNS} FROM topic_graphs
             WHERE kind = 'BASELINE' AND content_id = ?1 AND scope_type = ?2 AND scope_id = ?3"
        ),
        params![content_id, scope.scope_type.as_str(), scope.scope_id],
    )
}

pub fn find_any_baseline(conn: &Connection, content_id: &str) -> ParallaxResult<Option<TopicGraph>> {
    find_one(
        conn,
        &format!(
            "SELECT {GRAPH_COLUMNS} FROM topic_graphs
             WHERE kind = 'BASELINE' AND content_id = ?1
             ORDER BY created_at LIMIT 1"
        ),
        params![content_id],
    )
}

pub fn find_learner(
    conn: &Connection,
    user_id: &str,
    content_id: &str,
) -> ParallaxResult<Option<TopicGraph>> {
    find_one(
        conn,
        &format!(
            "SELECT {GRAPH_COLUMNS} FROM topic_graphs
             WHERE kind = 'LEARNER' AND user_id = ?1 AND content_id = ?2"
        ),
        params![user_id, content_id],
    )
}

pub fn find_global(conn: &Connection) -> ParallaxResult<Option<TopicGraph>> {
    find_one(
        conn,
        &format!(
            "SELECT {GRAPH_COLUMNS} FROM topic_graphs
             WHERE kind = 'CURATED' AND scope_type = 'GLOBAL'
             ORDER BY created_at LIMIT 1"
        ),
        params![],
    )
}

pub fn set_last_compared_at(
    conn: &Connection,
    graph_id: &str,
    at: DateTime<Utc>,
) -> ParallaxResult<()> {
    conn.execute(
        "UPDATE topic_graphs SET last_compared_at = ?2 WHERE id = ?1",
        params![graph_id, at.to_rfc3339()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// BASELINE graphs containing a node with this slug, oldest first.
pub fn baseline_graphs_with_slug(
    conn: &Connection,
    slug: &str,
    exclude_content_id: Option<&str>,
    limit: usize,
) -> ParallaxResult<Vec<TopicGraph>> {
    let sql = format!(
        "SELECT DISTINCT g.id, g.kind, g.scope_type, g.scope_id, g.content_id, g.user_id,
                g.created_at, g.last_compared_at
         FROM topic_graphs g
         JOIN topic_nodes n ON n.graph_id = g.id
         WHERE g.kind = 'BASELINE' AND n.slug = ?1
           AND (?2 IS NULL OR g.content_id <> ?2)
         ORDER BY g.created_at
         LIMIT {limit}"
    );
    let mut stmt = conn
        .prepare_cached(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![slug, exclude_content_id], |row| Ok(row_to_graph(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut graphs = Vec::new();
    for row in rows {
        graphs.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(graphs)
}

fn find_one(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> ParallaxResult<Option<TopicGraph>> {
    let mut stmt = conn
        .prepare_cached(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let result = stmt
        .query_row(params, |row| Ok(row_to_graph(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    result.transpose()
}

fn row_to_graph(row: &Row<'_>) -> ParallaxResult<TopicGraph> {
    let kind_s: String = row.get(1).map_err(|e| to_storage_err(e.to_string()))?;
    let scope_type_s: String = row.get(2).map_err(|e| to_storage_err(e.to_string()))?;
    let created_at_s: String = row.get(6).map_err(|e| to_storage_err(e.to_string()))?;
    let compared_s: Option<String> = row.get(7).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(TopicGraph {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        kind: GraphKind::from_str_name(&kind_s)
            .ok_or_else(|| to_decode_err(format!("unknown graph kind {kind_s:?}")))?,
        scope: GraphScope {
            scope_type: ScopeType::from_str_name(&scope_type_s)
                .ok_or_else(|| to_decode_err(format!("unknown scope type {scope_type_s:?}")))?,
            scope_id: row.get(3).map_err(|e| to_storage_err(e.to_string()))?,
        },
        content_id: row.get(4).map_err(|e| to_storage_err(e.to_string()))?,
        user_id: row.get(5).map_err(|e| to_storage_err(e.to_string()))?,
        created_at: parse_ts(&created_at_s)?,
        last_compared_at: parse_opt_ts(compared_s)?,
    })
}
