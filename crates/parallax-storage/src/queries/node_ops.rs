//! Insert, update, and find operations for topic_nodes.

use rusqlite::{params, Connection, OptionalExtension, Row};

use parallax_core::errors::ParallaxResult;
use parallax_core::graph::{Confidence, NodeSource, TopicNode};

use super::util::parse_ts;
use crate::{to_decode_err, to_storage_err};

const NODE_COLUMNS: &str =
    "id, graph_id, canonical_label, slug, aliases, confidence, source, last_reinforced_at, attributes";

pub fn insert_node(conn: &Connection, node: &TopicNode) -> ParallaxResult<()> {
    let aliases_json = serde_json::to_string(&node.aliases)?;
    let attributes_json = serde_json::to_string(&node.attributes)?;
    conn.execute(
        "INSERT INTO topic_nodes (
            id, graph_id, canonical_label, slug, aliases, confidence, source,
            last_reinforced_at, attributes
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            node.id,
            node.graph_id,
            node.canonical_label,
            node.slug,
            aliases_json,
            node.confidence.value(),
            node.source.as_str(),
            node.last_reinforced_at.to_rfc3339(),
            attributes_json,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn update_node(conn: &Connection, node: &TopicNode) -> ParallaxResult<()> {
    let aliases_json = serde_json::to_string(&node.aliases)?;
    let attributes_json = serde_json::to_string(&node.attributes)?;
    conn.execute(
        "UPDATE topic_nodes SET
            canonical_label = ?2, slug = ?3, aliases = ?4, confidence = ?5,
            source = ?6, last_reinforced_at = ?7, attributes = ?8
         WHERE id = ?1",
        params![
            node.id,
            node.canonical_label,
            node.slug,
            aliases_json,
            node.confidence.value(),
            node.source.as_str(),
            node.last_reinforced_at.to_rfc3339(),
            attributes_json,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_node(conn: &Connection, id: &str) -> ParallaxResult<Option<TopicNode>> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {NODE_COLUMNS} FROM topic_nodes WHERE id = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    stmt.query_row(params![id], |row| Ok(row_to_node(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .transpose()
}

pub fn find_by_slug(
    conn: &Connection,
    graph_id: &str,
    slug: &str,
) -> ParallaxResult<Option<TopicNode>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {NODE_COLUMNS} FROM topic_nodes WHERE graph_id = ?1 AND slug = ?2"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    stmt.query_row(params![graph_id, slug], |row| Ok(row_to_node(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .transpose()
}

pub fn nodes_in_graph(conn: &Connection, graph_id: &str) -> ParallaxResult<Vec<TopicNode>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {NODE_COLUMNS} FROM topic_nodes WHERE graph_id = ?1 ORDER BY rowid"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![graph_id], |row| Ok(row_to_node(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut nodes = Vec::new();
    for row in rows {
        nodes.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(nodes)
}

fn row_to_node(row: &Row<'_>) -> ParallaxResult<TopicNode> {
    let aliases_json: String = row.get(4).map_err(|e| to_storage_err(e.to_string()))?;
    let confidence: f64 = row.get(5).map_err(|e| to_storage_err(e.to_string()))?;
    let source_s: String = row.get(6).map_err(|e| to_storage_err(e.to_string()))?;
    let reinforced_s: String = row.get(7).map_err(|e| to_storage_err(e.to_string()))?;
    let attributes_json: String = row.get(8).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(TopicNode {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        graph_id: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        canonical_label: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        slug: row.get(3).map_err(|e| to_storage_err(e.to_string()))?,
        aliases: serde_json::from_str(&aliases_json)?,
        confidence: Confidence::new(confidence),
        source: NodeSource::from_str_name(&source_s)
            .ok_or_else(|| to_decode_err(format!("unknown node source {source_s:?}")))?,
        last_reinforced_at: parse_ts(&reinforced_s)?,
        attributes: serde_json::from_str(&attributes_json)?,
    })
}
