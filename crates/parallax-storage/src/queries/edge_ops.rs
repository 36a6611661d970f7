//! Insert, update, and find operations for topic_edges and edge_evidence.
//! Edges load with their evidence attached.

use rusqlite::{params, Connection, OptionalExtension, Row};

use parallax_core::errors::ParallaxResult;
use parallax_core::graph::{
    Confidence, EdgeType, EvidenceType, NodeSource, TopicEdge, TopicEdgeEvidence,
};

use super::util::parse_ts;
use crate::{to_decode_err, to_storage_err};

const EDGE_COLUMNS: &str =
    "id, graph_id, from_node, to_node, edge_type, confidence, source, rationale, created_at";

pub fn insert_edge(conn: &Connection, edge: &TopicEdge) -> ParallaxResult<()> {
    let rationale_json = serde_json::to_string(&edge.rationale)?;
    conn.execute(
        "INSERT INTO topic_edges (
            id, graph_id, from_node, to_node, edge_type, confidence, source,
            rationale, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            edge.id,
            edge.graph_id,
            edge.from_node,
            edge.to_node,
            edge.edge_type.as_str(),
            edge.confidence.value(),
            edge.source.as_str(),
            rationale_json,
            edge.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    // Evidence attached at creation goes in the same call.
    for evidence in &edge.evidence {
        insert_evidence(conn, evidence)?;
    }
    Ok(())
}

pub fn update_edge(conn: &Connection, edge: &TopicEdge) -> ParallaxResult<()> {
    let rationale_json = serde_json::to_string(&edge.rationale)?;
    conn.execute(
        "UPDATE topic_edges SET edge_type = ?2, confidence = ?3, rationale = ?4 WHERE id = ?1",
        params![
            edge.id,
            edge.edge_type.as_str(),
            edge.confidence.value(),
            rationale_json,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn insert_evidence(conn: &Connection, evidence: &TopicEdgeEvidence) -> ParallaxResult<()> {
    conn.execute(
        "INSERT INTO edge_evidence (
            id, edge_id, evidence_type, source_highlight_id, source_note_id,
            page, timestamp_ref, excerpt, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            evidence.id,
            evidence.edge_id,
            evidence.evidence_type.as_str(),
            evidence.source_highlight_id,
            evidence.source_note_id,
            evidence.page,
            evidence.timestamp_ref,
            evidence.excerpt,
            evidence.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn find_edge(
    conn: &Connection,
    graph_id: &str,
    from_node: &str,
    to_node: &str,
    edge_type: EdgeType,
) -> ParallaxResult<Option<TopicEdge>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {EDGE_COLUMNS} FROM topic_edges
             WHERE graph_id = ?1 AND from_node = ?2 AND to_node = ?3 AND edge_type = ?4"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let edge = stmt
        .query_row(
            params![graph_id, from_node, to_node, edge_type.as_str()],
            |row| Ok(row_to_edge(row)),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .transpose()?;
    attach_evidence_opt(conn, edge)
}

/// Most recently created edge in a graph, doubt markers included.
pub fn most_recent_edge(conn: &Connection, graph_id: &str) -> ParallaxResult<Option<TopicEdge>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {EDGE_COLUMNS} FROM topic_edges
             WHERE graph_id = ?1 ORDER BY created_at DESC, rowid DESC LIMIT 1"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let edge = stmt
        .query_row(params![graph_id], |row| Ok(row_to_edge(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .transpose()?;
    attach_evidence_opt(conn, edge)
}

pub fn edges_in_graph(conn: &Connection, graph_id: &str) -> ParallaxResult<Vec<TopicEdge>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {EDGE_COLUMNS} FROM topic_edges WHERE graph_id = ?1 ORDER BY rowid"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![graph_id], |row| Ok(row_to_edge(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut edges = Vec::new();
    for row in rows {
        let mut edge = row.map_err(|e| to_storage_err(e.to_string()))??;
        edge.evidence = evidence_for_edge(conn, &edge.id)?;
        edges.push(edge);
    }
    Ok(edges)
}

/// Prerequisite slugs from the CURATED/GLOBAL graph: sources of
/// PREREQUISITE edges targeting a node with this slug. Doubt markers
/// (self-loops) are not priors.
pub fn prerequisite_priors(
    conn: &Connection,
    slug: &str,
    limit: usize,
) -> ParallaxResult<Vec<String>> {
    let sql = format!(
        "SELECT nf.slug
         FROM topic_graphs g
         JOIN topic_edges e ON e.graph_id = g.id
         JOIN topic_nodes nt ON nt.id = e.to_node
         JOIN topic_nodes nf ON nf.id = e.from_node
         WHERE g.kind = 'CURATED' AND g.scope_type = 'GLOBAL'
           AND e.edge_type = 'PREREQUISITE' AND e.from_node <> e.to_node
           AND nt.slug = ?1
         ORDER BY e.confidence DESC
         LIMIT {limit}"
    );
    let mut stmt = conn
        .prepare_cached(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![slug], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut slugs = Vec::new();
    for row in rows {
        slugs.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(slugs)
}

fn evidence_for_edge(conn: &Connection, edge_id: &str) -> ParallaxResult<Vec<TopicEdgeEvidence>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, edge_id, evidence_type, source_highlight_id, source_note_id,
                    page, timestamp_ref, excerpt, created_at
             FROM edge_evidence WHERE edge_id = ?1 ORDER BY rowid",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![edge_id], |row| Ok(row_to_evidence(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut evidence = Vec::new();
    for row in rows {
        evidence.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(evidence)
}

fn attach_evidence_opt(
    conn: &Connection,
    edge: Option<TopicEdge>,
) -> ParallaxResult<Option<TopicEdge>> {
    match edge {
        Some(mut edge) => {
            edge.evidence = evidence_for_edge(conn, &edge.id)?;
            Ok(Some(edge))
        }
        None => Ok(None),
    }
}

fn row_to_edge(row: &Row<'_>) -> ParallaxResult<TopicEdge> {
    let edge_type_s: String = row.get(4).map_err(|e| to_storage_err(e.to_string()))?;
    let confidence: f64 = row.get(5).map_err(|e| to_storage_err(e.to_string()))?;
    let source_s: String = row.get(6).map_err(|e| to_storage_err(e.to_string()))?;
    let rationale_json: String = row.get(7).map_err(|e| to_storage_err(e.to_string()))?;
    let created_s: String = row.get(8).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(TopicEdge {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        graph_id: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        from_node: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        to_node: row.get(3).map_err(|e| to_storage_err(e.to_string()))?,
        edge_type: EdgeType::from_str_name(&edge_type_s)
            .ok_or_else(|| to_decode_err(format!("unknown edge type {edge_type_s:?}")))?,
        confidence: Confidence::new(confidence),
        source: NodeSource::from_str_name(&source_s)
            .ok_or_else(|| to_decode_err(format!("unknown edge source {source_s:?}")))?,
        rationale: serde_json::from_str(&rationale_json)?,
        created_at: parse_ts(&created_s)?,
        evidence: Vec::new(),
    })
}

fn row_to_evidence(row: &Row<'_>) -> ParallaxResult<TopicEdgeEvidence> {
    let type_s: String = row.get(2).map_err(|e| to_storage_err(e.to_string()))?;
    let created_s: String = row.get(8).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(TopicEdgeEvidence {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        edge_id: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        evidence_type: EvidenceType::from_str_name(&type_s)
            .ok_or_else(|| to_decode_err(format!("unknown evidence type {type_s:?}")))?,
        source_highlight_id: row.get(3).map_err(|e| to_storage_err(e.to_string()))?,
        source_note_id: row.get(4).map_err(|e| to_storage_err(e.to_string()))?,
        page: row.get(5).map_err(|e| to_storage_err(e.to_string()))?,
        timestamp_ref: row.get(6).map_err(|e| to_storage_err(e.to_string()))?,
        excerpt: row.get(7).map_err(|e| to_storage_err(e.to_string()))?,
        created_at: parse_ts(&created_s)?,
    })
}
