//! Append and count-by-node aggregation for node_annotations.

use std::collections::HashMap;

use rusqlite::{params, Connection};

use parallax_core::errors::ParallaxResult;

use crate::to_storage_err;

pub fn insert_annotation(
    conn: &Connection,
    user_id: &str,
    content_id: &str,
    node_id: &str,
) -> ParallaxResult<()> {
    conn.execute(
        "INSERT INTO node_annotations (user_id, content_id, node_id) VALUES (?1, ?2, ?3)",
        params![user_id, content_id, node_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Annotation counts per node id for a (user, content) pair.
pub fn counts_by_node(
    conn: &Connection,
    user_id: &str,
    content_id: &str,
) -> ParallaxResult<HashMap<String, u64>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT node_id, COUNT(*) FROM node_annotations
             WHERE user_id = ?1 AND content_id = ?2
             GROUP BY node_id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![user_id, content_id], |row| {
            let node_id: String = row.get(0)?;
            let count: u64 = row.get(1)?;
            Ok((node_id, count))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut counts = HashMap::new();
    for row in rows {
        let (node_id, count) = row.map_err(|e| to_storage_err(e.to_string()))?;
        counts.insert(node_id, count);
    }
    Ok(counts)
}
