//! Upsert and read operations for graph_diffs.

use rusqlite::{params, Connection, OptionalExtension, Row};

use parallax_core::errors::ParallaxResult;
use parallax_core::models::GraphDiff;

use super::util::parse_ts;
use crate::to_storage_err;

/// Replace any existing diff for (user_id, content_id) with this one.
pub fn replace_diff(conn: &Connection, diff: &GraphDiff) -> ParallaxResult<()> {
    let payload_json = serde_json::to_string(&diff.payload)?;
    let summary_json = serde_json::to_string(&diff.summary)?;
    conn.execute(
        "INSERT OR REPLACE INTO graph_diffs (
            id, user_id, content_id, baseline_graph_id, learner_graph_id,
            payload, summary, computed_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            diff.id,
            diff.user_id,
            diff.content_id,
            diff.baseline_graph_id,
            diff.learner_graph_id,
            payload_json,
            summary_json,
            diff.computed_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Most recent diff for a user, optionally scoped to one content item.
pub fn latest_diff(
    conn: &Connection,
    user_id: &str,
    content_id: Option<&str>,
) -> ParallaxResult<Option<GraphDiff>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, user_id, content_id, baseline_graph_id, learner_graph_id,
                    payload, summary, computed_at
             FROM graph_diffs
             WHERE user_id = ?1 AND (?2 IS NULL OR content_id = ?2)
             ORDER BY computed_at DESC LIMIT 1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    stmt.query_row(params![user_id, content_id], |row| Ok(row_to_diff(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .transpose()
}

fn row_to_diff(row: &Row<'_>) -> ParallaxResult<GraphDiff> {
    let payload_json: String = row.get(5).map_err(|e| to_storage_err(e.to_string()))?;
    let summary_json: String = row.get(6).map_err(|e| to_storage_err(e.to_string()))?;
    let computed_s: String = row.get(7).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(GraphDiff {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        user_id: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        content_id: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        baseline_graph_id: row.get(3).map_err(|e| to_storage_err(e.to_string()))?,
        learner_graph_id: row.get(4).map_err(|e| to_storage_err(e.to_string()))?,
        payload: serde_json::from_str(&payload_json)?,
        summary: serde_json::from_str(&summary_json)?,
        computed_at: parse_ts(&computed_s)?,
    })
}
