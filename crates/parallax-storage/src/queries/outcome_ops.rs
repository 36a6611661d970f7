//! Append and window queries for threshold_outcomes.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use parallax_core::errors::ParallaxResult;
use parallax_core::models::ThresholdOutcome;

use super::util::parse_ts;
use crate::to_storage_err;

pub fn insert_outcome(conn: &Connection, outcome: &ThresholdOutcome) -> ParallaxResult<()> {
    conn.execute(
        "INSERT INTO threshold_outcomes (user_id, had_changes, recorded_at)
         VALUES (?1, ?2, ?3)",
        params![
            outcome.user_id,
            outcome.had_changes as i32,
            outcome.recorded_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Most recent outcomes since `since`, newest first, capped at `limit`.
pub fn recent_outcomes(
    conn: &Connection,
    user_id: &str,
    since: DateTime<Utc>,
    limit: usize,
) -> ParallaxResult<Vec<ThresholdOutcome>> {
    let sql = format!(
        "SELECT user_id, had_changes, recorded_at FROM threshold_outcomes
         WHERE user_id = ?1 AND recorded_at >= ?2
         ORDER BY recorded_at DESC, id DESC
         LIMIT {limit}"
    );
    let mut stmt = conn
        .prepare_cached(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![user_id, since.to_rfc3339()], |row| {
            let user_id: String = row.get(0)?;
            let had_changes: i32 = row.get(1)?;
            let recorded_s: String = row.get(2)?;
            Ok((user_id, had_changes, recorded_s))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut outcomes = Vec::new();
    for row in rows {
        let (user_id, had_changes, recorded_s) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        outcomes.push(ThresholdOutcome {
            user_id,
            had_changes: had_changes != 0,
            recorded_at: parse_ts(&recorded_s)?,
        });
    }
    Ok(outcomes)
}
