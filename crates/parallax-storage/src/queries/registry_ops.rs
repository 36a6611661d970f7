//! Insert and match operations for topic_registry.
//!
//! Matching prefilters by slug equality in SQL, then falls back to an
//! alias-set intersection evaluated in Rust over the JSON alias column —
//! the store primitive stays simple and the semantics live in one place.

use rusqlite::{params, Connection, OptionalExtension, Row};

use parallax_core::errors::ParallaxResult;
use parallax_core::graph::{Confidence, GraphScope, ScopeType};
use parallax_core::models::{RegistryEntry, RegistryStatus};

use super::util::parse_ts;
use crate::{to_decode_err, to_storage_err};

const REGISTRY_COLUMNS: &str =
    "id, canonical_label, slug, aliases, scope_type, scope_id, status, confidence, stats, created_at";

pub fn insert_entry(conn: &Connection, entry: &RegistryEntry) -> ParallaxResult<()> {
    let aliases_json = serde_json::to_string(&entry.aliases)?;
    let stats_json = serde_json::to_string(&entry.stats)?;
    conn.execute(
        "INSERT INTO topic_registry (
            id, canonical_label, slug, aliases, scope_type, scope_id, status,
            confidence, stats, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            entry.id,
            entry.canonical_label,
            entry.slug,
            aliases_json,
            entry.scope.scope_type.as_str(),
            entry.scope.scope_id,
            entry.status.as_str(),
            entry.confidence.value(),
            stats_json,
            entry.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// First entry at (scope_type, status) whose slug or alias set intersects
/// `terms`.
pub fn find_matching(
    conn: &Connection,
    scope_type: ScopeType,
    status: RegistryStatus,
    terms: &[String],
) -> ParallaxResult<Option<RegistryEntry>> {
    if terms.is_empty() {
        return Ok(None);
    }

    // Fast path: direct slug hit.
    for term in terms {
        let mut stmt = conn
            .prepare_cached(&format!(
                "SELECT {REGISTRY_COLUMNS} FROM topic_registry
                 WHERE scope_type = ?1 AND status = ?2 AND slug = ?3
                 ORDER BY created_at LIMIT 1"
            ))
            .map_err(|e| to_storage_err(e.to_string()))?;
        let hit = stmt
            .query_row(
                params![scope_type.as_str(), status.as_str(), term],
                |row| Ok(row_to_entry(row)),
            )
            .optional()
            .map_err(|e| to_storage_err(e.to_string()))?
            .transpose()?;
        if hit.is_some() {
            return Ok(hit);
        }
    }

    // Slow path: alias intersection over the candidate set.
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {REGISTRY_COLUMNS} FROM topic_registry
             WHERE scope_type = ?1 AND status = ?2 ORDER BY created_at"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![scope_type.as_str(), status.as_str()], |row| {
            Ok(row_to_entry(row))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    for row in rows {
        let entry = row.map_err(|e| to_storage_err(e.to_string()))??;
        if entry.matches_terms(terms) {
            return Ok(Some(entry));
        }
    }
    Ok(None)
}

fn row_to_entry(row: &Row<'_>) -> ParallaxResult<RegistryEntry> {
    let aliases_json: String = row.get(3).map_err(|e| to_storage_err(e.to_string()))?;
    let scope_type_s: String = row.get(4).map_err(|e| to_storage_err(e.to_string()))?;
    let status_s: String = row.get(6).map_err(|e| to_storage_err(e.to_string()))?;
    let confidence: f64 = row.get(7).map_err(|e| to_storage_err(e.to_string()))?;
    let stats_json: String = row.get(8).map_err(|e| to_storage_err(e.to_string()))?;
    let created_s: String = row.get(9).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(RegistryEntry {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        canonical_label: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        slug: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        aliases: serde_json::from_str(&aliases_json)?,
        scope: GraphScope {
            scope_type: ScopeType::from_str_name(&scope_type_s)
                .ok_or_else(|| to_decode_err(format!("unknown scope type {scope_type_s:?}")))?,
            scope_id: row.get(5).map_err(|e| to_storage_err(e.to_string()))?,
        },
        status: RegistryStatus::from_str_name(&status_s)
            .ok_or_else(|| to_decode_err(format!("unknown registry status {status_s:?}")))?,
        confidence: Confidence::new(confidence),
        stats: serde_json::from_str(&stats_json)?,
        created_at: parse_ts(&created_s)?,
    })
}
