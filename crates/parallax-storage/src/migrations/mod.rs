//! Schema migrations using PRAGMA user_version.

pub mod v001_graph_tables;
pub mod v002_registry_tables;
pub mod v003_diff_tables;
pub mod v004_outcome_tables;

use rusqlite::Connection;

use parallax_core::errors::{ParallaxError, StorageError};
use parallax_core::ParallaxResult;

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> ParallaxResult<()> {
    let current_version: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| migration_err(0, e.to_string()))?;

    let migrations: &[(&str, u32)] = &[
        (v001_graph_tables::MIGRATION_SQL, 1),
        (v002_registry_tables::MIGRATION_SQL, 2),
        (v003_diff_tables::MIGRATION_SQL, 3),
        (v004_outcome_tables::MIGRATION_SQL, 4),
    ];

    for (sql, version) in migrations {
        if current_version < *version {
            conn.execute_batch(sql)
                .map_err(|e| migration_err(*version, e.to_string()))?;
            conn.pragma_update(None, "user_version", version)
                .map_err(|e| migration_err(*version, e.to_string()))?;
            tracing::info!(version = version, "applied migration");
        }
    }

    Ok(())
}

fn migration_err(version: u32, message: String) -> ParallaxError {
    StorageError::MigrationFailed { version, message }.into()
}
