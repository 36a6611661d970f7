//! PRAGMA configuration applied to the connection.
//!
//! WAL mode, NORMAL sync, 5s busy_timeout, foreign_keys ON.

use rusqlite::Connection;

use parallax_core::errors::ParallaxResult;

use crate::to_storage_err;

/// Apply all performance and safety pragmas to a connection.
/// WAL only applies to file-backed databases; in-memory connections
/// report `memory` and that is fine.
pub fn apply_pragmas(conn: &Connection) -> ParallaxResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .map_err(|e| to_storage_err(format!("failed to apply pragmas: {e}")))?;
    Ok(())
}

/// Verify that WAL mode is active on a file-backed connection.
pub fn verify_wal_mode(conn: &Connection) -> ParallaxResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
