//! Connection management: one write connection behind a mutex.
//!
//! Read volume in this store never justified a reader pool — every caller
//! funnels through the writer, which also sidesteps the isolated-database
//! problem of in-memory SQLite read pools.

pub mod pragmas;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;

use parallax_core::errors::ParallaxResult;

use crate::to_storage_err;

/// The single guarded connection.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path) -> ParallaxResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        pragmas::apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> ParallaxResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        pragmas::apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run a closure against the connection, serialized by the mutex.
    pub fn with_conn_sync<F, T>(&self, f: F) -> ParallaxResult<T>
    where
        F: FnOnce(&Connection) -> ParallaxResult<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| to_storage_err("connection mutex poisoned"))?;
        f(&conn)
    }
}

/// Owns the writer and remembers where the database lives.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    pub fn open(path: &Path) -> ParallaxResult<Self> {
        Ok(Self {
            writer: WriteConnection::open(path)?,
            db_path: Some(path.to_path_buf()),
        })
    }

    pub fn open_in_memory() -> ParallaxResult<Self> {
        Ok(Self {
            writer: WriteConnection::open_in_memory()?,
            db_path: None,
        })
    }
}
