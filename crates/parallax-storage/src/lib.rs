//! # parallax-storage
//!
//! SQLite-backed implementation of `IGraphStore`: a single guarded write
//! connection, `PRAGMA user_version` migrations, and per-entity query
//! modules. JSON columns carry aliases, attributes, rationale, and diff
//! payloads.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use parallax_core::errors::{ParallaxError, StorageError};

/// Wrap a low-level SQLite failure message.
pub(crate) fn to_storage_err(message: impl Into<String>) -> ParallaxError {
    StorageError::SqliteError {
        message: message.into(),
    }
    .into()
}

/// Wrap a row-decode failure (bad enum name, malformed JSON column).
pub(crate) fn to_decode_err(details: impl Into<String>) -> ParallaxError {
    StorageError::DecodeFailed {
        details: details.into(),
    }
    .into()
}
