//! Error taxonomy: NotFound surfaces to callers, Validation rejects before
//! processing, storage/cache/serialization wrap their layers. Best-effort
//! paths (registry linking, outcome recording, cache ops) log and report
//! warnings instead of returning these.

mod compare_error;
mod storage_error;

pub use compare_error::CompareError;
pub use storage_error::StorageError;

/// Top-level error for the Parallax engine.
#[derive(Debug, thiserror::Error)]
pub enum ParallaxError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Compare(#[from] CompareError),

    #[error("validation failed: {reason}")]
    Validation { reason: String },

    #[error("cache error: {reason}")]
    Cache { reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {reason}")]
    Config { reason: String },
}

impl ParallaxError {
    /// Shorthand for a validation rejection.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}

pub type ParallaxResult<T> = Result<T, ParallaxError>;
