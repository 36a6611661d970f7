/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("constraint violated: {details}")]
    ConstraintViolated { details: String },

    #[error("row decode failed: {details}")]
    DecodeFailed { details: String },
}
