//! Storage error types.

/// Errors from the BIN record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database query or connection failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Update targeted a record id that does not exist
    #[error("record {id} not found")]
    NotFound { id: i32 },
}
