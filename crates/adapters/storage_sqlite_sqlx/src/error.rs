//! Storage-specific error type wrapping sqlx errors.

use devdepot_domain::error::DepotError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A conditional write found the row already changed by another writer.
    #[error("record was modified concurrently")]
    StaleWrite,
}

impl From<StorageError> for DepotError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
