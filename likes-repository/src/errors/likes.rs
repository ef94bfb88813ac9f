//! Error types for the likes repository.
//! Defines specific errors that can occur during database operations on the
//! ledger and tally tables.
use thiserror::Error;

/// Represents errors that can occur within the likes repository.
#[derive(Debug, Error)]
pub enum LikesRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}
