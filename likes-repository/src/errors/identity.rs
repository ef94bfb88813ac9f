//! Error types for the identity repository.
use thiserror::Error;

/// Represents errors that can occur within the identity repository.
#[derive(Debug, Error)]
pub enum IdentityRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}
