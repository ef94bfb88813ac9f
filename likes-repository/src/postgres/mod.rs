//! PostgreSQL implementations of the likes and identity repositories.
mod identity_repository;
mod likes_repository;

pub use identity_repository::PostgresIdentityRepository;
pub use likes_repository::PostgresLikesRepository;

use crate::errors::LikesRepositoryError;

/// Applies the embedded schema migrations to the given pool.
///
/// Safe to call on every startup; already-applied migrations are skipped.
pub async fn migrate(pool: &sqlx::PgPool) -> Result<(), LikesRepositoryError> {
    sqlx::migrate!("src/postgres/migrations").run(pool).await?;
    Ok(())
}
