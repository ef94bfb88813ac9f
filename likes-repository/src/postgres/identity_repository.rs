//! PostgreSQL implementation of the identity repository.
//!
//! Stores verified identities in the `users` table with upsert semantics:
//! every successful login refreshes the profile fields and the last-login
//! timestamp.
use async_trait::async_trait;
use likes_shared::UserIdentity;

use crate::{IdentityRepository, IdentityRepositoryError};

/// PostgreSQL-backed identity repository.
pub struct PostgresIdentityRepository {
    pool: sqlx::PgPool,
}

impl PostgresIdentityRepository {
    /// Creates a new PostgreSQL identity repository instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with required schema
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn upsert(&self, identity: &UserIdentity) -> Result<(), IdentityRepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO users (external_id, display_name, email, photo_url, created_at, last_login_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            ON CONFLICT (external_id) DO UPDATE SET
                display_name = EXCLUDED.display_name,
                email = EXCLUDED.email,
                photo_url = EXCLUDED.photo_url,
                last_login_at = NOW()
            "#,
        )
        .bind(&identity.external_id)
        .bind(&identity.display_name)
        .bind(&identity.email)
        .bind(&identity.photo_url)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
