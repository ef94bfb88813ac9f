use std::sync::Arc;

use identity::{IdentityVerifier, VerifierSource};
use likes_repository::{
    postgres, IdentityRepository, LikesRepository, PostgresIdentityRepository,
    PostgresLikesRepository,
};

use crate::config::{get_app_credentials, get_database_url};
use crate::errors::ServiceError;
use crate::rate_limit::{InMemoryRateLimiter, RateLimiter};

/// `Dependencies` struct holds the wired components of the likes API.
///
/// It includes the ledger and identity repositories, the identity verifier
/// collaborator, and the mutation rate limiter.
pub struct Dependencies {
    pub likes: Arc<dyn LikesRepository>,
    pub identities: Arc<dyn IdentityRepository>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub rate_limiter: Arc<dyn RateLimiter>,
}

impl Dependencies {
    /// Creates a new `Dependencies` instance.
    ///
    /// Connects the database pool, applies pending migrations, and wires up
    /// the external collaborators.
    ///
    /// # Returns
    ///
    /// A `Result` which is `Ok(Self)` on successful initialization or a
    /// `ServiceError` if any dependency fails to initialize.
    pub async fn new() -> Result<Self, ServiceError> {
        let database_url = get_database_url();

        let pool = sqlx::PgPool::connect(&database_url).await?;
        postgres::migrate(&pool).await?;

        let verifier: Arc<dyn IdentityVerifier> =
            VerifierSource::facebook(get_app_credentials()).into_verifier().into();

        Ok(Dependencies {
            likes: Arc::new(PostgresLikesRepository::new(pool.clone())),
            identities: Arc::new(PostgresIdentityRepository::new(pool)),
            verifier,
            rate_limiter: Arc::new(InMemoryRateLimiter::with_defaults()),
        })
    }
}
