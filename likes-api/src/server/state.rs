// App state for the Axum server
use std::sync::Arc;

use identity::IdentityVerifier;
use likes_repository::{IdentityRepository, LikesRepository};

use crate::config::Dependencies;
use crate::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub likes: Arc<dyn LikesRepository>,
    pub identities: Arc<dyn IdentityRepository>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub rate_limiter: Arc<dyn RateLimiter>,
}

impl From<Dependencies> for AppState {
    fn from(deps: Dependencies) -> Self {
        Self {
            likes: deps.likes,
            identities: deps.identities,
            verifier: deps.verifier,
            rate_limiter: deps.rate_limiter,
        }
    }
}
