//! This module defines the `IdentityRepository` trait for persisting
//! verified user identities.
use likes_shared::UserIdentity;

use crate::errors::IdentityRepositoryError;

/// A trait that defines the interface for the identity store.
#[async_trait::async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Inserts or refreshes an identity row.
    ///
    /// Called on every successful verification: a new identity is created,
    /// an existing one gets its profile fields and last-login timestamp
    /// refreshed.
    async fn upsert(&self, identity: &UserIdentity) -> Result<(), IdentityRepositoryError>;
}
