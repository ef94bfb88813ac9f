//! Mock identity verifier for testing and local development.
//!
//! The `MockVerifier` can be pre-populated with token → identity mappings,
//! allowing tests to run without network access.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::{IdentityError, IdentityVerifier, Result, VerifiedIdentity};

/// Mock verifier that returns pre-registered identities.
///
/// Unknown tokens are rejected with [`IdentityError::InvalidToken`], matching
/// the live verifier's behavior for tokens the provider does not recognize.
pub struct MockVerifier {
    identities: RwLock<HashMap<String, VerifiedIdentity>>,
}

impl MockVerifier {
    /// Create a new empty mock verifier.
    pub fn new() -> Self {
        Self {
            identities: RwLock::new(HashMap::new()),
        }
    }

    /// Create a mock verifier pre-populated with the given mappings.
    pub fn with_identities(identities: HashMap<String, VerifiedIdentity>) -> Self {
        Self {
            identities: RwLock::new(identities),
        }
    }

    /// Register an identity to be returned for a given token.
    pub fn register(&self, access_token: &str, identity: VerifiedIdentity) {
        self.identities
            .write()
            .unwrap()
            .insert(access_token.to_string(), identity);
    }

    /// Number of registered tokens.
    pub fn len(&self) -> usize {
        self.identities.read().unwrap().len()
    }

    /// Whether no tokens are registered.
    pub fn is_empty(&self) -> bool {
        self.identities.read().unwrap().is_empty()
    }
}

impl Default for MockVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityVerifier for MockVerifier {
    async fn verify(&self, access_token: &str) -> Result<VerifiedIdentity> {
        self.identities
            .read()
            .unwrap()
            .get(access_token)
            .cloned()
            .ok_or(IdentityError::InvalidToken)
    }
}
