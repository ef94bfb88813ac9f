//! Identity verification against the Facebook Graph API.
//!
//! This crate provides:
//! - [`VerifierSource`] config enum for choosing between mock and live verifiers
//! - [`IdentityVerifier`] trait for abstracting token verification
//! - [`FacebookVerifier`] production client that calls the Graph API
//! - [`MockVerifier`] mock client for testing with pre-registered token → identity mappings
//!
//! The contract is narrow on purpose: given an opaque client-obtained access
//! token, return a verified identity `{id, name, email, photo}` or a
//! rejection. Tokens issued for a different application are rejected when an
//! app id and secret are configured.

mod mock;

pub use mock::MockVerifier;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("token verification rejected")]
    InvalidToken,
    #[error("reqwest error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, IdentityError>;

/// A verified external identity, as returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub external_id: String,
    pub name: String,
    pub email: String,
    pub photo_url: String,
}

/// Trait for exchanging an opaque access token for a verified identity.
///
/// This abstracts the identity provider so handlers can be tested without
/// network access. Production code uses [`FacebookVerifier`], tests use
/// [`MockVerifier`].
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify an access token and return the identity it belongs to.
    ///
    /// Fails with [`IdentityError::InvalidToken`] when the provider rejects
    /// the token or it was issued for a different application.
    async fn verify(&self, access_token: &str) -> Result<VerifiedIdentity>;
}

#[derive(Debug, Deserialize)]
struct GraphPicture {
    data: Option<GraphPictureData>,
}

#[derive(Debug, Deserialize)]
struct GraphPictureData {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphUser {
    id: Option<String>,
    name: Option<String>,
    email: Option<String>,
    picture: Option<GraphPicture>,
}

#[derive(Debug, Deserialize)]
struct DebugTokenEnvelope {
    data: Option<DebugTokenData>,
}

#[derive(Debug, Deserialize)]
struct DebugTokenData {
    is_valid: Option<bool>,
    app_id: Option<String>,
}

/// Production verifier backed by the Facebook Graph API.
///
/// Performs two calls: `/me` to resolve the token to a profile, and (when app
/// credentials are configured) `/debug_token` to confirm the token was issued
/// for this application.
pub struct FacebookVerifier {
    graph_url: String,
    app_credentials: Option<(String, String)>,
    client: ReqwestClient,
}

const GRAPH_API_URL: &str = "https://graph.facebook.com";

impl FacebookVerifier {
    /// Creates a verifier against the public Graph API endpoint.
    ///
    /// `app_credentials` is an optional `(app_id, app_secret)` pair; when
    /// present, tokens not issued for that app id are rejected.
    pub fn new(app_credentials: Option<(String, String)>) -> Self {
        Self::with_graph_url(GRAPH_API_URL, app_credentials)
    }

    /// Creates a verifier against a custom Graph API base URL (for tests).
    pub fn with_graph_url(graph_url: &str, app_credentials: Option<(String, String)>) -> Self {
        Self {
            graph_url: graph_url.trim_end_matches('/').to_string(),
            app_credentials,
            client: ReqwestClient::new(),
        }
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<GraphUser> {
        let url = format!(
            "{}/me?fields=id,name,email,picture.width(100).height(100)&access_token={}",
            self.graph_url, access_token
        );
        let res = self.client.get(&url).send().await?;
        if !res.status().is_success() {
            return Err(IdentityError::InvalidToken);
        }
        Ok(res.json::<GraphUser>().await?)
    }

    async fn check_app_binding(&self, access_token: &str) -> Result<()> {
        let Some((app_id, app_secret)) = &self.app_credentials else {
            return Ok(());
        };

        let url = format!(
            "{}/debug_token?input_token={}&access_token={}|{}",
            self.graph_url, access_token, app_id, app_secret
        );
        let envelope = self
            .client
            .get(&url)
            .send()
            .await?
            .json::<DebugTokenEnvelope>()
            .await?;

        let data = envelope.data.ok_or(IdentityError::InvalidToken)?;
        let valid = data.is_valid.unwrap_or(false);
        let bound_to_app = data.app_id.as_deref() == Some(app_id.as_str());
        if valid && bound_to_app {
            Ok(())
        } else {
            Err(IdentityError::InvalidToken)
        }
    }
}

#[async_trait]
impl IdentityVerifier for FacebookVerifier {
    async fn verify(&self, access_token: &str) -> Result<VerifiedIdentity> {
        let profile = self.fetch_profile(access_token).await?;
        let external_id = profile.id.ok_or(IdentityError::InvalidToken)?;

        self.check_app_binding(access_token).await?;

        Ok(VerifiedIdentity {
            external_id,
            name: profile.name.unwrap_or_default(),
            email: profile.email.unwrap_or_default(),
            photo_url: profile
                .picture
                .and_then(|p| p.data)
                .and_then(|d| d.url)
                .unwrap_or_default(),
        })
    }
}

/// Configuration for the identity verification source.
///
/// Use this to explicitly choose between mock and live verifiers, following
/// the same pattern as the other collaborator crates in this workspace.
pub enum VerifierSource {
    /// Use a mock verifier with pre-registered token → identity mappings.
    Mock(MockVerifier),

    /// Verify against the live Facebook Graph API.
    Facebook {
        /// Optional `(app_id, app_secret)` pair for app-binding checks.
        app_credentials: Option<(String, String)>,
    },
}

impl VerifierSource {
    /// Create a live Facebook source.
    pub fn facebook(app_credentials: Option<(String, String)>) -> Self {
        Self::Facebook { app_credentials }
    }

    /// Create the appropriate verifier implementation.
    pub fn into_verifier(self) -> Box<dyn IdentityVerifier> {
        match self {
            Self::Mock(mock) => Box::new(mock),
            Self::Facebook { app_credentials } => Box::new(FacebookVerifier::new(app_credentials)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_user_missing_optional_fields() {
        let user: GraphUser = serde_json::from_str(r#"{"id": "42", "name": "Asha"}"#).unwrap();
        assert_eq!(user.id.as_deref(), Some("42"));
        assert!(user.email.is_none());
        assert!(user.picture.is_none());
    }

    #[test]
    fn test_debug_token_envelope_parses() {
        let envelope: DebugTokenEnvelope =
            serde_json::from_str(r#"{"data": {"is_valid": true, "app_id": "123"}}"#).unwrap();
        let data = envelope.data.unwrap();
        assert_eq!(data.is_valid, Some(true));
        assert_eq!(data.app_id.as_deref(), Some("123"));
    }

    #[test]
    fn test_graph_url_trailing_slash_is_trimmed() {
        let verifier = FacebookVerifier::with_graph_url("https://graph.example.com/", None);
        assert_eq!(verifier.graph_url, "https://graph.example.com");
    }
}
