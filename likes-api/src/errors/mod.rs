//! Error types for the likes API.
//!
//! `ApiError` is the public taxonomy surfaced to HTTP callers; internal
//! details from the repositories and the identity provider are logged but
//! never leaked into response bodies. `ServiceError` covers startup and
//! serve-loop failures in the binary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use identity::IdentityError;
use likes_repository::{IdentityRepositoryError, LikesRepositoryError};
use thiserror::Error;
use tracing::error;

/// Errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed fields, or an unknown district/zone/candidate.
    #[error("{0}")]
    InvalidInput(String),

    /// Missing or unverifiable access token.
    #[error("Invalid token")]
    Unauthenticated,

    /// The caller exceeded the mutation rate limit.
    #[error("Too many requests")]
    RateLimited,

    /// A storage or upstream failure; details are logged, not returned.
    #[error("Operation failed")]
    OperationFailed,
}

impl ApiError {
    /// Create an invalid-input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::OperationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<LikesRepositoryError> for ApiError {
    fn from(err: LikesRepositoryError) -> Self {
        error!(error = %err, "likes repository failure");
        Self::OperationFailed
    }
}

impl From<IdentityRepositoryError> for ApiError {
    fn from(err: IdentityRepositoryError) -> Self {
        error!(error = %err, "identity repository failure");
        Self::OperationFailed
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidToken => Self::Unauthenticated,
            IdentityError::Http(e) => {
                error!(error = %e, "identity provider unreachable");
                Self::OperationFailed
            }
        }
    }
}

/// Errors for service startup and the serve loop.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] LikesRepositoryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::invalid_input("Invalid district").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            ApiError::OperationFailed.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_token_maps_to_unauthenticated() {
        let err: ApiError = IdentityError::InvalidToken.into();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[test]
    fn test_operation_failed_hides_detail() {
        assert_eq!(ApiError::OperationFailed.to_string(), "Operation failed");
    }
}
