// HTTP request handlers
use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use identity::VerifiedIdentity;
use likes_shared::{LikeAction, LikeCount, LikeTarget, UserIdentity};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{DISTRICT_CACHE_CONTROL, TOP_CACHE_CONTROL, TOP_CANDIDATES_LIMIT};
use crate::errors::ApiError;
use crate::sentiment::{self, DistrictSentiment};
use crate::server::state::AppState;
use crate::validation::validate_target;

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "Likes API is running")
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    pub access_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub external_id: String,
    pub name: String,
    pub email: String,
    pub photo_url: String,
}

fn to_user_identity(verified: &VerifiedIdentity) -> UserIdentity {
    UserIdentity {
        external_id: verified.external_id.clone(),
        display_name: verified.name.clone(),
        email: verified.email.clone(),
        photo_url: verified.photo_url.clone(),
    }
}

/// Auth endpoint - exchanges a client-obtained access token for a verified
/// identity and upserts the identity row.
pub async fn auth_identity(
    State(state): State<AppState>,
    Json(payload): Json<AuthRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token = payload
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::invalid_input("Access token required"))?;

    let verified = state.verifier.verify(&token).await?;
    state.identities.upsert(&to_user_identity(&verified)).await?;

    info!(external_id = %verified.external_id, "identity verified");

    Ok(Json(AuthResponse {
        external_id: verified.external_id,
        name: verified.name,
        email: verified.email,
        photo_url: verified.photo_url,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub access_token: Option<String>,
    pub district: Option<String>,
    pub zone: Option<i32>,
    pub candidate_name: Option<String>,
    pub party: Option<String>,
    pub party_short: Option<String>,
}

#[derive(Serialize)]
pub struct LikeResponse {
    pub action: LikeAction,
}

/// Like endpoint - applies one toggle/change/remove mutation for the caller.
///
/// Pipeline: field validation → token verification → rate limit → target
/// validation against the reference dataset → ledger mutation. Nothing is
/// written before every gate has passed.
pub async fn post_like(
    State(state): State<AppState>,
    Json(payload): Json<LikeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(token), Some(district), Some(zone), Some(candidate_name), Some(party), Some(party_short)) = (
        payload.access_token.filter(|v| !v.is_empty()),
        payload.district.filter(|v| !v.is_empty()),
        payload.zone,
        payload.candidate_name.filter(|v| !v.is_empty()),
        payload.party.filter(|v| !v.is_empty()),
        payload.party_short.filter(|v| !v.is_empty()),
    ) else {
        return Err(ApiError::invalid_input("Missing required fields"));
    };

    let verified = state.verifier.verify(&token).await?;

    if !state.rate_limiter.check(&verified.external_id) {
        return Err(ApiError::RateLimited);
    }

    let target = LikeTarget::new(&district, zone, candidate_name, party, party_short);
    validate_target(&target)?;

    // Keep the identity row fresh so the ledger's user reference resolves
    // even for users who never hit the auth endpoint on this session.
    state.identities.upsert(&to_user_identity(&verified)).await?;

    let action = state.likes.apply_like(&verified.external_id, &target).await?;

    info!(
        external_id = %verified.external_id,
        district = %target.district(),
        zone = target.zone,
        action = ?action,
        "like applied"
    );

    Ok(Json(LikeResponse { action }))
}

#[derive(Deserialize)]
pub struct DistrictQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateCount {
    pub count: i64,
    pub party: String,
    pub party_short: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictLikesResponse {
    pub counts: BTreeMap<i32, BTreeMap<String, CandidateCount>>,
    pub user_likes: BTreeMap<i32, String>,
}

/// District likes endpoint - positive tallies grouped by zone, plus the
/// caller's own picks when a `userId` is supplied.
///
/// The tallies come from the denormalized table; the user's picks come from
/// the ledger and reflect every committed mutation immediately.
pub async fn district_likes(
    State(state): State<AppState>,
    Path(district): Path<String>,
    Query(query): Query<DistrictQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let district = district.trim().to_uppercase();

    let mut counts: BTreeMap<i32, BTreeMap<String, CandidateCount>> = BTreeMap::new();
    for row in state.likes.district_counts(&district).await? {
        counts.entry(row.zone).or_default().insert(
            row.candidate_name,
            CandidateCount {
                count: row.count,
                party: row.party,
                party_short: row.party_short,
            },
        );
    }

    let mut user_likes = BTreeMap::new();
    if let Some(user_id) = query.user_id.filter(|u| !u.is_empty()) {
        for like in state.likes.user_likes(&user_id, &district).await? {
            user_likes.insert(like.zone, like.candidate_name);
        }
    }

    Ok((
        [(header::CACHE_CONTROL, DISTRICT_CACHE_CONTROL)],
        Json(DistrictLikesResponse { counts, user_likes }),
    ))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopLikesResponse {
    pub top_candidates: Vec<LikeCount>,
    pub sentiment: BTreeMap<String, DistrictSentiment>,
    pub total_likes: i64,
}

/// Top likes endpoint - the global top candidates, the dominant party per
/// district, and the grand like total.
pub async fn top_likes(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let top_candidates = state.likes.top_candidates(TOP_CANDIDATES_LIMIT).await?;
    let totals = state.likes.district_party_totals().await?;
    let sentiment = sentiment::dominant_by_district(&totals);
    let total_likes = state.likes.total_likes().await?;

    Ok((
        [(header::CACHE_CONTROL, TOP_CACHE_CONTROL)],
        Json(TopLikesResponse {
            top_candidates,
            sentiment,
            total_likes,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use identity::MockVerifier;
    use likes_repository::{MockIdentityRepository, MockLikesRepository};

    use crate::rate_limit::InMemoryRateLimiter;

    fn verified(id: &str, name: &str) -> VerifiedIdentity {
        VerifiedIdentity {
            external_id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", id),
            photo_url: String::new(),
        }
    }

    /// Builds a state with a registered "token-1" → user "100" mapping.
    fn test_state() -> (AppState, Arc<MockLikesRepository>, Arc<MockIdentityRepository>) {
        let likes = Arc::new(MockLikesRepository::new());
        let identities = Arc::new(MockIdentityRepository::new());
        let verifier = MockVerifier::new();
        verifier.register("token-1", verified("100", "Asha"));

        let state = AppState {
            likes: likes.clone(),
            identities: identities.clone(),
            verifier: Arc::new(verifier),
            rate_limiter: Arc::new(InMemoryRateLimiter::with_defaults()),
        };
        (state, likes, identities)
    }

    /// A like request for a real dataset candidate (JHAPA zone 1).
    fn like_request(token: &str, candidate: &str) -> LikeRequest {
        LikeRequest {
            access_token: Some(token.to_string()),
            district: Some("jhapa".to_string()),
            zone: Some(1),
            candidate_name: Some(candidate.to_string()),
            party: Some("CPN-UML".to_string()),
            party_short: Some("UML".to_string()),
        }
    }

    async fn apply(state: &AppState, request: LikeRequest) -> Result<LikeAction, ApiError> {
        let response = post_like(State(state.clone()), Json(request)).await?;
        let body = axum::body::to_bytes(response.into_response().into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        Ok(serde_json::from_value(parsed["action"].clone()).unwrap())
    }

    #[tokio::test]
    async fn test_post_like_then_toggle_off() {
        let (state, likes, _) = test_state();

        let action = apply(&state, like_request("token-1", "Agni Prasad Kharel")).await.unwrap();
        assert_eq!(action, LikeAction::Liked);
        assert_eq!(likes.count_for("JHAPA", 1, "Agni Prasad Kharel"), 1);

        let action = apply(&state, like_request("token-1", "Agni Prasad Kharel")).await.unwrap();
        assert_eq!(action, LikeAction::Removed);
        assert_eq!(likes.count_for("JHAPA", 1, "Agni Prasad Kharel"), 0);
    }

    #[tokio::test]
    async fn test_post_like_change_vote() {
        let (state, likes, _) = test_state();

        apply(&state, like_request("token-1", "Agni Prasad Kharel")).await.unwrap();
        let mut request = like_request("token-1", "Bishwa Prakash Sharma");
        request.party = Some("Nepali Congress".to_string());
        request.party_short = Some("NC".to_string());
        let action = apply(&state, request).await.unwrap();

        assert_eq!(action, LikeAction::Changed);
        assert_eq!(likes.count_for("JHAPA", 1, "Agni Prasad Kharel"), 0);
        assert_eq!(likes.count_for("JHAPA", 1, "Bishwa Prakash Sharma"), 1);
    }

    #[tokio::test]
    async fn test_post_like_missing_fields() {
        let (state, _, _) = test_state();

        let mut request = like_request("token-1", "Agni Prasad Kharel");
        request.district = None;
        let err = apply(&state, request).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(msg) if msg == "Missing required fields"));
    }

    #[tokio::test]
    async fn test_post_like_bad_token() {
        let (state, likes, _) = test_state();

        let err = apply(&state, like_request("wrong-token", "Agni Prasad Kharel"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
        assert_eq!(likes.ledger_len(), 0);
    }

    #[tokio::test]
    async fn test_post_like_unknown_district_writes_nothing() {
        let (state, likes, _) = test_state();

        let mut request = like_request("token-1", "Agni Prasad Kharel");
        request.district = Some("FAKEDISTRICT".to_string());
        let err = apply(&state, request).await.unwrap_err();

        assert!(matches!(err, ApiError::InvalidInput(msg) if msg == "Invalid district"));
        assert_eq!(likes.ledger_len(), 0);
    }

    #[tokio::test]
    async fn test_post_like_rate_limited() {
        let (base, likes, _) = test_state();
        let state = AppState {
            rate_limiter: Arc::new(InMemoryRateLimiter::new(2, Duration::from_secs(60))),
            ..base
        };

        apply(&state, like_request("token-1", "Agni Prasad Kharel")).await.unwrap();
        apply(&state, like_request("token-1", "Agni Prasad Kharel")).await.unwrap();
        let err = apply(&state, like_request("token-1", "Agni Prasad Kharel"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::RateLimited));
        // Two mutations went through (like + remove), the third changed nothing.
        assert_eq!(likes.count_for("JHAPA", 1, "Agni Prasad Kharel"), 0);
    }

    #[tokio::test]
    async fn test_post_like_upserts_identity() {
        let (state, _, identities) = test_state();

        apply(&state, like_request("token-1", "Agni Prasad Kharel")).await.unwrap();

        assert_eq!(identities.len(), 1);
        assert_eq!(identities.get("100").unwrap().display_name, "Asha");
    }

    #[tokio::test]
    async fn test_auth_identity_roundtrip() {
        let (state, _, identities) = test_state();

        let response = auth_identity(
            State(state.clone()),
            Json(AuthRequest {
                access_token: Some("token-1".to_string()),
            }),
        )
        .await
        .unwrap();

        let body = axum::body::to_bytes(response.into_response().into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["externalId"], "100");
        assert_eq!(parsed["name"], "Asha");
        assert!(!identities.is_empty());
    }

    #[tokio::test]
    async fn test_auth_identity_requires_token() {
        let (state, _, _) = test_state();

        let err = auth_identity(State(state), Json(AuthRequest { access_token: None }))
            .await
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_district_likes_groups_by_zone() {
        let (state, _, _) = test_state();

        apply(&state, like_request("token-1", "Agni Prasad Kharel")).await.unwrap();

        let response = district_likes(
            State(state.clone()),
            Path("jhapa".to_string()),
            Query(DistrictQuery {
                user_id: Some("100".to_string()),
            }),
        )
        .await
        .unwrap();

        let response = response.into_response();
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            DISTRICT_CACHE_CONTROL
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["counts"]["1"]["Agni Prasad Kharel"]["count"], 1);
        assert_eq!(parsed["userLikes"]["1"], "Agni Prasad Kharel");
    }

    #[tokio::test]
    async fn test_top_likes_shape() {
        let (state, _, _) = test_state();

        apply(&state, like_request("token-1", "Agni Prasad Kharel")).await.unwrap();

        let response = top_likes(State(state.clone())).await.unwrap().into_response();
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            TOP_CACHE_CONTROL
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(parsed["totalLikes"], 1);
        assert_eq!(parsed["topCandidates"][0]["candidateName"], "Agni Prasad Kharel");
        assert_eq!(parsed["sentiment"]["JHAPA"]["party"], "CPN-UML");
        assert_eq!(parsed["sentiment"]["JHAPA"]["color"], "#2563eb");
    }
}
