//! In-memory repositories for testing and local development.
//!
//! `MockLikesRepository` implements the same toggle/change/remove semantics
//! as the PostgreSQL backend over mutex-guarded maps, allowing handler and
//! service tests to run without a database. Tally rows are floored at zero
//! and never removed, matching the SQL write path.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use likes_shared::{
    ledger_key, tally_key, Like, LikeAction, LikeCount, LikeTarget, PartyTotal, UserIdentity,
};
use time::OffsetDateTime;

use crate::errors::{IdentityRepositoryError, LikesRepositoryError};
use crate::{IdentityRepository, LikesRepository};

#[derive(Default)]
struct LikesState {
    /// Ledger rows keyed by `{user}_{DISTRICT}_{zone}`.
    likes: HashMap<String, Like>,
    /// Tally rows keyed by `{DISTRICT}_{zone}_{sanitized name}`.
    counts: HashMap<String, LikeCount>,
}

/// In-memory likes repository.
pub struct MockLikesRepository {
    state: Mutex<LikesState>,
}

impl MockLikesRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LikesState::default()),
        }
    }

    /// The current tally for a candidate, zero if the row does not exist.
    pub fn count_for(&self, district: &str, zone: i32, candidate_name: &str) -> i64 {
        let state = self.state.lock().unwrap();
        state
            .counts
            .get(&tally_key(district, zone, candidate_name))
            .map(|c| c.count)
            .unwrap_or(0)
    }

    /// Number of ledger rows currently stored.
    pub fn ledger_len(&self) -> usize {
        self.state.lock().unwrap().likes.len()
    }
}

impl Default for MockLikesRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn increment_tally(state: &mut LikesState, target: &LikeTarget) {
    let key = tally_key(target.district(), target.zone, &target.candidate_name);
    let entry = state.counts.entry(key).or_insert_with(|| LikeCount {
        district: target.district().to_string(),
        zone: target.zone,
        candidate_name: target.candidate_name.clone(),
        party: target.party.clone(),
        party_short: target.party_short.clone(),
        count: 0,
    });
    entry.count += 1;
}

fn decrement_tally(state: &mut LikesState, district: &str, zone: i32, candidate_name: &str) {
    if let Some(entry) = state.counts.get_mut(&tally_key(district, zone, candidate_name)) {
        entry.count = (entry.count - 1).max(0);
    }
}

#[async_trait]
impl LikesRepository for MockLikesRepository {
    async fn apply_like(
        &self,
        user_id: &str,
        target: &LikeTarget,
    ) -> Result<LikeAction, LikesRepositoryError> {
        let mut state = self.state.lock().unwrap();
        let row_id = ledger_key(user_id, target.district(), target.zone);
        let now = OffsetDateTime::now_utc();

        match state.likes.get(&row_id).map(|l| l.candidate_name.clone()) {
            None => {
                state.likes.insert(
                    row_id,
                    Like {
                        user_id: user_id.to_string(),
                        district: target.district().to_string(),
                        zone: target.zone,
                        candidate_name: target.candidate_name.clone(),
                        party: target.party.clone(),
                        party_short: target.party_short.clone(),
                        created_at: now,
                        updated_at: now,
                    },
                );
                increment_tally(&mut state, target);
                Ok(LikeAction::Liked)
            }
            Some(current) if current == target.candidate_name => {
                state.likes.remove(&row_id);
                decrement_tally(&mut state, target.district(), target.zone, &current);
                Ok(LikeAction::Removed)
            }
            Some(current) => {
                decrement_tally(&mut state, target.district(), target.zone, &current);
                increment_tally(&mut state, target);
                let like = state.likes.get_mut(&row_id).unwrap();
                like.candidate_name = target.candidate_name.clone();
                like.party = target.party.clone();
                like.party_short = target.party_short.clone();
                like.updated_at = now;
                Ok(LikeAction::Changed)
            }
        }
    }

    async fn district_counts(
        &self,
        district: &str,
    ) -> Result<Vec<LikeCount>, LikesRepositoryError> {
        let state = self.state.lock().unwrap();
        let mut counts: Vec<LikeCount> = state
            .counts
            .values()
            .filter(|c| c.district == district && c.count > 0)
            .cloned()
            .collect();
        counts.sort_by(|a, b| a.zone.cmp(&b.zone).then_with(|| b.count.cmp(&a.count)));
        Ok(counts)
    }

    async fn user_likes(
        &self,
        user_id: &str,
        district: &str,
    ) -> Result<Vec<Like>, LikesRepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .likes
            .values()
            .filter(|l| l.user_id == user_id && l.district == district)
            .cloned()
            .collect())
    }

    async fn top_candidates(&self, limit: i64) -> Result<Vec<LikeCount>, LikesRepositoryError> {
        let state = self.state.lock().unwrap();
        let mut counts: Vec<LikeCount> =
            state.counts.values().filter(|c| c.count > 0).cloned().collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(limit.max(0) as usize);
        Ok(counts)
    }

    async fn district_party_totals(&self) -> Result<Vec<PartyTotal>, LikesRepositoryError> {
        let state = self.state.lock().unwrap();
        let mut totals: HashMap<(String, String), PartyTotal> = HashMap::new();
        for count in state.counts.values().filter(|c| c.count > 0) {
            let entry = totals
                .entry((count.district.clone(), count.party.clone()))
                .or_insert_with(|| PartyTotal {
                    district: count.district.clone(),
                    party: count.party.clone(),
                    party_short: count.party_short.clone(),
                    total_likes: 0,
                });
            entry.total_likes += count.count;
        }

        let mut rows: Vec<PartyTotal> = totals.into_values().collect();
        rows.sort_by(|a, b| {
            a.district
                .cmp(&b.district)
                .then_with(|| b.total_likes.cmp(&a.total_likes))
                .then_with(|| a.party.cmp(&b.party))
        });
        Ok(rows)
    }

    async fn total_likes(&self) -> Result<i64, LikesRepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.counts.values().filter(|c| c.count > 0).map(|c| c.count).sum())
    }
}

/// In-memory identity repository.
pub struct MockIdentityRepository {
    identities: Mutex<HashMap<String, UserIdentity>>,
}

impl MockIdentityRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self {
            identities: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch a stored identity by external id.
    pub fn get(&self, external_id: &str) -> Option<UserIdentity> {
        self.identities.lock().unwrap().get(external_id).cloned()
    }

    /// Number of stored identities.
    pub fn len(&self) -> usize {
        self.identities.lock().unwrap().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.identities.lock().unwrap().is_empty()
    }
}

impl Default for MockIdentityRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityRepository for MockIdentityRepository {
    async fn upsert(&self, identity: &UserIdentity) -> Result<(), IdentityRepositoryError> {
        self.identities
            .lock()
            .unwrap()
            .insert(identity.external_id.clone(), identity.clone());
        Ok(())
    }
}
