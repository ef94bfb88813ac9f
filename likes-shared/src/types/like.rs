use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Represents a user's current pick in one zone of a district.
///
/// This is the authoritative ledger row: at most one exists per
/// (user, district, zone). The denormalized tally table never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub user_id: String,
    pub district: String,
    pub zone: i32,
    pub candidate_name: String,
    pub party: String,
    pub party_short: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
