use serde::{Deserialize, Serialize};

/// Represents the aggregated like tally for one candidate in one zone.
///
/// This is a denormalized view over the ledger table. `count` is floored at
/// zero and rows are never deleted, so candidates that lose all their likes
/// stay visible with a zero tally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LikeCount {
    pub district: String,
    pub zone: i32,
    pub candidate_name: String,
    pub party: String,
    pub party_short: String,
    pub count: i64,
}

/// Aggregated likes for one party within one district.
///
/// Produced by the sentiment read path; the dominant party per district is
/// the first row when ordered by total descending, party name ascending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PartyTotal {
    pub district: String,
    pub party: String,
    pub party_short: String,
    pub total_likes: i64,
}
