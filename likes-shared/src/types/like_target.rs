use serde::{Deserialize, Serialize};

/// A fully qualified target for a like mutation.
///
/// Construction canonicalizes the district code (trimmed, upper-cased) so
/// every lookup and row key downstream uses a single spelling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LikeTarget {
    district: String,
    pub zone: i32,
    pub candidate_name: String,
    pub party: String,
    pub party_short: String,
}

impl LikeTarget {
    /// Creates a target with a canonicalized district code.
    pub fn new(
        district: impl AsRef<str>,
        zone: i32,
        candidate_name: impl Into<String>,
        party: impl Into<String>,
        party_short: impl Into<String>,
    ) -> Self {
        Self {
            district: district.as_ref().trim().to_uppercase(),
            zone,
            candidate_name: candidate_name.into(),
            party: party.into(),
            party_short: party_short.into(),
        }
    }

    /// The canonical (upper-cased) district code.
    pub fn district(&self) -> &str {
        &self.district
    }
}
