use serde::{Deserialize, Serialize};

/// Represents a verified user identity.
///
/// Upserted on every successful token verification; the profile fields are
/// refreshed each time the user logs in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub external_id: String,
    pub display_name: String,
    pub email: String,
    pub photo_url: String,
}
