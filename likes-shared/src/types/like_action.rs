use serde::{Deserialize, Serialize};

/// The outcome of a like mutation, as reported back to the caller.
///
/// A like request against a zone resolves to exactly one of three
/// transitions: a fresh like, a switch to a different candidate, or a
/// toggle-off of the current one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LikeAction {
    Liked,
    Changed,
    Removed,
}
