//! Mutation target validation against the reference election dataset.
//!
//! A like may only land on a candidate that actually stands in the named
//! district and zone; anything else is rejected before any write happens.
//! District, zone, and candidate failures each get their own message so the
//! client can surface what was wrong.

use likes_shared::LikeTarget;

use crate::errors::ApiError;

/// Checks that a target references a real district, zone, and candidate.
pub fn validate_target(target: &LikeTarget) -> Result<(), ApiError> {
    let district = election_data::district(target.district())
        .ok_or_else(|| ApiError::invalid_input("Invalid district"))?;
    let zone = district
        .zone(target.zone)
        .ok_or_else(|| ApiError::invalid_input("Invalid zone"))?;
    if !zone.has_candidate(&target.candidate_name) {
        return Err(ApiError::invalid_input("Invalid candidate"));
    }
    Ok(())
}
