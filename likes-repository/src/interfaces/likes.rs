//! This module defines the `LikesRepository` trait, which provides an
//! interface for the vote ledger (one row per user per zone), the
//! denormalized tally table kept in sync with it, and the aggregation reads
//! served from the tallies.
use likes_shared::{Like, LikeAction, LikeCount, LikeTarget, PartyTotal};

use crate::errors::LikesRepositoryError;

/// A trait that defines the interface for the likes data store.
///
/// Implementors provide the toggle/change/remove state machine over the
/// ledger table plus the read-side aggregations over the tally table. The
/// two tables must be mutated in one atomic unit: a reader never observes a
/// ledger row without its tally adjustment or vice versa.
#[async_trait::async_trait]
pub trait LikesRepository: Send + Sync {
    /// Applies a like mutation for one user against one zone.
    ///
    /// Resolves to exactly one transition:
    /// - no current pick in the zone → record it (`Liked`)
    /// - current pick is this candidate → remove it (`Removed`)
    /// - current pick is another candidate → swap it (`Changed`)
    ///
    /// Tally adjustments are applied in the same transaction and are floored
    /// at zero; they never drive the count negative.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The verified external identity of the caller.
    /// * `target` - The district/zone/candidate being liked.
    ///
    /// # Returns
    ///
    /// The resulting [`LikeAction`], or a `LikesRepositoryError` if the
    /// transaction fails (in which case no partial writes are visible).
    async fn apply_like(
        &self,
        user_id: &str,
        target: &LikeTarget,
    ) -> Result<LikeAction, LikesRepositoryError>;

    /// Returns the positive tallies for a district, ordered by zone then
    /// count descending.
    async fn district_counts(&self, district: &str)
        -> Result<Vec<LikeCount>, LikesRepositoryError>;

    /// Returns a user's current picks in a district.
    ///
    /// This is a strong read against the ledger table (not the tallies); it
    /// reflects every committed mutation immediately, since it drives the
    /// "is this my vote" client state.
    async fn user_likes(
        &self,
        user_id: &str,
        district: &str,
    ) -> Result<Vec<Like>, LikesRepositoryError>;

    /// Returns the top-liked candidates across all districts, count
    /// descending, at most `limit` rows, all with a positive count.
    async fn top_candidates(&self, limit: i64) -> Result<Vec<LikeCount>, LikesRepositoryError>;

    /// Returns per-district like totals grouped by party.
    ///
    /// Rows are ordered by district, then total descending, then party name
    /// ascending, so the first row per district is its dominant party under a
    /// deterministic tie-break.
    async fn district_party_totals(&self) -> Result<Vec<PartyTotal>, LikesRepositoryError>;

    /// Returns the grand total of likes across all positive tallies.
    async fn total_likes(&self) -> Result<i64, LikesRepositoryError>;
}
