//! # Likes Shared
//! Domain types shared across the election likes service: user identities,
//! ledger rows, denormalized tallies, and the row-key derivation rules that
//! keep the two tables pointing at the same candidates.
pub mod types;

pub use types::{Like, LikeAction, LikeCount, LikeTarget, PartyTotal, UserIdentity};
pub use types::{ledger_key, tally_key};
