mod identity;
mod keys;
mod like;
mod like_action;
mod like_count;
mod like_target;

pub use identity::UserIdentity;
pub use keys::{ledger_key, tally_key};
pub use like::Like;
pub use like_action::LikeAction;
pub use like_count::{LikeCount, PartyTotal};
pub use like_target::LikeTarget;
