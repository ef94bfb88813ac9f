//! This module defines and re-exports the interfaces for the likes data
//! store. It serves as a central point for accessing traits related to data
//! interaction.
mod identity;
mod likes;

pub use identity::IdentityRepository;
pub use likes::LikesRepository;
