//! Error types for the likes repository.
//! Consolidates and re-exports error types related to ledger and identity
//! storage operations.
mod identity;
mod likes;

pub use identity::IdentityRepositoryError;
pub use likes::LikesRepositoryError;
