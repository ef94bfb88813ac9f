//! # Likes Repository
//! This crate provides traits and implementations for the likes data store:
//! the authoritative per-user ledger, the denormalized per-candidate tallies,
//! and the aggregation reads over them. It includes definitions for errors,
//! interfaces, a concrete PostgreSQL implementation, and an in-memory mock
//! for tests and local development.
pub mod errors;
pub mod interfaces;
pub mod mock;
pub mod postgres;

pub use errors::{IdentityRepositoryError, LikesRepositoryError};
pub use interfaces::{IdentityRepository, LikesRepository};
pub use mock::{MockIdentityRepository, MockLikesRepository};
pub use postgres::{PostgresIdentityRepository, PostgresLikesRepository};
