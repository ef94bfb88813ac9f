//! # Likes API
//! HTTP service for the election likes feature: social-login gated like
//! mutations over the vote ledger, plus the aggregated sentiment reads the
//! map client polls.
pub mod config;
pub mod errors;
pub mod rate_limit;
pub mod sentiment;
pub mod server;
pub mod validation;

pub use config::Dependencies;
pub use errors::{ApiError, ServiceError};
