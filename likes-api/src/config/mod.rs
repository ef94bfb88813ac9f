//! Configuration module for the likes API.
//! Defines environment helpers, server constants, and application-wide
//! dependency wiring.
mod dependencies;

pub use dependencies::Dependencies;

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Default listen host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// How many candidates the global top list returns.
pub const TOP_CANDIDATES_LIMIT: i64 = 10;

/// Cache policy for the per-district likes read.
pub const DISTRICT_CACHE_CONTROL: &str = "public, s-maxage=10, stale-while-revalidate=30";

/// Cache policy for the global top/sentiment read.
pub const TOP_CACHE_CONTROL: &str = "public, s-maxage=15, stale-while-revalidate=60";

/// Create the CORS layer for the public API.
///
/// The API is informational and read-mostly; writes are gated by token
/// verification, so origins are left open.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

/// Get the database URL from the environment.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

/// Get the optional Facebook app credentials from the environment.
///
/// Both `FACEBOOK_APP_ID` and `FACEBOOK_APP_SECRET` must be present for the
/// app-binding check to be enforced; with either missing, tokens are only
/// checked against the Graph API profile lookup.
pub fn get_app_credentials() -> Option<(String, String)> {
    let app_id = std::env::var("FACEBOOK_APP_ID").ok()?;
    let app_secret = std::env::var("FACEBOOK_APP_SECRET").ok()?;
    Some((app_id, app_secret))
}

/// Get the listen address from the environment, with defaults.
pub fn get_listen_addr() -> (String, u16) {
    let host = std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    (host, port)
}
