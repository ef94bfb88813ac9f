// Server module - HTTP server setup and routing
pub mod handlers;
pub mod state;

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tracing::info;

use self::state::AppState;
use crate::config::create_cors_layer;
use crate::errors::ServiceError;

/// Create the Axum application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/auth/identity", post(handlers::auth_identity))
        .route("/likes", post(handlers::post_like))
        .route("/likes/top", get(handlers::top_likes))
        .route("/likes/:district", get(handlers::district_likes))
        .layer(create_cors_layer())
        .with_state(state)
}

/// Run the server on the specified address
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), ServiceError> {
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
