//! Likes API Main Entry Point
//!
//! This is the main binary for the election likes service. It wires the
//! Postgres-backed ledger, the identity verifier, and the rate limiter into
//! an Axum server.

use std::env;
use std::net::SocketAddr;

use dotenv::dotenv;
use likes_api::config::get_listen_addr;
use likes_api::server::{create_app, run_server, state::AppState};
use likes_api::{Dependencies, ServiceError};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() -> Result<(), ServiceError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("likes_api=info"));

    if env::var("LOG_JSON").is_ok() {
        // JSON format for structured log shipping
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();

        info!(
            service_name = "likes-api",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with JSON format"
        );
    } else {
        // Pretty console output for local development
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();

        info!(
            service_name = "likes-api",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with console output"
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize tracing
    init_tracing()?;

    info!("Starting Likes API");

    // Initialize dependencies
    let deps = match Dependencies::new().await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let app = create_app(AppState::from(deps));

    let (host, port) = get_listen_addr();
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|_| ServiceError::InvalidAddress(format!("{}:{}", host, port)))?;

    match run_server(app, addr).await {
        Ok(()) => {
            info!("Likes API shut down cleanly");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Likes API failed");
            Err(e)
        }
    }
}
