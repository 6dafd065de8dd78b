//! Workshop Invoicing - API Server Binary
//!
//! # Usage
//!
//! ```bash
//! # Run with in-memory numbering (no persistence)
//! cargo run --bin invoice-api
//!
//! # Run against PostgreSQL
//! API_DATABASE_URL=postgres://... cargo run --bin invoice-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string (optional)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_LOGO_PATH` - Path to the company logo PNG (optional)

use interface_api::{config::ApiConfig, create_router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting workshop invoicing API server"
    );

    let pool = match &config.database_url {
        Some(url) => {
            let pool = infra_db::create_pool_from_url(url).await?;
            infra_db::run_migrations(&pool).await?;
            Some(pool)
        }
        None => {
            tracing::warn!(
                "no database configured; invoices will not persist and numbering restarts at 1"
            );
            None
        }
    };

    let app = create_router(pool, config.clone());
    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables, falling back to
/// individual variables and then defaults
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|_| ApiConfig {
        host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        port: std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080),
        database_url: std::env::var("API_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .ok(),
        log_level: std::env::var("API_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string()),
        logo_path: std::env::var("API_LOGO_PATH").ok(),
    })
}

/// Initializes the tracing subscriber for structured logging
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM) so in-flight requests can
/// complete before the process exits
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
