//! HTTP API Layer
//!
//! REST API for the workshop invoicing system using Axum.
//!
//! The server runs in two modes:
//! - With `database_url` configured: invoices persist to PostgreSQL and the
//!   database counter assigns numbers.
//! - Without: nothing persists and an in-process sequence assigns numbers,
//!   restarting at 1 with the process.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(Some(pool), config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_invoicing::MemorySequence;
use render_pdf::CompanyProfile;

use crate::config::ApiConfig;
use crate::handlers::{health, invoices};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Present only when a database is configured
    pub pool: Option<PgPool>,
    /// Fallback numbering for database-less operation
    pub sequence: Arc<MemorySequence>,
    pub company: CompanyProfile,
    pub config: ApiConfig,
}

/// Creates the main API router
pub fn create_router(pool: Option<PgPool>, config: ApiConfig) -> Router {
    let company = CompanyProfile {
        logo_path: config.logo_path.clone(),
        ..CompanyProfile::default()
    };
    let state = AppState {
        pool,
        sequence: Arc::new(MemorySequence::new()),
        company,
        config,
    };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let invoice_routes = Router::new()
        .route("/", post(invoices::generate_invoice))
        .route("/:number", get(invoices::get_invoice));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1/invoices", invoice_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
