//! # bblclub-rest - HTTP API for BBL Club
//!
//! This crate exposes the BBL Club search core over HTTP: server-side
//! data-grid pages for each dataset and per-property ACRIS transaction
//! histories.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bblclub_rest::{create_app_with_config, ServerConfig};
//! use bblclub_search::backends::elasticsearch::{ElasticsearchBackend, ElasticsearchConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = ElasticsearchBackend::new(ElasticsearchConfig::default())?;
//!     let config = ServerConfig::default();
//!
//!     let app = create_app_with_config(backend, config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | HTTP Method | URL Pattern |
//! |----------|-------------|-------------|
//! | grid page | POST | `/api/grid/{dataset}` |
//! | transactions | GET | `/api/properties/{bbl}/transactions` |
//! | health | GET | `/health` |
//! | liveness | GET | `/_liveness` |
//!
//! Datasets are `acris-documents`, `acris-parties`, `pluto`, `valuations`
//! and `contacts`. A grid body is `{ "request": <row model request>,
//! "borough", "block", "lot" }`; the identifiers are required for
//! `acris-documents`, `valuations` and `contacts`.
//!
//! ## Error Handling
//!
//! Errors are returned as `{ "error": "<message>" }`:
//!
//! | HTTP Status | Description |
//! |-------------|-------------|
//! | 400 | Invalid request, dataset or property identifier |
//! | 500 | Search failure (generic message; the cause is logged) |
//! | 503 | Backend health check failed |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and HTTP mapping
//! - [`config`] - Server configuration
//! - [`state`] - Application state (backend, joiner, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use bblclub_search::SearchBackend;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<B>(backend: B) -> Router
where
    B: SearchBackend + 'static,
{
    create_app_with_config(backend, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// Sets up every route together with tracing, timeout, body limit and
/// (optionally) CORS middleware.
///
/// # Example
///
/// ```rust,ignore
/// use bblclub_rest::{create_app_with_config, ServerConfig};
///
/// let config = ServerConfig {
///     port: 3000,
///     enable_cors: true,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<B>(backend: B, config: ServerConfig) -> Router
where
    B: SearchBackend + 'static,
{
    info!(
        backend = backend.backend_name(),
        max_result_window = config.max_result_window,
        "Creating BBL Club API"
    );

    let state = AppState::new(Arc::new(backend), config.clone());
    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = router.layer(DefaultBodyLimit::max(config.max_body_size));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// Call once at startup. `RUST_LOG` overrides `level` when set.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "bblclub={level},bblclub_rest={level},bblclub_search={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
