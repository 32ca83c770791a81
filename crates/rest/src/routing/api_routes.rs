//! API route configuration.

use axum::{
    Router,
    routing::{get, post},
};
use bblclub_search::SearchBackend;

use crate::handlers;
use crate::state::AppState;

/// Creates all API routes.
///
/// # Routes
///
/// - `POST /api/grid/{dataset}` - Grid page for a dataset
/// - `GET /api/properties/{bbl}/transactions` - Transaction history
/// - `GET /health` - Backend health
/// - `GET /_liveness` - Liveness probe
pub fn create_routes<B>(state: AppState<B>) -> Router
where
    B: SearchBackend + 'static,
{
    Router::new()
        .route("/health", get(handlers::health_handler::<B>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/api/grid/{dataset}", post(handlers::grid_handler::<B>))
        .route(
            "/api/properties/{bbl}/transactions",
            get(handlers::transactions_handler::<B>),
        )
        .with_state(state)
}
