//! Health check endpoint handlers.
//!
//! Provides health endpoints for monitoring and load balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bblclub_search::SearchBackend;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// Asks the search backend for its health.
///
/// # HTTP Request
///
/// `GET [base]/health`
///
/// # Response
///
/// - `200 OK` - Backend is healthy
/// - `503 Service Unavailable` - Backend is unreachable or unhealthy
pub async fn health_handler<B>(State(state): State<AppState<B>>) -> RestResult<Response>
where
    B: SearchBackend + 'static,
{
    debug!("Processing health check request");

    let backend_name = state.backend().backend_name();
    state
        .backend()
        .health_check()
        .await
        .map_err(|e| RestError::ServiceUnavailable {
            message: e.to_string(),
        })?;

    let health_response = serde_json::json!({
        "status": "ok",
        "backend": backend_name,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}

/// Handler for a liveness probe. Never touches the backend.
///
/// # HTTP Request
///
/// `GET [base]/_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}
