//! Error types for the BBL Club API.
//!
//! Every error is returned as a JSON body `{ "error": "<message>" }`.
//!
//! # Error Mapping
//!
//! | Search Error | HTTP Status | Message |
//! |--------------|-------------|---------|
//! | ValidationError | 400 | the validation message |
//! | FetchError | 500 | generic |
//! | BackendError | 500 | generic |
//!
//! Failed health checks answer 503. The cause of every 5xx response is
//! logged, never returned.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bblclub_search::error::{ClubError, ValidationError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Message returned for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// The error type for API handlers.
#[derive(Debug, Error)]
pub enum RestError {
    /// Bad request - validation error (HTTP 400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// The search backend is not healthy (HTTP 503).
    #[error("Service unavailable: {message}")]
    ServiceUnavailable {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    #[error("Internal error: {message}")]
    InternalError {
        /// Detailed cause, logged but not returned.
        message: String,
    },
}

impl RestError {
    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            RestError::BadRequest { message } => message,
            RestError::ServiceUnavailable { message } => {
                error!(cause = %message, "Search backend unavailable");
                "Service unavailable".to_string()
            }
            RestError::InternalError { message } => {
                error!(cause = %message, "Request failed");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        RestError::BadRequest {
            message: err.to_string(),
        }
    }
}

impl From<ClubError> for RestError {
    fn from(err: ClubError) -> Self {
        match err {
            ClubError::Validation(e) => e.into(),
            other => RestError::InternalError {
                message: other.to_string(),
            },
        }
    }
}

/// Result type for API handlers.
pub type RestResult<T> = Result<T, RestError>;
