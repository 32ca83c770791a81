//! Error types for the search layer.
//!
//! Errors are split by category: validation errors are caller bugs detected
//! before any I/O, fetch errors wrap a backend failure with the property that
//! triggered it, and backend errors describe what went wrong talking to the
//! search cluster.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for search-layer operations.
#[derive(Error, Debug)]
pub enum ClubError {
    /// Malformed caller input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Failures fetching records for a property
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Search backend errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl ClubError {
    /// Returns true if the error was caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClubError::Validation(_))
    }
}

/// Errors raised synchronously for malformed input.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The row model request does not have the expected shape.
    #[error("invalid row model request: {message}")]
    InvalidRequest { message: String },

    /// The property identifier is not of the form `borough-block-lot`.
    #[error("invalid property identifier '{input}': {message}")]
    InvalidIdentifier { input: String, message: String },
}

/// Errors fetching ACRIS records for a property.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Fetching documents failed. Fatal: no partial result is returned.
    #[error("failed to fetch documents for {property_id}: {source}")]
    Documents {
        property_id: String,
        source: BackendError,
    },

    /// Fetching parties failed. Recovered by the joiner and only logged.
    #[error("failed to fetch parties for {property_id}: {source}")]
    Parties {
        property_id: String,
        source: BackendError,
    },
}

/// Errors originating from the search backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection to the backend could not be set up.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// The queried index does not exist.
    #[error("index not found: {index}")]
    IndexNotFound { index: String },

    /// The backend answered with something that could not be decoded.
    #[error("invalid response from {backend_name}: {message}")]
    InvalidResponse {
        backend_name: String,
        message: String,
    },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for search-layer operations.
pub type ClubResult<T> = Result<T, ClubError>;

/// Result type alias for raw backend calls.
pub type BackendResult<T> = Result<T, BackendError>;

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::InvalidResponse {
            backend_name: "unknown".to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::InvalidIdentifier {
            input: "invalid".to_string(),
            message: "expected three segments".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid property identifier 'invalid': expected three segments"
        );
    }

    #[test]
    fn test_fetch_error_display_includes_cause() {
        let err = FetchError::Documents {
            property_id: "1-13-1".to_string(),
            source: BackendError::IndexNotFound {
                index: "acris-documents".to_string(),
            },
        };
        let message = err.to_string();
        assert!(message.contains("1-13-1"));
        assert!(message.contains("index not found: acris-documents"));
    }

    #[test]
    fn test_club_error_from_categories() {
        let err: ClubError = ValidationError::InvalidRequest {
            message: "bad".to_string(),
        }
        .into();
        assert!(err.is_validation());

        let err: ClubError = BackendError::Unavailable {
            backend_name: "elasticsearch".to_string(),
            message: "down".to_string(),
        }
        .into();
        assert!(!err.is_validation());
        assert!(matches!(err, ClubError::Backend(_)));
    }
}
