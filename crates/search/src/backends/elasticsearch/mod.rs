//! Elasticsearch backend implementation.
//!
//! Implements [`SearchBackend`](crate::core::SearchBackend) on top of the
//! official `elasticsearch` client. Query bodies are built elsewhere (see
//! [`crate::query`] and [`crate::acris`]); this module only sends them and
//! decodes the responses.
//!
//! A missing index is reported as
//! [`BackendError::IndexNotFound`](crate::error::BackendError::IndexNotFound)
//! so callers can decide whether an empty result is acceptable.
//!
//! # Example
//!
//! ```ignore
//! use bblclub_search::backends::elasticsearch::{ElasticsearchBackend, ElasticsearchConfig};
//! use bblclub_search::core::SearchBackend;
//!
//! let config = ElasticsearchConfig {
//!     nodes: vec!["http://localhost:9200".to_string()],
//!     ..Default::default()
//! };
//! let backend = ElasticsearchBackend::new(config)?;
//! backend.health_check().await?;
//! ```

mod backend;
mod search_impl;

pub use backend::{ElasticsearchAuth, ElasticsearchBackend, ElasticsearchConfig};
