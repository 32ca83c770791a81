//! Core abstractions.
//!
//! - [`SearchBackend`] - executes query bodies against named indexes
//! - [`SearchResponse`] - the subset of a search response that callers read
//!
//! # Example: a fixed-response backend
//!
//! ```
//! use async_trait::async_trait;
//! use bblclub_search::core::{SearchBackend, SearchResponse};
//! use bblclub_search::error::BackendResult;
//! use serde_json::{Value, json};
//!
//! struct Fixed(Vec<Value>);
//!
//! #[async_trait]
//! impl SearchBackend for Fixed {
//!     fn backend_name(&self) -> &'static str {
//!         "fixed"
//!     }
//!
//!     async fn search(&self, _index: &str, _body: Value) -> BackendResult<SearchResponse> {
//!         Ok(SearchResponse::from_sources(self.0.clone()))
//!     }
//! }
//!
//! let backend = Fixed(vec![json!({ "document_id": "DOC1" })]);
//! assert_eq!(backend.backend_name(), "fixed");
//! ```

mod backend;

pub use backend::{Hit, Hits, SearchBackend, SearchResponse, TotalHits};
