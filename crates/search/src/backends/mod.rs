//! Search backend implementations.
//!
//! Each backend is gated behind a feature flag:
//!
//! - `elasticsearch` (default) - the official Elasticsearch client

#[cfg(feature = "elasticsearch")]
pub mod elasticsearch;
