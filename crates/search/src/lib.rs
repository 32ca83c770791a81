//! BBL Club search core
//!
//! This crate turns data-grid requests into Elasticsearch queries and builds
//! per-property ACRIS transaction histories for BBL Club, a browser for NYC
//! property records (ACRIS transactions, PLUTO, tax valuations and owner
//! contacts).
//!
//! # Features
//!
//! - **Row model translation**: filters, sorting, pagination and grouping of a
//!   server-side data grid become Elasticsearch Query DSL
//! - **Response mapping**: hits and group buckets become `{ rows, total }` pages
//! - **Transaction history**: ACRIS documents joined with their parties and
//!   classified with the document control codes
//!
//! # Backend Features
//!
//! - `elasticsearch` (default) - the official Elasticsearch client
//!
//! # Architecture
//!
//! - [`types`] - Row model requests, filters, property identifiers, ACRIS records
//! - [`schema`] - Datasets and their column registries
//! - [`query`] - Row model to Query DSL translation and response mapping
//! - [`acris`] - Control codes and the transaction joiner
//! - [`core`] - The [`SearchBackend`](core::SearchBackend) seam
//! - [`backends`] - Backend implementations
//! - [`config`] - Index names and query limits
//! - [`error`] - Error types for all operations
//!
//! # Quick Start
//!
//! ```
//! use bblclub_search::query::RowModelQueryBuilder;
//! use bblclub_search::schema::Dataset;
//! use bblclub_search::types::{ColumnFilter, RowModelRequest, SortDirection, TextOperator};
//! use serde_json::json;
//!
//! let request = RowModelRequest::new(0, 100)
//!     .with_filter("name", ColumnFilter::text(TextOperator::Contains, "smith"))
//!     .with_sort("document_id", SortDirection::Asc);
//!
//! let es_query = RowModelQueryBuilder::new(Dataset::AcrisParties.registry())
//!     .with_max_result_window(10_000)
//!     .build(&request);
//!
//! assert_eq!(es_query.body["size"], json!(100));
//! assert_eq!(es_query.body["sort"][0], json!({ "document_id": { "order": "asc" } }));
//! ```
//!
//! # Property identifiers
//!
//! ```
//! use bblclub_search::types::Bbl;
//!
//! let bbl: Bbl = "3-00412-0007".parse().unwrap();
//! assert_eq!(bbl.to_string(), "3-412-7");
//! assert!("3-412".parse::<Bbl>().is_err());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod acris;
pub mod backends;
pub mod config;
pub mod core;
pub mod error;
pub mod query;
pub mod schema;
pub mod types;

// Re-export commonly used types at crate root
pub use acris::{TransactionJoiner, join_transactions};
pub use config::IndexConfig;
pub use core::{SearchBackend, SearchResponse};
pub use error::{BackendError, ClubError, ClubResult, FetchError, ValidationError};
pub use query::{EsQuery, GridPage, RowModelQueryBuilder, map_response, translate};
pub use schema::{ColumnRegistry, Dataset};
pub use types::{Bbl, RowModelRequest, TransactionWithParties};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
