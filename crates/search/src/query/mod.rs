//! Row model to Elasticsearch query translation.
//!
//! [`RowModelQueryBuilder`] turns a grid [`RowModelRequest`] into a search
//! body: filters under `bool.filter`, sort clauses, `from`/`size` for flat
//! pages and nested `terms` aggregations for grouped ones. [`map_response`]
//! reads the matching response back into a [`GridPage`].
//!
//! # Example
//!
//! ```
//! use bblclub_search::query::translate;
//! use bblclub_search::schema::Dataset;
//! use bblclub_search::types::{ColumnFilter, NumberOperator, RowModelRequest};
//! use serde_json::json;
//!
//! let request = RowModelRequest::new(0, 50)
//!     .with_filter("block", ColumnFilter::number(NumberOperator::Equals, "013"));
//!
//! let es_query = translate(Dataset::AcrisDocuments.registry(), &request);
//! assert_eq!(
//!     es_query.body["query"]["bool"]["filter"][0],
//!     json!({ "term": { "block.integer": 13 } })
//! );
//! ```
//!
//! [`RowModelRequest`]: crate::types::RowModelRequest

pub mod aggregation;
pub mod filter_handlers;
mod query_builder;
mod response;

pub use query_builder::{
    DEFAULT_MAX_RESULT_WINDOW, EsQuery, GroupingPlan, RowModelQueryBuilder, translate,
};
pub use response::{CHILD_COUNT_KEY, GridPage, map_response};
