//! Search backend abstraction.
//!
//! This module defines the [`SearchBackend`] trait, the single seam between
//! the query/join logic and the search cluster. The Elasticsearch client
//! implements it in production; tests substitute an in-memory spy.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BackendResult;

/// Executes query bodies against named indexes.
///
/// Implementations must be `Send + Sync` so they can be shared across
/// request handlers behind an `Arc`.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Returns a short name for logging and error messages.
    fn backend_name(&self) -> &'static str;

    /// Runs a search body against an index.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::IndexNotFound`](crate::error::BackendError::IndexNotFound)
    /// when the index does not exist, and other backend errors for transport
    /// or decoding failures.
    async fn search(&self, index: &str, body: Value) -> BackendResult<SearchResponse>;

    /// Checks that the backend is reachable and healthy.
    async fn health_check(&self) -> BackendResult<()> {
        Ok(())
    }
}

#[async_trait]
impl<T: SearchBackend + ?Sized> SearchBackend for Arc<T> {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    async fn search(&self, index: &str, body: Value) -> BackendResult<SearchResponse> {
        (**self).search(index, body).await
    }

    async fn health_check(&self) -> BackendResult<()> {
        (**self).health_check().await
    }
}

/// The parts of a search response this crate reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching documents.
    #[serde(default)]
    pub hits: Hits,
    /// Aggregation results, when the query requested any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Value>,
}

/// The `hits` section of a search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hits {
    /// Total number of matches, when tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<TotalHits>,
    /// The returned page of hits.
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// Total hit count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalHits {
    /// The count.
    pub value: u64,
    /// `eq` for exact counts, `gte` for lower bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
}

/// A single hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Document id in the index.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The stored document.
    #[serde(rename = "_source", default)]
    pub source: Value,
}

impl SearchResponse {
    /// Builds a response from a list of sources, with an exact total.
    pub fn from_sources(sources: Vec<Value>) -> Self {
        let total = sources.len() as u64;
        Self {
            hits: Hits {
                total: Some(TotalHits {
                    value: total,
                    relation: Some("eq".to_string()),
                }),
                hits: sources
                    .into_iter()
                    .map(|source| Hit { id: None, source })
                    .collect(),
            },
            aggregations: None,
        }
    }

    /// Sets the aggregation results.
    pub fn with_aggregations(mut self, aggregations: Value) -> Self {
        self.aggregations = Some(aggregations);
        self
    }

    /// Returns the total hit count, falling back to the number of returned hits.
    pub fn total(&self) -> u64 {
        self.hits
            .total
            .as_ref()
            .map(|t| t.value)
            .unwrap_or(self.hits.hits.len() as u64)
    }

    /// Iterates over the `_source` of each hit, in backend order.
    pub fn sources(&self) -> impl Iterator<Item = &Value> {
        self.hits.hits.iter().map(|hit| &hit.source)
    }

    /// Returns a named aggregation result.
    pub fn aggregation(&self, name: &str) -> Option<&Value> {
        self.aggregations.as_ref().and_then(|aggs| aggs.get(name))
    }
}
