//! Test infrastructure for the search layer.
//!
//! [`SpyBackend`] answers searches from canned replies keyed by index and
//! records every call, so tests can assert both on results and on the query
//! bodies that were sent.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use bblclub_search::core::{SearchBackend, SearchResponse};
use bblclub_search::error::{BackendError, BackendResult};

/// A canned reply for one index.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Return these sources as hits.
    Sources(Vec<Value>),
    /// Return this raw response.
    Response(SearchResponse),
    /// Fail as if the cluster were unreachable.
    Unavailable,
    /// Fail as if the index did not exist.
    MissingIndex,
}

/// A recorded search call.
#[derive(Debug, Clone)]
pub struct Call {
    pub index: String,
    pub body: Value,
}

/// In-memory backend that records calls.
#[derive(Debug, Default)]
pub struct SpyBackend {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<Call>>,
    healthy: bool,
}

impl SpyBackend {
    pub fn new() -> Self {
        Self {
            healthy: true,
            ..Default::default()
        }
    }

    pub fn with_reply(mut self, index: &str, reply: Reply) -> Self {
        self.replies.insert(index.to_string(), reply);
        self
    }

    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchBackend for SpyBackend {
    fn backend_name(&self) -> &'static str {
        "spy"
    }

    async fn search(&self, index: &str, body: Value) -> BackendResult<SearchResponse> {
        self.calls.lock().unwrap().push(Call {
            index: index.to_string(),
            body,
        });

        match self.replies.get(index) {
            Some(Reply::Sources(sources)) => Ok(SearchResponse::from_sources(sources.clone())),
            Some(Reply::Response(response)) => Ok(response.clone()),
            Some(Reply::Unavailable) => Err(BackendError::Unavailable {
                backend_name: "spy".to_string(),
                message: "connection refused".to_string(),
            }),
            Some(Reply::MissingIndex) | None => Err(BackendError::IndexNotFound {
                index: index.to_string(),
            }),
        }
    }

    async fn health_check(&self) -> BackendResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(BackendError::Unavailable {
                backend_name: "spy".to_string(),
                message: "cluster is red".to_string(),
            })
        }
    }
}

/// An ACRIS master document source.
pub fn document(document_id: &str, doc_type: &str, document_date: &str) -> Value {
    json!({
        "document_id": document_id,
        "record_type": "A",
        "crfn": "2019000012345",
        "doc_type": doc_type,
        "document_date": document_date,
        "document_amt": "1250000.00",
        "recorded_datetime": format!("{}T00:00:00.000", document_date),
        "percent_trans": 100,
        "borough": "1",
        "block": "00013",
        "lot": "0001"
    })
}

/// An ACRIS party source.
pub fn party(document_id: &str, party_type: &str, name: &str) -> Value {
    json!({
        "document_id": document_id,
        "record_type": "P",
        "party_type": party_type,
        "name": name,
        "address_1": "1 CENTRE STREET",
        "city": "NEW YORK",
        "state": "NY",
        "zip": "10007",
        "country": "US"
    })
}
