//! Common test utilities for API testing.
//!
//! [`StubBackend`] answers each index with a fixed response or error and
//! counts calls, so tests run without a cluster.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::{Value, json};

use bblclub_rest::{AppState, ServerConfig, routing};
use bblclub_search::core::{SearchBackend, SearchResponse};
use bblclub_search::error::{BackendError, BackendResult};

/// Backend returning canned responses per index.
#[derive(Debug, Default)]
pub struct StubBackend {
    responses: HashMap<String, SearchResponse>,
    failing: Vec<String>,
    healthy: bool,
    calls: AtomicUsize,
    last_body: std::sync::Mutex<Option<Value>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self {
            healthy: true,
            ..Default::default()
        }
    }

    pub fn with_sources(mut self, index: &str, sources: Vec<Value>) -> Self {
        self.responses
            .insert(index.to_string(), SearchResponse::from_sources(sources));
        self
    }

    pub fn with_response(mut self, index: &str, response: SearchResponse) -> Self {
        self.responses.insert(index.to_string(), response);
        self
    }

    pub fn failing(mut self, index: &str) -> Self {
        self.failing.push(index.to_string());
        self
    }

    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<Value> {
        self.last_body.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for StubBackend {
    fn backend_name(&self) -> &'static str {
        "stub"
    }

    async fn search(&self, index: &str, body: Value) -> BackendResult<SearchResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_body.lock().unwrap() = Some(body);

        if self.failing.iter().any(|i| i == index) {
            return Err(BackendError::Unavailable {
                backend_name: "stub".to_string(),
                message: "connection refused to es1:9200".to_string(),
            });
        }

        self.responses
            .get(index)
            .cloned()
            .ok_or_else(|| BackendError::IndexNotFound {
                index: index.to_string(),
            })
    }

    async fn health_check(&self) -> BackendResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(BackendError::Unavailable {
                backend_name: "stub".to_string(),
                message: "cluster health is red".to_string(),
            })
        }
    }
}

/// Creates a test server over `backend`.
pub fn create_test_server(backend: StubBackend) -> (TestServer, Arc<StubBackend>) {
    let backend = Arc::new(backend);
    let state = AppState::new(Arc::clone(&backend), ServerConfig::for_testing());
    let app = routing::create_routes(state);
    let server = TestServer::new(app).expect("Failed to create test server");
    (server, backend)
}

/// An ACRIS master document source.
pub fn document(document_id: &str, doc_type: &str, document_date: &str) -> Value {
    json!({
        "document_id": document_id,
        "record_type": "A",
        "doc_type": doc_type,
        "document_date": document_date,
        "document_amt": "850000.00",
        "borough": "3",
        "block": "00412",
        "lot": "0007"
    })
}

/// An ACRIS party source.
pub fn party(document_id: &str, party_type: &str, name: &str) -> Value {
    json!({
        "document_id": document_id,
        "party_type": party_type,
        "name": name
    })
}
