//! SearchBackend implementation for the Elasticsearch backend.

use async_trait::async_trait;
use elasticsearch::SearchParts;
use elasticsearch::cluster::ClusterHealthParts;
use serde_json::Value;

use crate::core::{SearchBackend, SearchResponse};
use crate::error::{BackendError, BackendResult};

use super::backend::{BACKEND_NAME, ElasticsearchBackend};

fn internal_error(message: String) -> BackendError {
    BackendError::Internal {
        backend_name: BACKEND_NAME.to_string(),
        message,
        source: None,
    }
}

fn unavailable(message: String) -> BackendError {
    BackendError::Unavailable {
        backend_name: BACKEND_NAME.to_string(),
        message,
    }
}

#[async_trait]
impl SearchBackend for ElasticsearchBackend {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn search(&self, index: &str, body: Value) -> BackendResult<SearchResponse> {
        tracing::trace!(index = %index, body = %body, "Sending search request");

        let response = self
            .client()
            .search(SearchParts::Index(&[index]))
            .body(body)
            .send()
            .await
            .map_err(|e| unavailable(format!("Search request failed: {}", e)))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if body.contains("index_not_found_exception") {
                return Err(BackendError::IndexNotFound {
                    index: index.to_string(),
                });
            }
            return Err(internal_error(format!(
                "Search failed with status {}: {}",
                status, body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| internal_error(format!("Failed to read search response: {}", e)))?;

        serde_json::from_value(body).map_err(|e| BackendError::InvalidResponse {
            backend_name: BACKEND_NAME.to_string(),
            message: format!("Failed to parse search response: {}", e),
        })
    }

    async fn health_check(&self) -> BackendResult<()> {
        let response = self
            .client()
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| unavailable(format!("Health check failed: {}", e)))?;

        let status = response.status_code();
        if !status.is_success() {
            return Err(unavailable(format!(
                "Cluster health returned status {}",
                status
            )));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| internal_error(format!("Failed to parse health response: {}", e)))?;

        let cluster_status = body
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or("unknown");

        if cluster_status == "red" {
            return Err(unavailable(format!("Cluster status is red: {:?}", body)));
        }

        Ok(())
    }
}
