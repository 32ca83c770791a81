//! Application state for the BBL Club API.
//!
//! Holds the search backend, the index configuration and the transaction
//! joiner shared by every handler.

use std::sync::Arc;

use bblclub_search::{IndexConfig, SearchBackend, TransactionJoiner};

use crate::config::ServerConfig;

/// Shared application state.
///
/// # Type Parameters
///
/// * `B` - The search backend type (must implement [`SearchBackend`])
///
/// # Example
///
/// ```rust,ignore
/// use bblclub_rest::{AppState, ServerConfig};
/// use bblclub_search::backends::elasticsearch::ElasticsearchBackend;
/// use std::sync::Arc;
///
/// let backend = ElasticsearchBackend::new(Default::default())?;
/// let state = AppState::new(Arc::new(backend), ServerConfig::default());
/// ```
pub struct AppState<B> {
    /// The search backend.
    backend: Arc<B>,

    /// Joins documents and parties over the same backend.
    joiner: Arc<TransactionJoiner<Arc<B>>>,

    /// Index names and query limits.
    indexes: Arc<IndexConfig>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since B is wrapped in Arc and doesn't need to be Clone
impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            joiner: Arc::clone(&self.joiner),
            indexes: Arc::clone(&self.indexes),
            config: Arc::clone(&self.config),
        }
    }
}

impl<B: SearchBackend + 'static> AppState<B> {
    /// Creates a new AppState with the given backend and configuration.
    pub fn new(backend: Arc<B>, config: ServerConfig) -> Self {
        let indexes = config.index_config();
        let joiner = TransactionJoiner::new(Arc::clone(&backend), &indexes);
        Self {
            backend,
            joiner: Arc::new(joiner),
            indexes: Arc::new(indexes),
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the search backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the transaction joiner.
    pub fn joiner(&self) -> &TransactionJoiner<Arc<B>> {
        &self.joiner
    }

    /// Returns the index names and query limits.
    pub fn indexes(&self) -> &IndexConfig {
        &self.indexes
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
