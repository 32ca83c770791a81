//! Server configuration for the BBL Club API.
//!
//! Every option can be given on the command line or through a `BBL_*`
//! environment variable.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BBL_SERVER_PORT` | 8080 | Server port |
//! | `BBL_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `BBL_LOG_LEVEL` | info | Log level |
//! | `BBL_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `BBL_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `BBL_ENABLE_CORS` | true | Enable CORS |
//! | `BBL_CORS_ORIGINS` | * | Allowed origins |
//! | `BBL_CORS_METHODS` | GET,POST,OPTIONS | Allowed methods |
//! | `BBL_CORS_HEADERS` | Content-Type,Authorization,Accept | Allowed headers |
//! | `BBL_ELASTICSEARCH_NODES` | http://localhost:9200 | Comma-separated node URLs |
//! | `BBL_ELASTICSEARCH_USERNAME` | | Basic auth username |
//! | `BBL_ELASTICSEARCH_PASSWORD` | | Basic auth password |
//! | `BBL_ELASTICSEARCH_TIMEOUT_MS` | 30000 | Per-request timeout (ms) |
//! | `BBL_DOCUMENTS_INDEX` | acris-documents | ACRIS master index |
//! | `BBL_PARTIES_INDEX` | acris-parties | ACRIS parties index |
//! | `BBL_PLUTO_INDEX` | pluto | PLUTO index |
//! | `BBL_VALUATIONS_INDEX` | valuations | Tax valuations index |
//! | `BBL_CONTACTS_INDEX` | contacts | Owner contacts index |
//! | `BBL_DOCUMENT_FETCH_LIMIT` | 1000 | Documents fetched per property |
//! | `BBL_PARTY_FETCH_LIMIT` | 10000 | Parties fetched per property |
//! | `BBL_MAX_RESULT_WINDOW` | 10000 | Deepest row a grid page may reach |
//!
//! # Example
//!
//! ```rust
//! use bblclub_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(config.socket_addr(), "0.0.0.0:3000");
//! assert_eq!(config.index_config().documents_index, "acris-documents");
//! ```

use bblclub_search::IndexConfig;
use clap::Parser;

/// Server configuration for the BBL Club API.
#[derive(Debug, Clone, Parser)]
#[command(name = "bblclub")]
#[command(about = "BBL Club property records API")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "BBL_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "BBL_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "BBL_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "BBL_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "BBL_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "BBL_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "BBL_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "BBL_CORS_METHODS", default_value = "GET,POST,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "BBL_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept"
    )]
    pub cors_headers: String,

    /// Elasticsearch node URLs (comma-separated).
    #[arg(
        long,
        env = "BBL_ELASTICSEARCH_NODES",
        default_value = "http://localhost:9200"
    )]
    pub elasticsearch_nodes: String,

    /// Elasticsearch basic auth username.
    #[arg(long, env = "BBL_ELASTICSEARCH_USERNAME")]
    pub elasticsearch_username: Option<String>,

    /// Elasticsearch basic auth password.
    #[arg(long, env = "BBL_ELASTICSEARCH_PASSWORD")]
    pub elasticsearch_password: Option<String>,

    /// Elasticsearch request timeout in milliseconds.
    #[arg(long, env = "BBL_ELASTICSEARCH_TIMEOUT_MS", default_value = "30000")]
    pub elasticsearch_timeout_ms: u64,

    /// Index holding ACRIS master documents.
    #[arg(long, env = "BBL_DOCUMENTS_INDEX", default_value = "acris-documents")]
    pub documents_index: String,

    /// Index holding ACRIS parties.
    #[arg(long, env = "BBL_PARTIES_INDEX", default_value = "acris-parties")]
    pub parties_index: String,

    /// Index holding PLUTO.
    #[arg(long, env = "BBL_PLUTO_INDEX", default_value = "pluto")]
    pub pluto_index: String,

    /// Index holding tax valuations.
    #[arg(long, env = "BBL_VALUATIONS_INDEX", default_value = "valuations")]
    pub valuations_index: String,

    /// Index holding owner contacts.
    #[arg(long, env = "BBL_CONTACTS_INDEX", default_value = "contacts")]
    pub contacts_index: String,

    /// Maximum ACRIS documents fetched for one property.
    #[arg(long, env = "BBL_DOCUMENT_FETCH_LIMIT", default_value = "1000")]
    pub document_fetch_limit: u64,

    /// Maximum ACRIS parties fetched for one property.
    #[arg(long, env = "BBL_PARTY_FETCH_LIMIT", default_value = "10000")]
    pub party_fetch_limit: u64,

    /// Largest `from + size` a grid page may reach.
    #[arg(long, env = "BBL_MAX_RESULT_WINDOW", default_value = "10000")]
    pub max_result_window: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let indexes = IndexConfig::default();
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024, // 1MB
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept".to_string(),
            elasticsearch_nodes: "http://localhost:9200".to_string(),
            elasticsearch_username: None,
            elasticsearch_password: None,
            elasticsearch_timeout_ms: 30000,
            documents_index: indexes.documents_index,
            parties_index: indexes.parties_index,
            pluto_index: indexes.pluto_index,
            valuations_index: indexes.valuations_index,
            contacts_index: indexes.contacts_index,
            document_fetch_limit: indexes.document_fetch_limit,
            party_fetch_limit: indexes.party_fetch_limit,
            max_result_window: indexes.max_result_window,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// Falls back to the defaults when the environment does not parse.
    pub fn from_env() -> Self {
        Self::try_parse_from(["bblclub"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the configured Elasticsearch nodes, trimmed and without blanks.
    pub fn elasticsearch_node_list(&self) -> Vec<String> {
        self.elasticsearch_nodes
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Returns the index names and query limits.
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig {
            documents_index: self.documents_index.clone(),
            parties_index: self.parties_index.clone(),
            pluto_index: self.pluto_index.clone(),
            valuations_index: self.valuations_index.clone(),
            contacts_index: self.contacts_index.clone(),
            document_fetch_limit: self.document_fetch_limit,
            party_fetch_limit: self.party_fetch_limit,
            max_result_window: self.max_result_window,
        }
    }

    /// Validates the configuration and returns every error found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.elasticsearch_node_list().is_empty() {
            errors.push("At least one Elasticsearch node is required".to_string());
        }

        if self.elasticsearch_username.is_some() != self.elasticsearch_password.is_some() {
            errors.push(
                "Elasticsearch username and password must be given together".to_string(),
            );
        }

        for (name, index) in [
            ("documents", &self.documents_index),
            ("parties", &self.parties_index),
            ("pluto", &self.pluto_index),
            ("valuations", &self.valuations_index),
            ("contacts", &self.contacts_index),
        ] {
            if index.trim().is_empty() {
                errors.push(format!("The {} index name cannot be empty", name));
            }
        }

        if self.document_fetch_limit == 0 || self.party_fetch_limit == 0 {
            errors.push("Fetch limits cannot be 0".to_string());
        }

        if self.max_result_window == 0 {
            errors.push("Max result window cannot be 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses ephemeral port 0, a short timeout and no CORS.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            ..Default::default()
        }
    }
}
