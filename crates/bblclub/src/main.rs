//! BBL Club server
//!
//! Serves data-grid pages and ACRIS transaction histories for NYC tax lots
//! from Elasticsearch.

use bblclub_rest::{ServerConfig, create_app_with_config, init_logging};
use clap::Parser;
use tracing::{info, warn};

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        documents_index = %config.documents_index,
        parties_index = %config.parties_index,
        "Starting BBL Club server"
    );

    start_elasticsearch(config).await
}

/// Starts the server over Elasticsearch.
#[cfg(feature = "elasticsearch")]
async fn start_elasticsearch(config: ServerConfig) -> anyhow::Result<()> {
    use bblclub_search::backends::elasticsearch::{
        ElasticsearchAuth, ElasticsearchBackend, ElasticsearchConfig,
    };
    use bblclub_search::core::SearchBackend;

    let es_auth = match (
        &config.elasticsearch_username,
        &config.elasticsearch_password,
    ) {
        (Some(username), Some(password)) => Some(ElasticsearchAuth::Basic {
            username: username.clone(),
            password: password.clone(),
        }),
        _ => None,
    };

    let es_config = ElasticsearchConfig {
        nodes: config.elasticsearch_node_list(),
        request_timeout_ms: config.elasticsearch_timeout_ms,
        auth: es_auth,
        ..Default::default()
    };

    info!(nodes = ?es_config.nodes, "Initializing Elasticsearch backend");
    let backend = ElasticsearchBackend::new(es_config)?;

    // Startup proceeds on an unhealthy cluster
    if let Err(e) = backend.health_check().await {
        warn!(error = %e, "Elasticsearch is not healthy yet");
    }

    let app = create_app_with_config(backend, config.clone());
    serve(app, &config).await
}

/// Fallback when the elasticsearch feature is not enabled.
#[cfg(not(feature = "elasticsearch"))]
async fn start_elasticsearch(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The server requires the 'elasticsearch' feature. \
         Build with: cargo build -p bblclub --features elasticsearch"
    )
}
