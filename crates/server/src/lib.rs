//! Server crate for the college finder.
//!
//! This crate wires the pipeline together: configuration, the response
//! generator with its LLM fallback, the paced stream emitter and the axum
//! routes that expose them.

pub mod config;
pub mod emitter;
pub mod error;
pub mod fallback;
pub mod orchestrator;
pub mod prompt;
pub mod responder;
pub mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use catalog::Catalog;
use llm_client::GeminiClient;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub use config::{FinderArgs, FinderConfig};
pub use emitter::{PacingConfig, StreamEmitter, APOLOGY};
pub use orchestrator::CollegeFinder;
pub use responder::{LlmCapability, ResponseGenerator};
pub use routes::{make_app, AppState, FINDER_PATH};

/// Install the global tracing subscriber; `RUST_LOG` wins over `default`.
pub fn init_tracing(default: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Decide once whether the LLM path may be used.
pub fn build_capability(config: &FinderConfig) -> LlmCapability {
    match &config.gemini_api_key {
        Some(key) => {
            let client = GeminiClient::new(key.expose(), config.generation.clone())
                .with_endpoint(config.gemini_endpoint.clone())
                .with_model(config.gemini_model.clone());
            info!(model = client.model(), "LLM generation enabled");
            LlmCapability::available(client)
        }
        None => {
            warn!("GEMINI_API_KEY not set, answers will come from the local catalog only");
            LlmCapability::Unavailable
        }
    }
}

/// The configured catalog file, or the built-in one.
pub fn load_catalog(config: &FinderConfig) -> Result<Catalog> {
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load_from_file(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => Catalog::builtin().context("Failed to load built-in catalog")?,
    };
    info!("Loaded catalog with {} colleges", catalog.len());
    Ok(catalog)
}

/// Build the finder described by `config`.
pub fn build_finder(config: &FinderConfig) -> Result<CollegeFinder> {
    let catalog = Arc::new(load_catalog(config)?);
    let generator = ResponseGenerator::new(build_capability(config));
    Ok(CollegeFinder::new(catalog, config.match_policy, generator))
}

pub fn build_state(config: &FinderConfig) -> Result<AppState> {
    Ok(AppState {
        finder: build_finder(config)?,
        emitter: StreamEmitter::new(config.pacing),
    })
}

/// Serve until Ctrl-C.
pub async fn run_server(config: FinderConfig) -> Result<()> {
    let app = make_app(build_state(&config)?);

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("College finder listening on http://{}{}", listener.local_addr()?, FINDER_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
