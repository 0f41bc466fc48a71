mod analysis;
mod compiler;
mod config;
mod db;
mod errors;
mod generation;
mod latex;
mod llm_client;
mod models;
mod profiles;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::compiler::RemoteCompiler;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::OllamaClient;
use crate::profiles::postgres::PgProfileStore;
use crate::profiles::store::{MemoryProfileStore, ProfileStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeAid API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = OllamaClient::new(
        &config.ollama_host,
        &config.ollama_model,
        Duration::from_secs(config.llm_timeout_secs),
    )
    .context("Failed to build LLM client")?;
    info!(
        "LLM client initialized (host: {}, model: {})",
        config.ollama_host,
        llm.model()
    );

    // Initialize LaTeX compiler
    let compiler = RemoteCompiler::new(&config.latex_compiler_url)
        .context("Failed to build LaTeX compiler client")?;
    info!("LaTeX compiler: {}", config.latex_compiler_url);

    // Initialize profile store (Postgres when configured, memory otherwise)
    let profiles: Arc<dyn ProfileStore> = match &config.database_url {
        Some(url) => Arc::new(PgProfileStore::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL not set; profiles are kept in memory and lost on restart");
            Arc::new(MemoryProfileStore::new())
        }
    };

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        compiler: Arc::new(compiler),
        profiles,
        generation: config.generation_options(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
