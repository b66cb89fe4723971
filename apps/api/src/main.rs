mod collector;
mod compiler;
mod config;
mod errors;
mod llm_client;
mod models;
mod orchestrator;
mod registrar;
mod render;
mod routes;
mod state;
mod synthesis;
mod upload;
mod workspace;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::compiler::{DocumentCompiler, Pdflatex};
use crate::config::Config;
use crate::llm_client::{AiBackend, LlmClient};
use crate::orchestrator::Orchestrator;
use crate::registrar::Registrar;
use crate::routes::build_router;
use crate::state::AppState;
use crate::synthesis::SynthesisService;
use crate::workspace::Workspace;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jobsmith API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the workspace store
    let workspace = Workspace::new(&config.workspace_dir);
    workspace.ensure_layout()?;
    info!("Workspace ready at {}", config.workspace_dir.display());

    // Initialize LLM client
    let llm: Arc<dyn AiBackend> = Arc::new(LlmClient::new(config.anthropic_api_key.clone()));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize the PDF compiler; a missing install degrades runs to
    // latex_only rather than blocking startup.
    let compiler = Arc::new(Pdflatex);
    if compiler.available().await {
        info!("pdflatex found; PDF compilation enabled");
    } else {
        warn!("pdflatex not found; runs will produce LaTeX sources only");
    }

    // Wire the pipeline
    let registrar = Registrar::new(workspace.clone());
    let synthesis = SynthesisService::new(llm.clone(), compiler, workspace.clone());
    let orchestrator = Arc::new(Orchestrator::new(workspace.clone(), registrar, synthesis));

    // Build app state
    let state = AppState {
        config: config.clone(),
        workspace,
        llm,
        orchestrator,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // extension origin varies per install

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
