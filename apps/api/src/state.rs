use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::AiBackend;
use crate::orchestrator::Orchestrator;
use crate::workspace::Workspace;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub workspace: Workspace,
    pub llm: Arc<dyn AiBackend>,
    pub orchestrator: Arc<Orchestrator>,
}
