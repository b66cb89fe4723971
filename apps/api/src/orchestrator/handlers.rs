use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::collector::{CapturedPage, ProvidedCapture};
use crate::errors::AppError;
use crate::models::generation::GenerationResult;
use crate::orchestrator::{SessionState, TriggerResponse};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateRequest {
    /// Raw visible text the extension captured from the page.
    pub raw_text: String,
    /// URL of the page the text was captured from.
    pub url: String,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerationResult>,
}

/// POST /api/v1/generate
///
/// Runs one full capture → register → synthesize pass. If a run is already
/// in flight the trigger is acknowledged but ignored.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let collector = ProvidedCapture::new(CapturedPage {
        raw_text: req.raw_text,
        url: req.url,
    });

    match state.orchestrator.trigger(&collector).await {
        TriggerResponse::Finished(outcome) => Ok(Json(GenerateResponse {
            success: true,
            message: outcome.message,
            result: Some(outcome.result),
        })),
        TriggerResponse::Ignored => Ok(Json(GenerateResponse {
            success: false,
            message: "A generation run is already in progress.".to_string(),
            result: None,
        })),
        TriggerResponse::Failed(reason) => Err(reason.into_app_error()),
    }
}

/// GET /api/v1/session
pub async fn handle_session(State(state): State<AppState>) -> Json<SessionState> {
    Json(state.orchestrator.session())
}
