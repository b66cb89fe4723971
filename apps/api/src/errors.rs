use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every pipeline-stage error maps 1:1 to a user-visible message here; nothing
/// is silently swallowed and no step is retried. Compilation failures never
/// reach this type — they degrade the run to `latex_only` inside the
/// synthesis service instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Captured page text is empty")]
    ExtractionEmpty,

    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    #[error("Synthesis output violated the required schema: {0}")]
    SynthesisSchema(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::StorageWrite(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::AccessDenied(msg) => (StatusCode::BAD_GATEWAY, "ACCESS_DENIED", msg.clone()),
            AppError::ExtractionEmpty => (
                StatusCode::BAD_REQUEST,
                "EXTRACTION_EMPTY",
                "The captured page contained no usable text. Open the job posting tab and try again."
                    .to_string(),
            ),
            AppError::StorageWrite(msg) => {
                tracing::error!("Storage write error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_WRITE_ERROR",
                    "Failed to persist data to the workspace".to_string(),
                )
            }
            AppError::SynthesisSchema(msg) => {
                tracing::error!("Synthesis schema error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SYNTHESIS_SCHEMA_ERROR",
                    "The AI backend returned malformed document content".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
