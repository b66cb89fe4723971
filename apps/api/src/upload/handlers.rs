use std::io::Write;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::AiBackend;
use crate::state::AppState;
use crate::upload::validate_upload;

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub resume_path: String,
    pub message: String,
}

/// POST /api/v1/resume
///
/// Accepts a multipart PDF upload, extracts its text, parses it into a
/// structured profile via the AI backend, and persists the profile. A
/// re-upload replaces the previous profile; stored job folders are untouched.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            upload = Some((file_name, data.to_vec()));
            break;
        }
    }

    let (file_name, data) = upload.ok_or_else(|| {
        AppError::Validation("Missing multipart field 'file'.".to_string())
    })?;

    validate_upload(&file_name, &data)?;
    info!("Received resume upload: {file_name} ({} bytes)", data.len());

    let text = extract_pdf_text(data).await?;
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "The PDF contained no extractable text. Scanned documents are not supported."
                .to_string(),
        ));
    }

    let mut profile = state.llm.parse_resume(&text).await?;
    profile.raw_text = text;

    state.workspace.save_resume(&profile)?;
    info!(
        "Resume profile stored for {}",
        profile.contact_info.full_name
    );

    Ok(Json(UploadResponse {
        success: true,
        resume_path: state.workspace.resume_path().display().to_string(),
        message: "Resume uploaded and parsed successfully.".to_string(),
    }))
}

/// Runs the CPU-bound PDF text extraction off the async runtime.
async fn extract_pdf_text(data: Vec<u8>) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let mut file = tempfile::NamedTempFile::new().map_err(|e| {
            AppError::StorageWrite(format!("Failed to create temporary file: {e}"))
        })?;
        file.write_all(&data).map_err(|e| {
            AppError::StorageWrite(format!("Failed to write temporary file: {e}"))
        })?;
        pdf_extract::extract_text(file.path()).map_err(|e| {
            AppError::Validation(format!("Could not extract text from the PDF: {e}"))
        })
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task panicked: {e}")))?
}
