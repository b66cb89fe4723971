//! Generation result — the single user-visible outcome of a pipeline run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Outcome status of a generation run.
///
/// `LatexOnly` is a partial success, not a failure: typesetting sources were
/// produced but compilation to PDF failed or was skipped. It must be surfaced
/// distinctly to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Completed,
    LatexOnly,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub job_slug: String,
    pub status: GenerationStatus,
    /// Ordered output locations: résumé first, then cover letter.
    pub artifact_paths: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    pub fn completed(job_slug: impl Into<String>, artifact_paths: Vec<PathBuf>) -> Self {
        Self {
            job_slug: job_slug.into(),
            status: GenerationStatus::Completed,
            artifact_paths,
            error: None,
        }
    }

    pub fn latex_only(
        job_slug: impl Into<String>,
        artifact_paths: Vec<PathBuf>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            job_slug: job_slug.into(),
            status: GenerationStatus::LatexOnly,
            artifact_paths,
            error: Some(error.into()),
        }
    }

    pub fn failed(job_slug: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            job_slug: job_slug.into(),
            status: GenerationStatus::Failed,
            artifact_paths: Vec::new(),
            error: Some(error.into()),
        }
    }
}
