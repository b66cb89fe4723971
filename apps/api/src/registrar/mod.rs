//! Posting registrar — normalizes captured page text into a persisted
//! `JobPosting` with a stable, deterministic slug.

use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::workspace::{sanitize_slug, Workspace};

/// Words taken from the posting text when the URL yields no usable slug.
const FALLBACK_SLUG_WORDS: usize = 8;

#[derive(Debug, Clone)]
pub struct Registrar {
    workspace: Workspace,
}

impl Registrar {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    /// Registers a captured posting: rejects empty text, derives a unique
    /// slug, and persists `posting.json` before returning. Persistence
    /// failure is fatal to this call and is not retried.
    pub fn register(&self, raw_text: &str, source_url: &str) -> Result<JobPosting, AppError> {
        if raw_text.trim().is_empty() {
            return Err(AppError::ExtractionEmpty);
        }

        let base = derive_slug(raw_text, source_url);
        let slug = self.workspace.reserve_job_dir(&base)?;

        let posting = JobPosting {
            slug: slug.clone(),
            raw_text: raw_text.to_string(),
            source_url: source_url.to_string(),
            captured_at: Utc::now(),
        };
        self.workspace.save_posting(&posting)?;

        info!("Job posting registered: {slug} (from {source_url})");
        Ok(posting)
    }
}

/// Derives a slug deterministically: from the URL's path segments when
/// present, otherwise from the leading words of the captured text. Collision
/// disambiguation happens at directory reservation, not here.
fn derive_slug(raw_text: &str, source_url: &str) -> String {
    let from_url = url_path_slug(source_url);
    if !from_url.is_empty() {
        return from_url;
    }

    let leading: String = raw_text
        .split_whitespace()
        .take(FALLBACK_SLUG_WORDS)
        .collect::<Vec<_>>()
        .join(" ");
    let from_text = sanitize_slug(&leading);
    if !from_text.is_empty() {
        return from_text;
    }

    "job-posting".to_string()
}

/// Extracts the last meaningful path segments of a URL as slug material.
/// Query strings and fragments are ignored; the host is skipped.
fn url_path_slug(url: &str) -> String {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let without_query = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or(without_scheme);

    let segments: Vec<&str> = without_query
        .split('/')
        .skip(1) // host
        .filter(|s| !s.is_empty())
        .collect();

    let tail = segments
        .iter()
        .rev()
        .take(3)
        .rev()
        .copied()
        .collect::<Vec<_>>()
        .join("-");

    sanitize_slug(&tail)
}
