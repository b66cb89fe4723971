//! Workspace store — durable file-backed storage keyed by job slug.
//!
//! Layout:
//!   <workspace>/resume.json                      singleton résumé profile
//!   <workspace>/jobs/<slug>/posting.json         captured job posting
//!   <workspace>/jobs/<slug>/{resume,cover_letter}.tex
//!   <workspace>/jobs/<slug>/{resume,cover_letter}.pdf
//!   <workspace>/jobs/<slug>/generation.json      recorded generation result
//!
//! Single-writer-per-slug: the orchestrator's single-flight rule is the only
//! guard; there is no per-slug lock.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::AppError;
use crate::models::generation::GenerationResult;
use crate::models::job::JobPosting;
use crate::models::resume::ResumeProfile;

const MAX_SLUG_LEN: usize = 100;

#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the workspace and jobs directories if they do not exist.
    pub fn ensure_layout(&self) -> Result<(), AppError> {
        fs::create_dir_all(self.jobs_dir())?;
        Ok(())
    }

    pub fn resume_path(&self) -> PathBuf {
        self.root.join("resume.json")
    }

    pub fn jobs_dir(&self) -> PathBuf {
        self.root.join("jobs")
    }

    pub fn job_dir(&self, slug: &str) -> PathBuf {
        self.jobs_dir().join(slug)
    }

    pub fn posting_path(&self, slug: &str) -> PathBuf {
        self.job_dir(slug).join("posting.json")
    }

    pub fn generation_path(&self, slug: &str) -> PathBuf {
        self.job_dir(slug).join("generation.json")
    }

    /// Whether a résumé profile has been uploaded. This is the persisted
    /// session flag: it survives across runs and is only queried through the
    /// orchestrator boundary.
    pub fn resume_exists(&self) -> bool {
        self.resume_path().is_file()
    }

    /// Persists the singleton résumé profile, overwriting any prior one.
    pub fn save_resume(&self, profile: &ResumeProfile) -> Result<(), AppError> {
        self.ensure_layout()?;
        write_json(&self.resume_path(), profile)?;
        info!("Resume profile saved to {}", self.resume_path().display());
        Ok(())
    }

    pub fn load_resume(&self) -> Result<ResumeProfile, AppError> {
        let path = self.resume_path();
        if !path.is_file() {
            return Err(AppError::NotFound(
                "Resume not found. Please upload your resume first.".to_string(),
            ));
        }
        read_json(&path)
    }

    /// Reserves a unique job directory for `base_slug`, creating it.
    ///
    /// If the slug is already taken by a prior job, a numeric suffix is
    /// appended (`slug-1`, `slug-2`, ...) rather than overwriting — an
    /// existing job's artifacts must never be clobbered by a new registration.
    pub fn reserve_job_dir(&self, base_slug: &str) -> Result<String, AppError> {
        self.ensure_layout()?;

        let mut slug = base_slug.to_string();
        let mut counter = 1;
        while self.job_dir(&slug).exists() {
            slug = format!("{base_slug}-{counter}");
            counter += 1;
        }

        fs::create_dir_all(self.job_dir(&slug))?;
        info!("Created job folder: {}", self.job_dir(&slug).display());
        Ok(slug)
    }

    pub fn save_posting(&self, posting: &JobPosting) -> Result<(), AppError> {
        write_json(&self.posting_path(&posting.slug), posting)
    }

    pub fn load_posting(&self, slug: &str) -> Result<JobPosting, AppError> {
        let path = self.posting_path(slug);
        if !path.is_file() {
            return Err(AppError::NotFound(format!("Job data not found for: {slug}")));
        }
        read_json(&path)
    }

    /// Records the outcome of a generation run alongside its artifacts.
    pub fn record_generation(&self, result: &GenerationResult) -> Result<(), AppError> {
        write_json(&self.generation_path(&result.job_slug), result)
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::StorageWrite(format!("serialization failed: {e}")))?;
    fs::write(path, json)?;
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        AppError::StorageWrite(format!("corrupt record at {}: {e}", path.display()))
    })
}

/// Sanitizes text into a filesystem-safe slug: drops everything except
/// alphanumerics, underscores, whitespace and hyphens, collapses whitespace
/// and hyphen runs into single hyphens, trims edge hyphens, caps the length.
pub fn sanitize_slug(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut pending_hyphen = false;
    for c in kept.chars() {
        if c.is_whitespace() || c == '-' {
            pending_hyphen = !slug.is_empty();
        } else {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(c);
        }
    }

    slug.chars().take(MAX_SLUG_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::generation::GenerationStatus;
    use crate::models::resume::ContactInfo;
    use chrono::Utc;

    fn temp_workspace() -> (tempfile::TempDir, Workspace) {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::new(dir.path());
        (dir, ws)
    }

    fn sample_profile() -> ResumeProfile {
        ResumeProfile {
            contact_info: ContactInfo {
                full_name: "Ada Lovelace".to_string(),
                email: None,
                phone: None,
                location: None,
                linkedin: None,
                github: None,
                website: None,
            },
            summary: None,
            experience: vec![],
            education: vec![],
            projects: vec![],
            skills: vec![],
            certifications: vec![],
            raw_text: "Ada Lovelace".to_string(),
        }
    }

    #[test]
    fn test_sanitize_slug_strips_special_characters() {
        assert_eq!(
            sanitize_slug("Senior Engineer (Rust/C++) @ Acme!"),
            "Senior-Engineer-RustC-Acme"
        );
    }

    #[test]
    fn test_sanitize_slug_collapses_runs_and_trims() {
        assert_eq!(sanitize_slug("  --hello   world--  "), "hello-world");
    }

    #[test]
    fn test_sanitize_slug_caps_length() {
        let long = "a".repeat(300);
        assert_eq!(sanitize_slug(&long).len(), 100);
    }

    #[test]
    fn test_sanitize_slug_empty_input() {
        assert_eq!(sanitize_slug("!!!***"), "");
    }

    #[test]
    fn test_reserve_job_dir_disambiguates_collisions() {
        let (_dir, ws) = temp_workspace();
        let first = ws.reserve_job_dir("acme-engineer").unwrap();
        let second = ws.reserve_job_dir("acme-engineer").unwrap();
        let third = ws.reserve_job_dir("acme-engineer").unwrap();

        assert_eq!(first, "acme-engineer");
        assert_eq!(second, "acme-engineer-1");
        assert_eq!(third, "acme-engineer-2");
        assert!(ws.job_dir(&first).is_dir());
        assert!(ws.job_dir(&third).is_dir());
    }

    #[test]
    fn test_resume_save_load_round_trip() {
        let (_dir, ws) = temp_workspace();
        assert!(!ws.resume_exists());

        ws.save_resume(&sample_profile()).unwrap();
        assert!(ws.resume_exists());

        let loaded = ws.load_resume().unwrap();
        assert_eq!(loaded.contact_info.full_name, "Ada Lovelace");
    }

    #[test]
    fn test_save_resume_overwrites_prior_profile() {
        let (_dir, ws) = temp_workspace();
        ws.save_resume(&sample_profile()).unwrap();

        let mut updated = sample_profile();
        updated.contact_info.full_name = "Grace Hopper".to_string();
        ws.save_resume(&updated).unwrap();

        assert_eq!(ws.load_resume().unwrap().contact_info.full_name, "Grace Hopper");
    }

    #[test]
    fn test_load_resume_missing_is_not_found() {
        let (_dir, ws) = temp_workspace();
        match ws.load_resume() {
            Err(AppError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_posting_persists_before_load() {
        let (_dir, ws) = temp_workspace();
        let slug = ws.reserve_job_dir("acme-engineer").unwrap();
        let posting = JobPosting {
            slug: slug.clone(),
            raw_text: "Rust Engineer".to_string(),
            source_url: "https://acme.example/jobs/1".to_string(),
            captured_at: Utc::now(),
        };
        ws.save_posting(&posting).unwrap();

        let loaded = ws.load_posting(&slug).unwrap();
        assert_eq!(loaded.raw_text, "Rust Engineer");
    }

    #[test]
    fn test_record_generation_matches_result() {
        let (_dir, ws) = temp_workspace();
        let slug = ws.reserve_job_dir("acme-engineer").unwrap();
        let result = GenerationResult::latex_only(
            slug.clone(),
            vec![ws.job_dir(&slug).join("resume.tex")],
            "pdflatex not installed",
        );
        ws.record_generation(&result).unwrap();

        let raw = fs::read_to_string(ws.generation_path(&slug)).unwrap();
        let recorded: GenerationResult = serde_json::from_str(&raw).unwrap();
        assert_eq!(recorded.status, GenerationStatus::LatexOnly);
        assert_eq!(recorded.job_slug, slug);
    }
}
