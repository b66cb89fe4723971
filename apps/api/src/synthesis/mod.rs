//! Synthesis service — turns (résumé profile, job posting) into tailored
//! documents.
//!
//! Flow: AI tailoring → schema validation → deterministic LaTeX rendering →
//! write sources → compile → record result.
//!
//! Strictly sequential; each stage feeds the next. A schema violation is
//! terminal and leaves nothing under the job slug. A compilation failure is
//! the one deliberate degrade: the run finishes as `latex_only` with the
//! uncompiled sources as artifacts, so the user can still compile by hand.

pub mod content;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::compiler::{CompilationError, DocumentCompiler};
use crate::errors::AppError;
use crate::llm_client::AiBackend;
use crate::models::generation::GenerationResult;
use crate::models::job::JobPosting;
use crate::models::resume::ResumeProfile;
use crate::render;
use crate::workspace::Workspace;

#[derive(Clone)]
pub struct SynthesisService {
    backend: Arc<dyn AiBackend>,
    compiler: Arc<dyn DocumentCompiler>,
    workspace: Workspace,
}

impl SynthesisService {
    pub fn new(
        backend: Arc<dyn AiBackend>,
        compiler: Arc<dyn DocumentCompiler>,
        workspace: Workspace,
    ) -> Self {
        Self {
            backend,
            compiler,
            workspace,
        }
    }

    /// Runs the full synthesis pipeline for one job.
    ///
    /// Returns `Ok` with `completed` or `latex_only` status; any other stage
    /// failure is an `Err`. Re-generation for the same slug overwrites
    /// artifacts, it never merges or deletes.
    pub async fn synthesize(
        &self,
        resume: &ResumeProfile,
        job: &JobPosting,
    ) -> Result<GenerationResult, AppError> {
        // Stage 1: structured content from the AI backend. Both documents are
        // validated before anything touches the job directory, so a schema
        // failure writes no files.
        info!("Generating tailored resume content for {}", job.slug);
        let tailored = self.backend.tailor_resume(resume, job).await?;
        tailored.validate().map_err(AppError::SynthesisSchema)?;

        info!("Generating cover letter content for {}", job.slug);
        let letter = self.backend.draft_cover_letter(resume, job).await?;
        letter.validate().map_err(AppError::SynthesisSchema)?;

        // Stage 2: deterministic rendering, owned by the core.
        let resume_src = render::resume_to_latex(&tailored);
        let letter_src = render::cover_letter_to_latex(&letter);

        let job_dir = self.workspace.job_dir(&job.slug);
        let resume_tex = job_dir.join("resume.tex");
        let letter_tex = job_dir.join("cover_letter.tex");
        fs::write(&resume_tex, resume_src)?;
        fs::write(&letter_tex, letter_src)?;
        info!("Typesetting sources written under {}", job_dir.display());

        // Stage 3: compilation — the one stage allowed to degrade.
        let result = if !self.compiler.available().await {
            warn!("Document compiler unavailable — returning LaTeX sources only");
            GenerationResult::latex_only(
                job.slug.clone(),
                vec![resume_tex, letter_tex],
                "pdflatex is not installed. LaTeX sources were generated but PDFs could not \
                 be compiled.",
            )
        } else {
            match self.compile_both(&resume_tex, &letter_tex).await {
                Ok(pdfs) => self.completed_if_artifacts_exist(job, pdfs, resume_tex, letter_tex),
                Err(e) => {
                    warn!("Compilation failed for {}: {e}", job.slug);
                    GenerationResult::latex_only(
                        job.slug.clone(),
                        vec![resume_tex, letter_tex],
                        e.to_string(),
                    )
                }
            }
        };

        self.workspace.record_generation(&result)?;
        Ok(result)
    }

    async fn compile_both(
        &self,
        resume_tex: &PathBuf,
        letter_tex: &PathBuf,
    ) -> Result<Vec<PathBuf>, CompilationError> {
        let resume_pdf = self.compiler.compile(resume_tex).await?;
        let letter_pdf = self.compiler.compile(letter_tex).await?;
        Ok(vec![resume_pdf, letter_pdf])
    }

    /// `completed` is only ever recorded with every artifact present and
    /// non-empty on disk, whatever the compiler implementation claims.
    fn completed_if_artifacts_exist(
        &self,
        job: &JobPosting,
        pdfs: Vec<PathBuf>,
        resume_tex: PathBuf,
        letter_tex: PathBuf,
    ) -> GenerationResult {
        let all_present = pdfs
            .iter()
            .all(|p| p.metadata().map(|m| m.len() > 0).unwrap_or(false));
        if all_present {
            GenerationResult::completed(job.slug.clone(), pdfs)
        } else {
            warn!("Compiler reported success but artifacts are missing or empty");
            GenerationResult::latex_only(
                job.slug.clone(),
                vec![resume_tex, letter_tex],
                "compiler reported success but produced no usable PDF output",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::content::{CoverLetter, ResumeSection, SectionItem, TailoredResume};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::path::Path;

    // ── Fakes ───────────────────────────────────────────────────────────────

    struct FakeBackend {
        resume: TailoredResume,
        letter: CoverLetter,
    }

    #[async_trait]
    impl AiBackend for FakeBackend {
        async fn parse_resume(&self, _text: &str) -> Result<ResumeProfile, AppError> {
            unimplemented!("not used by synthesis")
        }

        async fn tailor_resume(
            &self,
            _resume: &ResumeProfile,
            _job: &JobPosting,
        ) -> Result<TailoredResume, AppError> {
            Ok(self.resume.clone())
        }

        async fn draft_cover_letter(
            &self,
            _resume: &ResumeProfile,
            _job: &JobPosting,
        ) -> Result<CoverLetter, AppError> {
            Ok(self.letter.clone())
        }
    }

    struct FakeCompiler {
        succeed: bool,
        installed: bool,
    }

    #[async_trait]
    impl DocumentCompiler for FakeCompiler {
        async fn available(&self) -> bool {
            self.installed
        }

        async fn compile(&self, tex_path: &Path) -> Result<PathBuf, CompilationError> {
            if self.succeed {
                let pdf = tex_path.with_extension("pdf");
                fs::write(&pdf, b"%PDF-1.4 fake").unwrap();
                Ok(pdf)
            } else {
                Err(CompilationError::Failed {
                    diagnostics: "! Undefined control sequence.".to_string(),
                })
            }
        }
    }

    // ── Fixtures ────────────────────────────────────────────────────────────

    fn valid_tailored() -> TailoredResume {
        TailoredResume {
            full_name: "Jane Doe".to_string(),
            contact_line: "jane@example.com".to_string(),
            headline: None,
            summary: None,
            sections: vec![ResumeSection {
                heading: "Experience".to_string(),
                items: vec![SectionItem {
                    title: "Engineer".to_string(),
                    subtitle: None,
                    date_range: None,
                    bullets: vec!["Shipped the thing".to_string()],
                }],
            }],
        }
    }

    fn valid_letter() -> CoverLetter {
        CoverLetter {
            recipient_line: None,
            date_line: None,
            greeting: "Dear Team,".to_string(),
            paragraphs: vec!["I would like to apply.".to_string()],
            closing: "Sincerely,".to_string(),
            signature: "Jane Doe".to_string(),
        }
    }

    fn profile() -> ResumeProfile {
        serde_json::from_str(r#"{"contact_info": {"full_name": "Jane Doe"}}"#).unwrap()
    }

    fn setup(
        resume: TailoredResume,
        letter: CoverLetter,
        compiler: FakeCompiler,
    ) -> (tempfile::TempDir, SynthesisService, Workspace, JobPosting) {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::new(dir.path());
        let slug = ws.reserve_job_dir("acme-engineer").unwrap();
        let job = JobPosting {
            slug,
            raw_text: "Rust Engineer at Acme".to_string(),
            source_url: "https://acme.example/jobs/1".to_string(),
            captured_at: Utc::now(),
        };
        let service = SynthesisService::new(
            Arc::new(FakeBackend { resume, letter }),
            Arc::new(compiler),
            ws.clone(),
        );
        (dir, service, ws, job)
    }

    // ── Tests ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_full_success_is_completed_with_existing_artifacts() {
        let (_dir, service, ws, job) = setup(
            valid_tailored(),
            valid_letter(),
            FakeCompiler {
                succeed: true,
                installed: true,
            },
        );

        let result = service.synthesize(&profile(), &job).await.unwrap();

        assert_eq!(result.status, crate::models::generation::GenerationStatus::Completed);
        assert_eq!(result.artifact_paths.len(), 2);
        for path in &result.artifact_paths {
            assert!(path.metadata().map(|m| m.len() > 0).unwrap_or(false));
        }
        // Sources are written alongside the PDFs.
        assert!(ws.job_dir(&job.slug).join("resume.tex").is_file());
        assert!(ws.job_dir(&job.slug).join("cover_letter.tex").is_file());
    }

    #[tokio::test]
    async fn test_compiler_failure_degrades_to_latex_only() {
        let (_dir, service, ws, job) = setup(
            valid_tailored(),
            valid_letter(),
            FakeCompiler {
                succeed: false,
                installed: true,
            },
        );

        let result = service.synthesize(&profile(), &job).await.unwrap();

        assert_eq!(result.status, crate::models::generation::GenerationStatus::LatexOnly);
        assert!(result.error.as_deref().unwrap().contains("Undefined control sequence"));
        // Sources present, PDFs absent.
        assert!(ws.job_dir(&job.slug).join("resume.tex").is_file());
        assert!(!ws.job_dir(&job.slug).join("resume.pdf").exists());
    }

    #[tokio::test]
    async fn test_missing_compiler_degrades_to_latex_only() {
        let (_dir, service, _ws, job) = setup(
            valid_tailored(),
            valid_letter(),
            FakeCompiler {
                succeed: true,
                installed: false,
            },
        );

        let result = service.synthesize(&profile(), &job).await.unwrap();

        assert_eq!(result.status, crate::models::generation::GenerationStatus::LatexOnly);
        assert!(result.error.as_deref().unwrap().contains("not installed"));
        assert!(result
            .artifact_paths
            .iter()
            .all(|p| p.extension().map(|e| e == "tex").unwrap_or(false)));
    }

    #[tokio::test]
    async fn test_schema_violation_is_terminal_and_writes_nothing() {
        let mut bad = valid_tailored();
        bad.sections.clear();
        let (_dir, service, ws, job) = setup(
            bad,
            valid_letter(),
            FakeCompiler {
                succeed: true,
                installed: true,
            },
        );

        let err = service.synthesize(&profile(), &job).await.unwrap_err();
        match err {
            AppError::SynthesisSchema(_) => {}
            other => panic!("expected SynthesisSchema, got {other:?}"),
        }

        // Nothing beyond the registration record may exist under the slug.
        assert!(!ws.job_dir(&job.slug).join("resume.tex").exists());
        assert!(!ws.job_dir(&job.slug).join("cover_letter.tex").exists());
        assert!(!ws.generation_path(&job.slug).exists());
    }

    #[tokio::test]
    async fn test_overlong_letter_is_schema_violation_before_any_write() {
        let mut letter = valid_letter();
        letter.paragraphs = vec!["p".to_string(); 5];
        let (_dir, service, ws, job) = setup(
            valid_tailored(),
            letter,
            FakeCompiler {
                succeed: true,
                installed: true,
            },
        );

        assert!(matches!(
            service.synthesize(&profile(), &job).await,
            Err(AppError::SynthesisSchema(_))
        ));
        assert!(!ws.job_dir(&job.slug).join("resume.tex").exists());
    }

    #[tokio::test]
    async fn test_result_is_recorded_next_to_artifacts() {
        let (_dir, service, ws, job) = setup(
            valid_tailored(),
            valid_letter(),
            FakeCompiler {
                succeed: true,
                installed: true,
            },
        );

        let result = service.synthesize(&profile(), &job).await.unwrap();

        let raw = fs::read_to_string(ws.generation_path(&job.slug)).unwrap();
        let recorded: GenerationResult = serde_json::from_str(&raw).unwrap();
        assert_eq!(recorded.status, result.status);
        assert_eq!(recorded.artifact_paths, result.artifact_paths);
    }

    #[tokio::test]
    async fn test_regeneration_overwrites_sources_for_same_slug() {
        let (_dir, service, ws, job) = setup(
            valid_tailored(),
            valid_letter(),
            FakeCompiler {
                succeed: true,
                installed: true,
            },
        );

        service.synthesize(&profile(), &job).await.unwrap();
        let first = fs::read_to_string(ws.job_dir(&job.slug).join("resume.tex")).unwrap();
        service.synthesize(&profile(), &job).await.unwrap();
        let second = fs::read_to_string(ws.job_dir(&job.slug).join("resume.tex")).unwrap();

        // Deterministic rendering: overwrite produces identical bytes.
        assert_eq!(first, second);
    }
}
