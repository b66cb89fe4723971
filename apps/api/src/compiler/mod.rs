//! Document compiler boundary — turns typesetting sources into PDFs.
//!
//! The trait exists so the synthesis service can be tested without a TeX
//! install. The production implementation shells out to `pdflatex`. A
//! compilation failure is never fatal to a run; the caller downgrades to
//! `latex_only`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Per-pass deadline; a wedged pdflatex must not hang the run forever.
const COMPILE_TIMEOUT: Duration = Duration::from_secs(60);

/// Extensions of auxiliary files pdflatex leaves behind.
const AUX_EXTENSIONS: &[&str] = &["aux", "log", "out", "toc", "lof", "lot"];

#[derive(Debug, Error)]
pub enum CompilationError {
    #[error("pdflatex is not installed. Install TeX Live or MiKTeX to compile documents.")]
    Unavailable,

    #[error("compilation failed: {diagnostics}")]
    Failed { diagnostics: String },

    #[error("compilation timed out after {}s", COMPILE_TIMEOUT.as_secs())]
    Timeout,

    #[error("I/O error invoking compiler: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait DocumentCompiler: Send + Sync {
    /// Whether the compiler binary can be found at all. Probed once per run
    /// so a missing install degrades the whole run instead of failing the
    /// first compile with a confusing spawn error.
    async fn available(&self) -> bool;

    /// Compiles one `.tex` file, returning the path of the produced PDF.
    async fn compile(&self, tex_path: &Path) -> Result<PathBuf, CompilationError>;
}

/// Shells out to `pdflatex` in nonstop mode. Two passes to settle
/// references, auxiliary files cleaned up after success.
#[derive(Debug, Clone, Default)]
pub struct Pdflatex;

#[async_trait]
impl DocumentCompiler for Pdflatex {
    async fn available(&self) -> bool {
        which::which("pdflatex").is_ok()
    }

    async fn compile(&self, tex_path: &Path) -> Result<PathBuf, CompilationError> {
        if !tex_path.is_file() {
            return Err(CompilationError::Failed {
                diagnostics: format!("LaTeX file not found: {}", tex_path.display()),
            });
        }

        let work_dir = tex_path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = tex_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        info!("Compiling LaTeX file: {}", tex_path.display());

        // First pass may fail on unresolved references but still make progress.
        let first = run_pdflatex(work_dir, &file_name).await?;
        if !first.status.success() {
            warn!("pdflatex first pass exited nonzero for {file_name}");
        }
        let second = run_pdflatex(work_dir, &file_name).await?;

        let pdf_path = tex_path.with_extension("pdf");
        let produced = pdf_path
            .metadata()
            .map(|m| m.len() > 0)
            .unwrap_or(false);
        if !second.status.success() && !produced {
            return Err(CompilationError::Failed {
                diagnostics: diagnostics_tail(&second.stdout, &second.stderr),
            });
        }
        if !produced {
            return Err(CompilationError::Failed {
                diagnostics: "pdflatex did not produce a PDF file; the generated source likely \
                              has syntax errors"
                    .to_string(),
            });
        }

        cleanup_aux_files(tex_path);

        info!("Successfully compiled PDF: {}", pdf_path.display());
        Ok(pdf_path)
    }
}

async fn run_pdflatex(
    work_dir: &Path,
    file_name: &str,
) -> Result<std::process::Output, CompilationError> {
    let output = tokio::time::timeout(
        COMPILE_TIMEOUT,
        Command::new("pdflatex")
            .arg("-interaction=nonstopmode")
            .arg("-output-directory")
            .arg(work_dir)
            .arg(file_name)
            .current_dir(work_dir)
            .output(),
    )
    .await
    .map_err(|_| CompilationError::Timeout)??;
    Ok(output)
}

/// pdflatex writes its errors to stdout; keep the tail, which is where the
/// actual error lines end up.
fn diagnostics_tail(stdout: &[u8], stderr: &[u8]) -> String {
    let combined = if stdout.is_empty() { stderr } else { stdout };
    let text = String::from_utf8_lossy(combined);
    let tail_start = text.len().saturating_sub(2000);
    let boundary = text
        .char_indices()
        .map(|(i, _)| i)
        .find(|&i| i >= tail_start)
        .unwrap_or(0);
    text[boundary..].trim().to_string()
}

/// Removes auxiliary files left behind by pdflatex. Best-effort only.
fn cleanup_aux_files(tex_path: &Path) {
    for ext in AUX_EXTENSIONS {
        let aux = tex_path.with_extension(ext);
        if aux.is_file() {
            if let Err(e) = std::fs::remove_file(&aux) {
                warn!("Failed to remove auxiliary file {}: {e}", aux.display());
            } else {
                debug!("Removed auxiliary file: {}", aux.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_cleanup_removes_aux_files_but_not_sources() {
        let dir = tempfile::tempdir().unwrap();
        let tex = dir.path().join("resume.tex");
        fs::write(&tex, "\\documentclass{article}").unwrap();
        fs::write(dir.path().join("resume.aux"), "aux").unwrap();
        fs::write(dir.path().join("resume.log"), "log").unwrap();
        fs::write(dir.path().join("resume.pdf"), "%PDF-1.4").unwrap();

        cleanup_aux_files(&tex);

        assert!(tex.is_file());
        assert!(dir.path().join("resume.pdf").is_file());
        assert!(!dir.path().join("resume.aux").exists());
        assert!(!dir.path().join("resume.log").exists());
    }

    #[test]
    fn test_diagnostics_tail_prefers_stdout() {
        let tail = diagnostics_tail(b"! Undefined control sequence.", b"noise");
        assert_eq!(tail, "! Undefined control sequence.");
    }

    #[test]
    fn test_diagnostics_tail_truncates_long_output() {
        let long = "x".repeat(5000);
        let tail = diagnostics_tail(long.as_bytes(), b"");
        assert!(tail.len() <= 2000);
    }

    #[tokio::test]
    async fn test_compile_missing_file_fails_without_spawning() {
        let result = Pdflatex.compile(Path::new("/nonexistent/resume.tex")).await;
        match result {
            Err(CompilationError::Failed { diagnostics }) => {
                assert!(diagnostics.contains("not found"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
