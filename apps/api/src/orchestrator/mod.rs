//! Orchestrator — the client-facing state machine driving
//! capture → registration → synthesis as one logical operation.
//!
//! One state variable, pure transitions, single in-flight run. A trigger
//! while a run is active is ignored; terminal states reset to `Idle` on the
//! next trigger. Every stage failure maps 1:1 to a `Failed(reason)` with a
//! user-visible message, and a `latex_only` synthesis result surfaces as
//! success with a distinct partial-completion message.

pub mod handlers;

use std::sync::Mutex;

use serde::Serialize;
use tracing::{info, warn};

use crate::collector::{PageCollector, Readiness};
use crate::errors::AppError;
use crate::models::generation::{GenerationResult, GenerationStatus};
use crate::registrar::Registrar;
use crate::synthesis::SynthesisService;
use crate::workspace::Workspace;

// ────────────────────────────────────────────────────────────────────────────
// State machine
// ────────────────────────────────────────────────────────────────────────────

/// Why a run ended in `Failed`. Owned strings so the state stays `Clone`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The page context could not be reached — the only environment failure.
    AccessDenied(String),
    ExtractionEmpty,
    StorageWrite(String),
    SynthesisSchema(String),
    AiBackend(String),
    NoResume,
    Internal(String),
}

impl FailureReason {
    /// User-facing remediation message.
    pub fn message(&self) -> String {
        match self {
            FailureReason::AccessDenied(detail) => format!(
                "Could not read the current page ({detail}). Open the job posting in a normal \
                 browser tab and try again."
            ),
            FailureReason::ExtractionEmpty => {
                "The page contained no readable job posting text.".to_string()
            }
            FailureReason::StorageWrite(detail) => {
                format!("Could not save to the workspace: {detail}")
            }
            FailureReason::SynthesisSchema(detail) => format!(
                "The AI backend returned malformed document content ({detail}). Trigger a new \
                 run to try again."
            ),
            FailureReason::AiBackend(detail) => format!("AI processing failed: {detail}"),
            FailureReason::NoResume => {
                "No resume uploaded yet. Upload your resume before generating.".to_string()
            }
            FailureReason::Internal(detail) => format!("Unexpected error: {detail}"),
        }
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            FailureReason::AccessDenied(d) => AppError::AccessDenied(d),
            FailureReason::ExtractionEmpty => AppError::ExtractionEmpty,
            FailureReason::StorageWrite(d) => AppError::StorageWrite(d),
            FailureReason::SynthesisSchema(d) => AppError::SynthesisSchema(d),
            FailureReason::AiBackend(d) => AppError::Llm(d),
            FailureReason::NoResume => AppError::Validation(
                "No resume uploaded yet. Upload your resume before generating.".to_string(),
            ),
            FailureReason::Internal(d) => AppError::Internal(anyhow::anyhow!(d)),
        }
    }
}

impl From<AppError> for FailureReason {
    fn from(e: AppError) -> Self {
        match e {
            AppError::AccessDenied(d) => FailureReason::AccessDenied(d),
            AppError::ExtractionEmpty => FailureReason::ExtractionEmpty,
            AppError::StorageWrite(d) => FailureReason::StorageWrite(d),
            AppError::SynthesisSchema(d) => FailureReason::SynthesisSchema(d),
            AppError::Llm(d) => FailureReason::AiBackend(d),
            AppError::NotFound(d) | AppError::Validation(d) => FailureReason::Internal(d),
            AppError::Internal(e) => FailureReason::Internal(e.to_string()),
        }
    }
}

/// The single user-visible run state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Idle,
    CapturingPosting,
    RegisteringPosting,
    Synthesizing,
    Success,
    Failed(FailureReason),
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Success | RunState::Failed(_))
    }

    /// A new trigger is accepted only from `Idle` or a terminal state.
    pub fn accepts_trigger(&self) -> bool {
        matches!(self, RunState::Idle) || self.is_terminal()
    }
}

/// Events driving the state machine.
#[derive(Debug, Clone)]
pub enum RunEvent {
    Triggered,
    Captured,
    Registered,
    Finished,
    Errored(FailureReason),
}

/// Pure transition function. Illegal (state, event) pairs leave the state
/// unchanged — the caller already ignored the trigger.
pub fn apply(state: &RunState, event: RunEvent) -> RunState {
    match (state, event) {
        (s, RunEvent::Triggered) if s.accepts_trigger() => RunState::CapturingPosting,
        (RunState::CapturingPosting, RunEvent::Captured) => RunState::RegisteringPosting,
        (RunState::RegisteringPosting, RunEvent::Registered) => RunState::Synthesizing,
        (RunState::Synthesizing, RunEvent::Finished) => RunState::Success,
        (s, RunEvent::Errored(reason)) if !s.is_terminal() && *s != RunState::Idle => {
            RunState::Failed(reason)
        }
        (s, _) => s.clone(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ────────────────────────────────────────────────────────────────────────────

/// Persisted session state, queried explicitly — never ambient globals.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub resume_ready: bool,
}

/// Successful run outcome: the generation result plus the display message
/// (distinct for partial completion).
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub result: GenerationResult,
    pub message: String,
}

/// Response to a trigger. `Ignored` means a run was already in flight.
#[derive(Debug)]
pub enum TriggerResponse {
    Ignored,
    Finished(RunOutcome),
    Failed(FailureReason),
}

pub struct Orchestrator {
    workspace: Workspace,
    registrar: Registrar,
    synthesis: SynthesisService,
    state: Mutex<RunState>,
}

impl Orchestrator {
    pub fn new(workspace: Workspace, registrar: Registrar, synthesis: SynthesisService) -> Self {
        Self {
            workspace,
            registrar,
            synthesis,
            state: Mutex::new(RunState::Idle),
        }
    }

    /// Snapshot of the current run state.
    pub fn state(&self) -> RunState {
        self.lock_state().clone()
    }

    /// Explicit session-state query: has a résumé been uploaded?
    pub fn session(&self) -> SessionState {
        SessionState {
            resume_ready: self.workspace.resume_exists(),
        }
    }

    /// Drives one full generation run. Enforces mutual exclusion: if a run is
    /// active the trigger is ignored and the caller disables its UI control.
    pub async fn trigger(&self, collector: &dyn PageCollector) -> TriggerResponse {
        {
            let mut state = self.lock_state();
            if !state.accepts_trigger() {
                warn!("Generation trigger ignored: run already in flight ({state:?})");
                return TriggerResponse::Ignored;
            }
            // Terminal states reset to Idle before the new run begins; no
            // stale state leaks between runs.
            *state = RunState::Idle;
            *state = apply(&state, RunEvent::Triggered);
        }

        match self.run(collector).await {
            Ok(outcome) => {
                self.advance(RunEvent::Finished);
                TriggerResponse::Finished(outcome)
            }
            Err(reason) => {
                warn!("Generation run failed: {}", reason.message());
                self.advance(RunEvent::Errored(reason.clone()));
                TriggerResponse::Failed(reason)
            }
        }
    }

    async fn run(&self, collector: &dyn PageCollector) -> Result<RunOutcome, FailureReason> {
        // Generation is rejected before any network call when no profile
        // exists.
        if !self.workspace.resume_exists() {
            return Err(FailureReason::NoResume);
        }

        // Capture. Unavailable is the one environment failure; an already
        // active collector is as good as a ready one.
        match collector.readiness().await {
            Readiness::Unavailable => {
                return Err(FailureReason::AccessDenied(
                    "the collector cannot reach the current page".to_string(),
                ))
            }
            Readiness::Ready | Readiness::AlreadyActive => {}
        }
        let page = collector
            .collect()
            .await
            .map_err(|e| FailureReason::AccessDenied(e.to_string()))?;
        self.advance(RunEvent::Captured);

        // Registration. Empty captured text fails here as ExtractionEmpty.
        let posting = self
            .registrar
            .register(&page.raw_text, &page.url)
            .map_err(FailureReason::from)?;
        self.advance(RunEvent::Registered);

        // Synthesis.
        let profile = self.workspace.load_resume().map_err(FailureReason::from)?;
        let result = self
            .synthesis
            .synthesize(&profile, &posting)
            .await
            .map_err(FailureReason::from)?;

        let message = match result.status {
            GenerationStatus::Completed => {
                "Tailored resume and cover letter generated.".to_string()
            }
            GenerationStatus::LatexOnly => format!(
                "Documents were generated but PDF compilation did not succeed ({}). The LaTeX \
                 sources are available for manual compilation.",
                result.error.as_deref().unwrap_or("unknown compiler error")
            ),
            GenerationStatus::Failed => {
                // synthesize() returns Err for failures; this arm is unreachable
                // but kept total.
                result.error.clone().unwrap_or_default()
            }
        };

        info!(
            "Generation run finished for {} with status {:?}",
            result.job_slug, result.status
        );
        Ok(RunOutcome { result, message })
    }

    fn advance(&self, event: RunEvent) {
        let mut state = self.lock_state();
        *state = apply(&state, event);
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, RunState> {
        // A poisoned lock only means a panicking test thread; the state value
        // itself is always valid.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
