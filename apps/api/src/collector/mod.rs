//! Posting capture collector boundary.
//!
//! The actual capture runs inside the browser extension; the core only
//! consumes its output contract. Readiness is an explicit tri-state
//! capability check — never inferred from error text. An empty `raw_text` is
//! a captured-but-invalid result that flows on to the registrar, not a
//! collector failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Can the collector reach the current page context?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Collector can be injected and run.
    Ready,
    /// The current page cannot be accessed (restricted page, no tab, ...).
    Unavailable,
    /// A collector is already injected in this context; capture can proceed
    /// without injecting again.
    AlreadyActive,
}

/// Raw visible text and origin URL of the captured page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedPage {
    pub raw_text: String,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("collector unreachable: {0}")]
    Unreachable(String),

    #[error("page inaccessible: {0}")]
    PageInaccessible(String),
}

#[async_trait]
pub trait PageCollector: Send + Sync {
    async fn readiness(&self) -> Readiness;

    async fn collect(&self) -> Result<CapturedPage, CollectorError>;
}

/// Collector backed by a capture the extension already performed and posted
/// over HTTP. Always ready; `collect` hands back the payload as-is (including
/// an empty `raw_text`, which downstream treats as `ExtractionEmpty`).
#[derive(Debug, Clone)]
pub struct ProvidedCapture {
    page: CapturedPage,
}

impl ProvidedCapture {
    pub fn new(page: CapturedPage) -> Self {
        Self { page }
    }
}

#[async_trait]
impl PageCollector for ProvidedCapture {
    async fn readiness(&self) -> Readiness {
        Readiness::Ready
    }

    async fn collect(&self) -> Result<CapturedPage, CollectorError> {
        Ok(self.page.clone())
    }
}
