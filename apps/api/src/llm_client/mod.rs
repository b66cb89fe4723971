/// LLM Client — the single point of entry for all Claude API calls in jobsmith.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// All LLM interactions MUST go through this module.
///
/// Calls are single-attempt: a failed or malformed response is surfaced to
/// the caller and never re-prompted. The only deadline is the transport
/// timeout on the HTTP client.
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::models::resume::ResumeProfile;
use crate::synthesis::content::{CoverLetter, TailoredResume};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls in jobsmith.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// The AI backend boundary. The pipeline only knows these three operations;
/// tests substitute fakes, production uses `LlmClient`.
#[async_trait]
pub trait AiBackend: Send + Sync {
    /// Parses extracted PDF text into a structured résumé profile.
    async fn parse_resume(&self, resume_text: &str) -> Result<ResumeProfile, AppError>;

    /// Produces tailored résumé content for the given posting.
    async fn tailor_resume(
        &self,
        resume: &ResumeProfile,
        job: &JobPosting,
    ) -> Result<TailoredResume, AppError>;

    /// Drafts cover letter content for the given posting.
    async fn draft_cover_letter(
        &self,
        resume: &ResumeProfile,
        job: &JobPosting,
    ) -> Result<CoverLetter, AppError>;
}

/// The single LLM client used by all services in jobsmith.
/// Wraps the Anthropic Messages API with structured output helpers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes a single call to the Claude API, returning the full response.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }

    /// Convenience method that calls the LLM and deserializes the text
    /// response as JSON. The prompt must instruct the model to return valid
    /// JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let response = self.call(prompt, system).await?;

        let text = response.text().ok_or(LlmError::EmptyContent)?;

        // Strip markdown code fences if the model wraps JSON in them
        let text = strip_json_fences(text);

        serde_json::from_str(text).map_err(LlmError::Parse)
    }
}

/// Maps transport-level failures to `Llm` and shape failures to
/// `SynthesisSchema` — a parse error is the AI backend violating the fixed
/// schema, which is terminal with no re-prompt.
fn schema_or_llm(context: &str, e: LlmError) -> AppError {
    match e {
        LlmError::Parse(pe) => AppError::SynthesisSchema(format!("{context}: {pe}")),
        LlmError::EmptyContent => AppError::SynthesisSchema(format!("{context}: empty content")),
        other => AppError::Llm(format!("{context}: {other}")),
    }
}

#[async_trait]
impl AiBackend for LlmClient {
    async fn parse_resume(&self, resume_text: &str) -> Result<ResumeProfile, AppError> {
        let prompt = prompts::RESUME_PARSE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
        self.call_json(&prompt, prompts::RESUME_PARSE_SYSTEM)
            .await
            .map_err(|e| schema_or_llm("resume parse", e))
    }

    async fn tailor_resume(
        &self,
        resume: &ResumeProfile,
        job: &JobPosting,
    ) -> Result<TailoredResume, AppError> {
        let prompt = build_job_prompt(prompts::TAILOR_RESUME_PROMPT_TEMPLATE, resume, job)?;
        self.call_json(&prompt, prompts::TAILOR_RESUME_SYSTEM)
            .await
            .map_err(|e| schema_or_llm("resume tailoring", e))
    }

    async fn draft_cover_letter(
        &self,
        resume: &ResumeProfile,
        job: &JobPosting,
    ) -> Result<CoverLetter, AppError> {
        let prompt = build_job_prompt(prompts::COVER_LETTER_PROMPT_TEMPLATE, resume, job)?;
        self.call_json(&prompt, prompts::COVER_LETTER_SYSTEM)
            .await
            .map_err(|e| schema_or_llm("cover letter drafting", e))
    }
}

/// Fills a generation template with the serialized profile and posting.
fn build_job_prompt(
    template: &str,
    resume: &ResumeProfile,
    job: &JobPosting,
) -> Result<String, AppError> {
    let resume_json = serde_json::to_string_pretty(resume)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize profile: {e}")))?;

    Ok(template
        .replace("{resume_json}", &resume_json)
        .replace("{job_url}", &job.source_url)
        .replace("{job_text}", &job.raw_text))
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
