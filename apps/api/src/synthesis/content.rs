//! Fixed content schemas for AI-generated documents.
//!
//! The AI backend returns plain-text structured content matching these shapes;
//! any deviation — missing fields, empty sections, an over-long letter — is a
//! schema violation and terminal for the run. Rendering to LaTeX happens
//! downstream in `render`, never in the model.

use serde::{Deserialize, Serialize};

/// Body paragraph cap for cover letters. More than this reads as padding and
/// is rejected as a schema violation.
pub const MAX_LETTER_PARAGRAPHS: usize = 4;

/// Tailored résumé content: a flat ordered list of sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoredResume {
    pub full_name: String,
    /// Single line of contact details, pipe-separated.
    pub contact_line: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub sections: Vec<ResumeSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeSection {
    pub heading: String,
    pub items: Vec<SectionItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionItem {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub date_range: Option<String>,
    pub bullets: Vec<String>,
}

/// Cover letter content: greeting, bounded body, closing, signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverLetter {
    #[serde(default)]
    pub recipient_line: Option<String>,
    #[serde(default)]
    pub date_line: Option<String>,
    pub greeting: String,
    pub paragraphs: Vec<String>,
    pub closing: String,
    pub signature: String,
}

impl TailoredResume {
    /// Semantic schema checks beyond what deserialization enforces.
    pub fn validate(&self) -> Result<(), String> {
        if self.full_name.trim().is_empty() {
            return Err("full_name is empty".to_string());
        }
        if self.sections.is_empty() {
            return Err("resume has no sections".to_string());
        }
        for section in &self.sections {
            if section.heading.trim().is_empty() {
                return Err("section with empty heading".to_string());
            }
            if section.items.is_empty() {
                return Err(format!("section '{}' has no items", section.heading));
            }
            for item in &section.items {
                if item.title.trim().is_empty() {
                    return Err(format!(
                        "item with empty title in section '{}'",
                        section.heading
                    ));
                }
                if item.bullets.iter().all(|b| b.trim().is_empty()) {
                    return Err(format!(
                        "item '{}' has no non-empty bullets",
                        item.title
                    ));
                }
            }
        }
        Ok(())
    }
}

impl CoverLetter {
    pub fn validate(&self) -> Result<(), String> {
        if self.greeting.trim().is_empty() {
            return Err("greeting is empty".to_string());
        }
        if self.paragraphs.is_empty() {
            return Err("letter has no body paragraphs".to_string());
        }
        if self.paragraphs.len() > MAX_LETTER_PARAGRAPHS {
            return Err(format!(
                "letter has {} paragraphs (max {MAX_LETTER_PARAGRAPHS})",
                self.paragraphs.len()
            ));
        }
        if self.paragraphs.iter().any(|p| p.trim().is_empty()) {
            return Err("letter contains an empty paragraph".to_string());
        }
        if self.signature.trim().is_empty() {
            return Err("signature is empty".to_string());
        }
        Ok(())
    }
}
