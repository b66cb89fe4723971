//! Job posting record — created once per generation request, immutable after
//! creation, identified externally by `slug`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    /// Filesystem-safe unique identifier; doubles as the job directory name.
    pub slug: String,
    /// Full visible text captured from the posting page.
    pub raw_text: String,
    /// URL of the page the text was captured from.
    pub source_url: String,
    pub captured_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_round_trips() {
        let posting = JobPosting {
            slug: "acme-rust-engineer".to_string(),
            raw_text: "Senior Rust Engineer at Acme".to_string(),
            source_url: "https://acme.example/careers/rust".to_string(),
            captured_at: Utc::now(),
        };
        let json = serde_json::to_string(&posting).unwrap();
        let recovered: JobPosting = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered.slug, posting.slug);
        assert_eq!(recovered.source_url, posting.source_url);
        assert_eq!(recovered.captured_at, posting.captured_at);
    }
}
