//! Résumé profile — the structured representation of one user's résumé.
//!
//! Singleton per installation: created on first successful upload, overwritten
//! (not versioned) on re-upload. Owned by the workspace store, read by the
//! synthesis service. Every collection field defaults so a sparse AI parse
//! still deserializes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field_of_study: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub gpa: Option<String>,
    #[serde(default)]
    pub honors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// A named skill category, e.g. "Languages" → ["Rust", "Python"].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    #[serde(default)]
    pub issue_date: Option<String>,
}

/// Complete résumé profile. `raw_text` preserves the extracted PDF text so
/// the synthesis prompt can fall back to it for detail the parse flattened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub certifications: Vec<CertificationEntry>,
    #[serde(default)]
    pub raw_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_profile_deserializes_with_defaults() {
        // Only contact_info is required; the AI parse may omit everything else.
        let json = r#"{
            "contact_info": {"full_name": "Ada Lovelace"}
        }"#;
        let profile: ResumeProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.contact_info.full_name, "Ada Lovelace");
        assert!(profile.experience.is_empty());
        assert!(profile.summary.is_none());
        assert!(profile.raw_text.is_empty());
    }

    #[test]
    fn test_full_profile_round_trips() {
        let profile = ResumeProfile {
            contact_info: ContactInfo {
                full_name: "Ada Lovelace".to_string(),
                email: Some("ada@example.com".to_string()),
                phone: None,
                location: Some("London".to_string()),
                linkedin: None,
                github: Some("github.com/ada".to_string()),
                website: None,
            },
            summary: Some("Analytical engine programmer".to_string()),
            experience: vec![ExperienceEntry {
                company: "Analytical Engines Ltd".to_string(),
                position: "Lead Programmer".to_string(),
                location: None,
                start_date: Some("1842".to_string()),
                end_date: None,
                current: true,
                highlights: vec!["Wrote the first published algorithm".to_string()],
                technologies: vec!["Bernoulli numbers".to_string()],
            }],
            education: vec![],
            projects: vec![],
            skills: vec![SkillGroup {
                category: "Mathematics".to_string(),
                items: vec!["Calculus".to_string()],
            }],
            certifications: vec![],
            raw_text: "Ada Lovelace, Lead Programmer".to_string(),
        };

        let json = serde_json::to_string(&profile).unwrap();
        let recovered: ResumeProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered.contact_info.full_name, "Ada Lovelace");
        assert_eq!(recovered.experience.len(), 1);
        assert!(recovered.experience[0].current);
        assert_eq!(recovered.skills[0].items, vec!["Calculus"]);
    }
}
