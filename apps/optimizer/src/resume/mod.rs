//! Résumé text understanding: section headers and best-effort field extraction.

pub mod extractor;
pub mod sections;

use serde::{Deserialize, Serialize};

pub use extractor::extract_resume_information;

/// What could be recovered from a free-form résumé. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeInfo {
    pub name: String,
    pub contact_info: Vec<String>,
    pub experience: Vec<String>,
    pub skills: Vec<String>,
    /// Education lines joined with `\n`.
    pub education: String,
    pub projects: Vec<String>,
}

impl ResumeInfo {
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
