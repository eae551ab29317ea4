//! Job posting analysis: matches the field's skill keywords against a job
//! description and gathers the responsibilities, values and industry terms
//! the résumé variants are tailored to.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::fields::catalog::{industry_keywords, job_config};
use crate::fields::{mentions, title_case, FieldTag};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    #[default]
    EntryMid,
    Mid,
}

impl ExperienceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::EntryMid => "Entry-Mid Level",
            ExperienceLevel::Mid => "Mid-Level",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAnalysis {
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub key_responsibilities: Vec<String>,
    pub company_values: Vec<String>,
    pub industry_keywords: Vec<String>,
    pub experience_level: ExperienceLevel,
    pub role_type: String,
}

const REQUIRED_SKILL_COUNT: usize = 8;
const PREFERRED_SKILL_COUNT: usize = 7;
/// Skills reported when the posting mentions none of the field's keywords.
const FALLBACK_SKILL_COUNT: usize = 3;
const COMPANY_VALUES: &[&str] = &["Innovation", "Collaboration", "Excellence", "Growth"];

/// Analyzes `job_description` for an already-detected `field`.
pub fn analyze_job_posting(job_description: &str, role: &str, field: &FieldTag) -> JobAnalysis {
    let job_text = job_description.to_lowercase();
    let config = job_config(field);

    let mut skills: Vec<String> = config
        .skills
        .iter()
        .filter(|skill| mentions(&job_text, skill))
        .map(|skill| title_case(skill))
        .collect();

    if skills.is_empty() {
        skills = config
            .skills
            .iter()
            .take(FALLBACK_SKILL_COUNT)
            .map(|skill| title_case(skill))
            .collect();
    }

    let preferred_skills = skills
        .iter()
        .skip(REQUIRED_SKILL_COUNT)
        .take(PREFERRED_SKILL_COUNT)
        .cloned()
        .collect();
    skills.truncate(REQUIRED_SKILL_COUNT);

    let analysis = JobAnalysis {
        required_skills: skills,
        preferred_skills,
        key_responsibilities: config.responsibilities,
        company_values: COMPANY_VALUES.iter().map(|v| v.to_string()).collect(),
        industry_keywords: industry_keywords(field),
        experience_level: if job_text.contains("senior") {
            ExperienceLevel::Mid
        } else {
            ExperienceLevel::EntryMid
        },
        role_type: role.to_string(),
    };

    info!(
        field = %field,
        required = %analysis.required_skills.join(", "),
        level = %analysis.experience_level,
        "job analysis complete"
    );
    analysis
}
