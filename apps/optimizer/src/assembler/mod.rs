//! Résumé Assembler: turns a job description and a résumé into the full set
//! of optimized variants.
//!
//! The career field is detected exactly once per request and threaded
//! explicitly through every stage; nothing here prompts or prints.

pub mod stages;
pub mod styles;

use std::collections::BTreeMap;
use std::fmt;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::{analyze_job_posting, JobAnalysis};
use crate::errors::AppError;
use crate::fields::catalog::is_predefined;
use crate::fields::{classify, get_field_data, Detection, DetectionSource, FieldData, FieldTag};
use crate::resume::{extract_resume_information, ResumeInfo};
use crate::story::{generate_personalized_story, StoryElements};

// ────────────────────────────────────────────────────────────────────────────
// Styles and stage keys
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeStyle {
    #[default]
    Narrative = 1,
    Standard = 2,
    Combined = 3,
}

impl ResumeStyle {
    /// Parses the numeric menu choice (`1`, `2` or `3`).
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(ResumeStyle::Narrative),
            "2" => Some(ResumeStyle::Standard),
            "3" => Some(ResumeStyle::Combined),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResumeStyle::Narrative => "Narrative Storytelling",
            ResumeStyle::Standard => "Enhanced Standard",
            ResumeStyle::Combined => "Combined Storytelling + Standard",
        }
    }

    /// Stage holding the variant used for the DOCX and the skill coverage count.
    pub fn primary_stage(&self) -> StageKey {
        match self {
            ResumeStyle::Narrative => StageKey::NarrativeResume,
            ResumeStyle::Standard => StageKey::EnhancedResume,
            ResumeStyle::Combined => StageKey::CombinedResume,
        }
    }
}

impl fmt::Display for ResumeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One generated text, declared in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StageKey {
    JobAnalysis,
    ResumeFlaws,
    ImpactRewrite,
    AtsOptimized,
    EnhancedSkills,
    KeywordExperience,
    TailoredResume,
    NarrativeResume,
    EnhancedResume,
    CombinedResume,
    NarrativeOnly,
    EnhancedOnly,
    ExecutiveSummary,
    AtsCompatibility,
}

impl StageKey {
    pub const ALL: [StageKey; 14] = [
        StageKey::JobAnalysis,
        StageKey::ResumeFlaws,
        StageKey::ImpactRewrite,
        StageKey::AtsOptimized,
        StageKey::EnhancedSkills,
        StageKey::KeywordExperience,
        StageKey::TailoredResume,
        StageKey::NarrativeResume,
        StageKey::EnhancedResume,
        StageKey::CombinedResume,
        StageKey::NarrativeOnly,
        StageKey::EnhancedOnly,
        StageKey::ExecutiveSummary,
        StageKey::AtsCompatibility,
    ];

    /// Stable string key, also used in the manifest.
    pub fn key(&self) -> &'static str {
        match self {
            StageKey::JobAnalysis => "1_job_analysis",
            StageKey::ResumeFlaws => "2_resume_flaws",
            StageKey::ImpactRewrite => "3_impact_rewrite",
            StageKey::AtsOptimized => "4_ats_optimized",
            StageKey::EnhancedSkills => "5_enhanced_skills",
            StageKey::KeywordExperience => "6_keyword_experience",
            StageKey::TailoredResume => "7_tailored_resume",
            StageKey::NarrativeResume => "7_narrative_resume",
            StageKey::EnhancedResume => "7_enhanced_resume",
            StageKey::CombinedResume => "7_combined_resume",
            StageKey::NarrativeOnly => "8_narrative_only",
            StageKey::EnhancedOnly => "9_enhanced_only",
            StageKey::ExecutiveSummary => "8_executive_summary",
            StageKey::AtsCompatibility => "10_ats_compatibility",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            StageKey::JobAnalysis => "job_analysis_report.txt",
            StageKey::ResumeFlaws => "resume_analysis_flaws.txt",
            StageKey::ImpactRewrite => "resume_impact_version.txt",
            StageKey::AtsOptimized => "resume_ats_optimized.txt",
            StageKey::EnhancedSkills => "enhanced_skills_section.txt",
            StageKey::KeywordExperience => "keyword_enhanced_experience.txt",
            StageKey::TailoredResume => "tailored_resume_final.txt",
            StageKey::NarrativeResume | StageKey::NarrativeOnly => "narrative_story_resume.txt",
            StageKey::EnhancedResume | StageKey::EnhancedOnly => "enhanced_standard_resume.txt",
            StageKey::CombinedResume => "combined_comprehensive_resume.txt",
            StageKey::ExecutiveSummary => "optimization_executive_summary.txt",
            StageKey::AtsCompatibility => "ats_compatibility_report.txt",
        }
    }
}

impl fmt::Display for StageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Generated texts; iteration order is display order.
pub type Results = BTreeMap<StageKey, String>;

// ────────────────────────────────────────────────────────────────────────────
// Request / response
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct OptimizationRequest {
    pub job_description: String,
    pub resume_content: String,
    pub role: String,
    pub company: String,
    pub style: ResumeStyle,
}

#[derive(Debug, Clone, Serialize)]
pub struct Optimization {
    pub field: FieldTag,
    pub detection_source: DetectionSource,
    pub style: ResumeStyle,
    pub role: String,
    pub company: String,
    pub analysis: JobAnalysis,
    pub resume_info: ResumeInfo,
    pub results: Results,
}

impl Optimization {
    /// The style variant the DOCX is built from.
    pub fn primary_variant(&self) -> &str {
        self.results
            .get(&self.style.primary_stage())
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Everything the stage builders read. Built once per request.
pub struct StageInputs<'a> {
    pub field: &'a FieldTag,
    pub role: &'a str,
    pub company: &'a str,
    pub data: FieldData,
    pub analysis: &'a JobAnalysis,
    pub info: &'a ResumeInfo,
    pub story: StoryElements,
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestration
// ────────────────────────────────────────────────────────────────────────────

/// Role first; when the role alone says nothing, the posting plus the role.
pub fn detect_field(job_description: &str, role: &str) -> Detection {
    let by_role = classify(role);
    if by_role.source != DetectionSource::Default {
        return by_role;
    }
    classify(&format!("{job_description} {role}"))
}

pub fn process_complete_optimization(req: &OptimizationRequest) -> Result<Optimization, AppError> {
    if req.job_description.trim().is_empty() {
        return Err(AppError::MissingInput("Job description"));
    }
    if req.resume_content.trim().is_empty() {
        return Err(AppError::MissingInput("Resume content"));
    }

    info!(
        role = %req.role,
        company = %req.company,
        resume_chars = req.resume_content.chars().count(),
        job_chars = req.job_description.chars().count(),
        style = %req.style,
        "starting résumé optimization"
    );

    let detection = detect_field(&req.job_description, &req.role);
    let field = detection.field;
    info!(
        field = %field,
        source = ?detection.source,
        predefined = is_predefined(&field),
        "career field selected"
    );

    let analysis = analyze_job_posting(&req.job_description, &req.role, &field);
    let resume_info = extract_resume_information(&req.resume_content);
    if !resume_info.has_name() {
        warn!("no candidate name found in résumé, using placeholder");
    }

    let inputs = StageInputs {
        field: &field,
        role: &req.role,
        company: &req.company,
        data: get_field_data(&field),
        analysis: &analysis,
        info: &resume_info,
        story: generate_personalized_story(&resume_info, &field, &req.role, &req.company),
    };

    let mut results = Results::new();
    results.insert(StageKey::JobAnalysis, stages::job_analysis_report(&inputs));
    results.insert(StageKey::ResumeFlaws, stages::resume_flaws(&inputs));
    results.insert(StageKey::ImpactRewrite, stages::impact_rewrite(&inputs));
    results.insert(StageKey::AtsOptimized, stages::ats_optimized(&inputs));
    results.insert(StageKey::EnhancedSkills, stages::enhanced_skills(&inputs));
    results.insert(StageKey::KeywordExperience, stages::keyword_experience(&inputs));
    results.insert(StageKey::TailoredResume, stages::tailored_resume(&inputs));

    match req.style {
        ResumeStyle::Narrative => {
            results.insert(StageKey::NarrativeResume, styles::narrative_resume(&inputs));
        }
        ResumeStyle::Standard => {
            results.insert(StageKey::EnhancedResume, styles::enhanced_resume(&inputs));
        }
        ResumeStyle::Combined => {
            results.insert(StageKey::CombinedResume, styles::combined_resume(&inputs));
            results.insert(StageKey::NarrativeOnly, styles::narrative_resume(&inputs));
            results.insert(StageKey::EnhancedOnly, styles::enhanced_resume(&inputs));
        }
    }

    let primary = results
        .get(&req.style.primary_stage())
        .cloned()
        .unwrap_or_default();
    results.insert(
        StageKey::ExecutiveSummary,
        stages::executive_summary(&inputs, req.style, &primary, Local::now()),
    );
    let ats_version = results.get(&StageKey::AtsOptimized).cloned().unwrap_or_default();
    results.insert(
        StageKey::AtsCompatibility,
        stages::ats_compatibility(req.style, &ats_version, &primary),
    );

    info!(stages = results.len(), "optimization complete");

    Ok(Optimization {
        field,
        detection_source: detection.source,
        style: req.style,
        role: req.role.clone(),
        company: req.company.clone(),
        analysis,
        resume_info,
        results,
    })
}
