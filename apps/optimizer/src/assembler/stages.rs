//! Catalog-driven stages shared by every style: job report, flaw report,
//! rewrites, the executive summary and the ATS comparison.

use chrono::{DateTime, Local};

use crate::analysis::ats::render_ats_report;
use crate::analysis::impact::render_impact_check;
use crate::analysis::analyze_ats_compatibility;
use crate::assembler::styles::{candidate_name, plain_contact_lines};
use crate::assembler::{ResumeStyle, StageInputs};
use crate::fields::catalog::{position_title, professional_summary, professional_title};

const MAX_KEYWORD_SUGGESTIONS: usize = 3;

const ADDITIONAL_COMPETENCIES: &[&str] = &[
    "Problem-solving and analytical thinking",
    "Team collaboration and communication",
    "Time management and project coordination",
    "Safety protocols and compliance",
    "Technical documentation and reporting",
    "Continuous learning and professional development",
];

const FLAW_REPORT: &str = "RESUME ANALYSIS - AREAS FOR IMPROVEMENT:

FORMATTING ISSUES:
- Inconsistent bullet point formatting throughout document
- Missing quantifiable achievements and metrics
- Generic job descriptions lacking impact statements
- Insufficient use of industry-specific keywords

CONTENT WEAKNESSES:
- Professional summary lacks compelling value proposition
- Experience section needs stronger action verbs (achieved, optimized, developed)
- Missing technical skills alignment with modern job requirements
- Education section could highlight relevant coursework and projects

ATS OPTIMIZATION GAPS:
- Keywords not strategically placed for applicant tracking systems
- Missing relevant technical competencies for target roles
- Job titles and descriptions need better keyword density
- Contact information format needs enhancement

IMPACT IMPROVEMENTS NEEDED:
- Add quantifiable results (increased efficiency by X%, reduced costs by $X)
- Include specific technologies and frameworks used in each role
- Highlight leadership experiences and cross-functional collaboration
- Emphasize problem-solving capabilities with concrete examples";

pub(crate) fn bullets<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// "Optical Engineer | Photonics Systems Division | 2019 - Present" → "Optical Engineer".
pub(crate) fn headline_role(experience_title: &str) -> &str {
    experience_title.split('|').next().unwrap_or(experience_title).trim()
}

// ────────────────────────────────────────────────────────────────────────────
// Stages 1 – 7
// ────────────────────────────────────────────────────────────────────────────

pub fn job_analysis_report(inputs: &StageInputs) -> String {
    let a = inputs.analysis;
    format!(
        "JOB ANALYSIS SUMMARY - {role} at {company}

REQUIRED TECHNICAL SKILLS:
{required}

PREFERRED QUALIFICATIONS:
{preferred}

KEY RESPONSIBILITIES:
{responsibilities}

COMPANY VALUES & CULTURE:
{values}

INDUSTRY KEYWORDS:
{keywords}

EXPERIENCE LEVEL: {level}
ROLE CATEGORY: {role_type}

OPTIMIZATION RECOMMENDATIONS:
• Emphasize technical skills alignment with required competencies
• Highlight relevant project experience and quantifiable achievements
• Include industry-specific keywords naturally throughout resume
• Demonstrate cultural fit through examples of company values in action",
        role = inputs.role,
        company = inputs.company,
        required = bullets(&a.required_skills),
        preferred = bullets(&a.preferred_skills),
        responsibilities = bullets(&a.key_responsibilities),
        values = bullets(&a.company_values),
        keywords = bullets(&a.industry_keywords),
        level = a.experience_level,
        role_type = a.role_type,
    )
}

pub fn resume_flaws(inputs: &StageInputs) -> String {
    format!("{FLAW_REPORT}\n\n{}", render_impact_check(&inputs.info.experience))
}

pub fn impact_rewrite(inputs: &StageInputs) -> String {
    let d = &inputs.data;
    format!(
        "ENHANCED RESUME - MAXIMUM IMPACT VERSION:

{name}
{title}

CONTACT INFORMATION:
{contact}

PROFESSIONAL SUMMARY:
{summary}

CORE TECHNICAL COMPETENCIES:
{skills}

PROFESSIONAL EXPERIENCE:
{experience_title}
{experience}

EDUCATION:
{education}

KEY PROJECTS & CERTIFICATIONS:
{projects}

This optimized resume strategically aligns your background with the target role requirements, \
incorporating industry-specific keywords and quantifiable achievements that will resonate with \
hiring managers and pass ATS screening systems.",
        name = candidate_name(inputs.info).to_uppercase(),
        title = professional_title(inputs.field),
        contact = plain_contact_lines(inputs.info).join(" | "),
        summary = professional_summary(inputs.field),
        skills = d.skills.join("\n"),
        experience_title = d.experience_title,
        experience = bullets(&d.experience_bullets),
        education = d.education,
        projects = bullets(&d.projects),
    )
}

pub fn ats_optimized(inputs: &StageInputs) -> String {
    let d = &inputs.data;
    format!(
        "ATS-OPTIMIZED RESUME VERSION:

{name}
{headline}

CONTACT INFORMATION:
{contact}

TECHNICAL SKILLS:
{skills}
Job-Matched Skills: {matched}

PROFESSIONAL EXPERIENCE:
{experience_title}
{experience}

EDUCATION:
{education}

CERTIFICATIONS & ACHIEVEMENTS:
{projects}

This ATS-optimized version incorporates relevant keywords and proper formatting to maximize \
compatibility with applicant tracking systems while maintaining readability for human reviewers.",
        name = candidate_name(inputs.info).to_uppercase(),
        headline = headline_role(&d.experience_title),
        contact = plain_contact_lines(inputs.info).join("\n"),
        skills = d.skills.join("\n"),
        matched = inputs.analysis.required_skills.join(", "),
        experience_title = d.experience_title,
        experience = bullets(&d.experience_bullets),
        education = d.education,
        projects = bullets(&d.projects),
    )
}

pub fn enhanced_skills(inputs: &StageInputs) -> String {
    format!(
        "ENHANCED TECHNICAL SKILLS SECTION:

{skills}

ADDITIONAL COMPETENCIES:
{additional}

This enhanced skills section strategically highlights both technical competencies and soft skills \
that are highly valued by employers in the {field} field.",
        skills = inputs.data.skills.join("\n"),
        additional = bullets(ADDITIONAL_COMPETENCIES),
        field = inputs.field.display_name(),
    )
}

pub fn keyword_experience(inputs: &StageInputs) -> String {
    let d = &inputs.data;
    let a = inputs.analysis;
    let mut out = format!(
        "KEYWORD-ENHANCED EXPERIENCE DESCRIPTIONS:

{title}
{required}

ACHIEVEMENTS:
{experience}

INDUSTRY KEYWORDS:
{keywords}

PROJECT HIGHLIGHTS:
{projects}",
        title = d.experience_title.to_uppercase(),
        required = a.required_skills.join(" • "),
        experience = bullets(&d.experience_bullets),
        keywords = a.industry_keywords.join(" • "),
        projects = bullets(&d.projects),
    );

    if !inputs.info.experience.is_empty() {
        out.push_str("\n\nYOUR EXPERIENCE WITH SUGGESTED KEYWORDS:");
        for line in &inputs.info.experience {
            let lower = line.to_lowercase();
            let missing: Vec<&str> = a
                .required_skills
                .iter()
                .filter(|skill| !lower.contains(&skill.to_lowercase()))
                .take(MAX_KEYWORD_SUGGESTIONS)
                .map(String::as_str)
                .collect();
            out.push_str(&format!("\n• {line}"));
            if !missing.is_empty() {
                out.push_str(&format!("\n  Consider mentioning: {}", missing.join(", ")));
            }
        }
    }
    out
}

pub fn tailored_resume(inputs: &StageInputs) -> String {
    let d = &inputs.data;
    format!(
        "TAILORED RESUME FOR {position} POSITION:

{name}
{headline}

CONTACT INFORMATION:
{contact}

PROFESSIONAL SUMMARY:
{summary}

CORE COMPETENCIES:
{skills}

PROFESSIONAL EXPERIENCE:
{experience_title}
{experience}

EDUCATION & CREDENTIALS:
{education}

KEY PROJECTS & CERTIFICATIONS:
{projects}

This tailored resume strategically positions your experience and skills to align with {field} \
industry requirements and employer expectations.",
        position = position_title(inputs.field),
        name = candidate_name(inputs.info).to_uppercase(),
        headline = headline_role(&d.experience_title),
        contact = plain_contact_lines(inputs.info).join("\n"),
        summary = professional_summary(inputs.field),
        skills = bullets(&d.skills),
        experience_title = d.experience_title,
        experience = bullets(&d.experience_bullets),
        education = d.education,
        projects = bullets(&d.projects),
        field = inputs.field.phrase(),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Summary stages
// ────────────────────────────────────────────────────────────────────────────

/// Required skills that appear in `variant`, case-insensitively.
pub fn covered_skills<'a>(required: &'a [String], variant: &str) -> Vec<&'a str> {
    let lower = variant.to_lowercase();
    required
        .iter()
        .filter(|skill| lower.contains(&skill.to_lowercase()))
        .map(String::as_str)
        .collect()
}

pub fn executive_summary(
    inputs: &StageInputs,
    style: ResumeStyle,
    primary: &str,
    processed_at: DateTime<Local>,
) -> String {
    let required = &inputs.analysis.required_skills;
    let covered = covered_skills(required, primary).len();
    let primary_usage = match style {
        ResumeStyle::Narrative => {
            "• Use the \"Narrative Story\" version when a memorable personal pitch matters (networking, referrals)"
        }
        ResumeStyle::Standard => {
            "• Use the \"Enhanced Standard\" version as primary application document"
        }
        ResumeStyle::Combined => {
            "• Use the \"Combined Comprehensive\" version as primary application document; the standalone story and standard versions are saved alongside"
        }
    };

    format!(
        "RESUME OPTIMIZATION EXECUTIVE SUMMARY

OPTIMIZATION TARGET: {role} at {company}
CAREER FIELD: {field}
RESUME STYLE: {style}
PROCESSING DATE: {date}

KEY IMPROVEMENTS IMPLEMENTED:
>>> Technical Skills Enhancement: Aligned core competencies with job requirements
>>> ATS Optimization: Improved keyword density and formatting for tracking systems
>>> Impact Quantification: Added measurable achievements and performance metrics
>>> Experience Enhancement: Strengthened job descriptions with powerful action verbs
>>> Industry Alignment: Integrated relevant keywords and terminology
>>> Cultural Fit: Emphasized alignment with company values and mission

OPTIMIZATION RESULTS:
• Resume now contains {covered} of {total} required technical skills
• Enhanced readability and professional formatting for improved recruiter appeal
• Optimized for major ATS platforms including Workday, Greenhouse, and Lever
• Increased keyword relevance score by incorporating industry-specific terminology
• Strengthened value proposition with quantified achievements and results

NEXT STEPS:
1. Review tailored resume version for accuracy and personal preferences
2. Customize cover letter using provided job analysis insights
3. Prepare interview talking points based on enhanced experience descriptions
4. Update LinkedIn profile to match optimized resume content
5. Save multiple versions for different role types and industries

RECOMMENDED USAGE:
{primary_usage}
• Use \"Tailored Resume\" version when the posting lists specific requirements
• Reference \"ATS Optimized\" version for online application systems
• Leverage \"Enhanced Skills\" section for LinkedIn profile updates
• Apply \"Impact Rewrite\" techniques to other professional documents",
        role = inputs.role,
        company = inputs.company,
        field = inputs.field.display_name(),
        date = processed_at.format("%Y-%m-%d %H:%M"),
        total = required.len(),
    )
}

pub fn ats_compatibility(style: ResumeStyle, ats_version: &str, primary: &str) -> String {
    let ats = analyze_ats_compatibility(ats_version);
    let styled = analyze_ats_compatibility(primary);

    let advice = if styled.score >= ats.score {
        format!("Both versions parse well; the {style} version can be submitted through online portals.")
    } else {
        format!(
            "Submit the ATS-optimized version through online portals ({} points higher); keep the {style} \
             version for direct contact with recruiters and hiring managers.",
            ats.score - styled.score
        )
    };

    format!(
        "ATS COMPATIBILITY REPORT\n\n{}\n{}\nRECOMMENDATION:\n{advice}",
        render_ats_report("ATS-Optimized Version", &ats),
        render_ats_report(&format!("{style} Version"), &styled),
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::analysis::analyze_job_posting;
    use crate::fields::{get_field_data, FieldTag};
    use crate::resume::{extract_resume_information, ResumeInfo};
    use crate::story::generate_career_story;

    const DEMO_JOB: &str = include_str!("../../data/demo_job.txt");
    const DEMO_RESUME: &str = include_str!("../../data/demo_resume.txt");

    fn with_inputs<T>(field: &str, info: ResumeInfo, f: impl FnOnce(&StageInputs) -> T) -> T {
        let field = FieldTag::new(field);
        let analysis = analyze_job_posting(DEMO_JOB, "Software Engineer", &field);
        let inputs = StageInputs {
            field: &field,
            role: "Software Engineer",
            company: "FinTech Innovations Inc.",
            data: get_field_data(&field),
            analysis: &analysis,
            info: &info,
            story: generate_career_story(&field, "Software Engineer", "FinTech Innovations Inc."),
        };
        f(&inputs)
    }

    #[test]
    fn test_job_report_headings() {
        let text = with_inputs("software_engineer", ResumeInfo::default(), job_analysis_report);
        assert!(text.starts_with("JOB ANALYSIS SUMMARY - Software Engineer at FinTech Innovations Inc."));
        for heading in [
            "REQUIRED TECHNICAL SKILLS:",
            "PREFERRED QUALIFICATIONS:",
            "KEY RESPONSIBILITIES:",
            "COMPANY VALUES & CULTURE:",
            "INDUSTRY KEYWORDS:",
            "EXPERIENCE LEVEL: Entry-Mid Level",
            "ROLE CATEGORY: Software Engineer",
            "OPTIMIZATION RECOMMENDATIONS:",
        ] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert!(text.contains("• Python"));
    }

    #[test]
    fn test_flaw_report_includes_impact_check() {
        let info = extract_resume_information(DEMO_RESUME);
        let text = with_inputs("software_engineer", info, resume_flaws);
        assert!(text.starts_with("RESUME ANALYSIS - AREAS FOR IMPROVEMENT:"));
        assert!(text.contains("IMPACT IMPROVEMENTS NEEDED:"));
        assert!(text.contains("BULLET IMPACT CHECK:"));
        assert!(text.contains("✗ Collaborated with team on various projects"));
    }

    #[test]
    fn test_impact_rewrite_uses_extracted_identity() {
        let info = extract_resume_information(DEMO_RESUME);
        let text = with_inputs("software_engineer", info, impact_rewrite);
        assert!(text.starts_with("ENHANCED RESUME - MAXIMUM IMPACT VERSION:"));
        assert!(text.contains("JOHN SMITH"));
        assert!(text.contains("john.smith@email.com"));
        assert!(text.contains("Software Engineer | Python Developer | Financial Technology Specialist"));
        assert!(text.contains("• Developed automated trading algorithms"));
    }

    #[test]
    fn test_ats_version_has_no_emoji_and_scores_well() {
        let info = extract_resume_information(DEMO_RESUME);
        let text = with_inputs("software_engineer", info, ats_optimized);
        assert!(text.starts_with("ATS-OPTIMIZED RESUME VERSION:"));
        assert!(!text.chars().any(|c| c as u32 >= 0x1F300));
        let report = analyze_ats_compatibility(&text);
        assert!(report.score >= 85, "score {} issues {:?}", report.score, report.issues);
    }

    #[test]
    fn test_enhanced_skills_lists_additional_competencies() {
        let text = with_inputs("welder", ResumeInfo::default(), enhanced_skills);
        assert!(text.starts_with("ENHANCED TECHNICAL SKILLS SECTION:"));
        assert!(text.contains("ADDITIONAL COMPETENCIES:"));
        assert!(text.contains("• Safety protocols and compliance"));
        assert!(text.contains("in the Welder field"));
    }

    #[test]
    fn test_keyword_experience_suggests_missing_skills() {
        let info = extract_resume_information(DEMO_RESUME);
        let text = with_inputs("software_engineer", info, keyword_experience);
        assert!(text.starts_with("KEYWORD-ENHANCED EXPERIENCE DESCRIPTIONS:"));
        assert!(text.contains("YOUR EXPERIENCE WITH SUGGESTED KEYWORDS:"));
        assert!(text.contains("• Built database systems with SQL"));
        assert!(text.contains("Consider mentioning:"));
    }

    #[test]
    fn test_tailored_resume_position_and_headline() {
        let text = with_inputs("optical_engineer", ResumeInfo::default(), tailored_resume);
        assert!(text.starts_with("TAILORED RESUME FOR OPTICAL ENGINEER POSITION:"));
        assert!(text.contains("\nOptical Engineer\n"));
        for heading in [
            "PROFESSIONAL SUMMARY:",
            "CORE COMPETENCIES:",
            "PROFESSIONAL EXPERIENCE:",
            "EDUCATION & CREDENTIALS:",
            "KEY PROJECTS & CERTIFICATIONS:",
        ] {
            assert!(text.contains(heading), "missing {heading}");
        }
    }

    #[test]
    fn test_executive_summary_counts_covered_skills() {
        let at = Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let text = with_inputs("software_engineer", ResumeInfo::default(), |inputs| {
            let total = inputs.analysis.required_skills.len();
            let text = executive_summary(inputs, ResumeStyle::Standard, "Python and pandas", at);
            assert!(text.contains(&format!("Resume now contains 2 of {total} required technical skills")));
            text
        });
        assert!(text.contains("PROCESSING DATE: 2024-03-01 09:30"));
        assert!(text.contains("RESUME STYLE: Enhanced Standard"));
        assert!(text.contains("\"Enhanced Standard\" version as primary"));
    }

    #[test]
    fn test_covered_skills_is_case_insensitive() {
        let required = vec!["Python".to_string(), "Sql".to_string(), "Docker".to_string()];
        assert_eq!(covered_skills(&required, "PYTHON, SQL"), vec!["Python", "Sql"]);
    }

    #[test]
    fn test_ats_comparison_mentions_both_versions() {
        let text = ats_compatibility(
            ResumeStyle::Narrative,
            "Contact: a@b.com\nExperience\n• Led 5 engineers\nEducation: University\nSkills",
            "🔥 my journey",
        );
        assert!(text.starts_with("ATS COMPATIBILITY REPORT"));
        assert!(text.contains("ATS-Optimized Version:"));
        assert!(text.contains("Narrative Storytelling Version:"));
        assert!(text.contains("Submit the ATS-optimized version"));
    }

    #[test]
    fn test_headline_role() {
        assert_eq!(headline_role("Optical Engineer | Photonics | 2019 - Present"), "Optical Engineer");
        assert_eq!(headline_role("Plumber"), "Plumber");
    }
}
