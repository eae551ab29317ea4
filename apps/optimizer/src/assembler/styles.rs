//! The style-dependent résumé variants: career story, enhanced standard, and
//! the combination of both.

use crate::assembler::stages::bullets;
use crate::assembler::StageInputs;
use crate::fields::catalog::{position_title, professional_summary, professional_title};
use crate::resume::ResumeInfo;

pub const NAME_PLACEHOLDER: &str = "Your Name";
const CONTACT_PLACEHOLDER: &str = "Phone: (555) 555-5555 | Email: your.email@example.com";

const CONTACT_LABELS: &[&str] = &["email", "e-mail", "phone", "mobile", "cell", "tel", "linkedin", "github"];

pub fn candidate_name(info: &ResumeInfo) -> &str {
    if info.has_name() {
        info.name.trim()
    } else {
        NAME_PLACEHOLDER
    }
}

/// Contact lines exactly as extracted, or a fill-in placeholder.
pub fn plain_contact_lines(info: &ResumeInfo) -> Vec<String> {
    if info.contact_info.is_empty() {
        vec![CONTACT_PLACEHOLDER.to_string()]
    } else {
        info.contact_info.clone()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Contact card
// ────────────────────────────────────────────────────────────────────────────

/// Contact details sorted into the slots of the story-style header.
#[derive(Debug, Default, PartialEq)]
pub struct ContactCard {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub other: Vec<String>,
}

impl ContactCard {
    pub fn from_lines(lines: &[String]) -> Self {
        let mut card = ContactCard::default();
        for part in lines.iter().flat_map(|l| l.split('|')) {
            let value = strip_label(part);
            if value.is_empty() {
                continue;
            }
            let lower = value.to_lowercase();
            let slot = if lower.contains("linkedin") {
                &mut card.linkedin
            } else if lower.contains("github") {
                &mut card.github
            } else if value.contains('@') {
                &mut card.email
            } else if value.chars().filter(char::is_ascii_digit).count() >= 7 {
                &mut card.phone
            } else {
                card.other.push(value.to_string());
                continue;
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }
        card
    }

    /// `📞 … | ✉️ …` and `🔗 LinkedIn: … | 💻 GitHub: …` lines, then anything unsorted.
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::new();

        let reach: Vec<String> = [
            self.phone.as_ref().map(|p| format!("📞 {p}")),
            self.email.as_ref().map(|e| format!("✉️ {e}")),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !reach.is_empty() {
            lines.push(reach.join(" | "));
        }

        let links: Vec<String> = [
            self.linkedin.as_ref().map(|l| format!("🔗 LinkedIn: {l}")),
            self.github.as_ref().map(|g| format!("💻 GitHub: {g}")),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !links.is_empty() {
            lines.push(links.join(" | "));
        }

        lines.extend(self.other.iter().cloned());
        if lines.is_empty() {
            lines.push(CONTACT_PLACEHOLDER.to_string());
        }
        lines
    }
}

/// "Email: a@b.com" → "a@b.com". URL schemes are left alone.
fn strip_label(part: &str) -> &str {
    let part = part.trim();
    match part.split_once(':') {
        Some((label, rest)) if CONTACT_LABELS.contains(&label.trim().to_lowercase().as_str()) => rest.trim(),
        _ => part,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared sections
// ────────────────────────────────────────────────────────────────────────────

/// Résumé skills first, then required job skills not already listed.
fn merged_skills(inputs: &StageInputs) -> Vec<String> {
    let mut skills = inputs.info.skills.clone();
    for skill in &inputs.analysis.required_skills {
        let lower = skill.to_lowercase();
        if !skills.iter().any(|s| s.to_lowercase() == lower) {
            skills.push(skill.clone());
        }
    }
    if skills.is_empty() {
        skills = inputs.data.skills.clone();
    }
    skills
}

fn education(inputs: &StageInputs) -> String {
    if inputs.info.education.trim().is_empty() {
        inputs.data.education.clone()
    } else {
        inputs.info.education.clone()
    }
}

fn catalog_experience(inputs: &StageInputs) -> String {
    format!(
        "{}\n{}",
        inputs.data.experience_title,
        bullets(&inputs.data.experience_bullets)
    )
}

fn projects(inputs: &StageInputs) -> Vec<String> {
    if inputs.info.projects.is_empty() {
        inputs.data.projects.clone()
    } else {
        inputs.info.projects.clone()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Variants
// ────────────────────────────────────────────────────────────────────────────

pub fn narrative_resume(inputs: &StageInputs) -> String {
    let story = &inputs.story;
    let skills = if inputs.info.skills.is_empty() {
        &inputs.data.skills
    } else {
        &inputs.info.skills
    };

    format!(
        "CAREER STORY RESUME FOR {position}

{hook}

{name}
{display} Professional

CONTACT INFORMATION:
{contact}

PROFESSIONAL NARRATIVE:
{narrative}

CAREER PROGRESSION:
{progression}

TECHNICAL COMPETENCIES:
{skills}

PROFESSIONAL EXPERIENCE & KEY ACHIEVEMENTS:
{achievements}

DEFINING PROJECTS:
{projects}

EDUCATION:
{education}

FUTURE VISION:
{vision}",
        position = position_title(inputs.field),
        hook = story.opening_hook,
        name = candidate_name(inputs.info).to_uppercase(),
        display = inputs.field.display_name(),
        contact = ContactCard::from_lines(&inputs.info.contact_info).render().join("\n"),
        narrative = story.professional_narrative,
        progression = story.career_progression,
        skills = bullets(skills),
        achievements = bullets(&story.signature_achievements),
        projects = bullets(&story.story_projects),
        education = education(inputs),
        vision = story.closing_vision,
    )
}

pub fn enhanced_resume(inputs: &StageInputs) -> String {
    let experience = if inputs.info.experience.is_empty() {
        catalog_experience(inputs)
    } else {
        bullets(&inputs.info.experience)
    };

    format!(
        "ENHANCED PROFESSIONAL RESUME - {position}

{name}
{title}

CONTACT INFORMATION:
{contact}

PROFESSIONAL SUMMARY:
{summary}

CORE TECHNICAL COMPETENCIES:
{skills}

PROFESSIONAL EXPERIENCE:
{experience}

EDUCATION:
{education}

KEY PROJECTS & CERTIFICATIONS:
{projects}",
        position = position_title(inputs.field),
        name = candidate_name(inputs.info).to_uppercase(),
        title = professional_title(inputs.field),
        contact = plain_contact_lines(inputs.info).join("\n"),
        summary = professional_summary(inputs.field),
        skills = bullets(&merged_skills(inputs)),
        education = education(inputs),
        projects = bullets(&projects(inputs)),
    )
}

/// Story elements and standard sections in one document. Personal experience
/// already leads the signature achievements, so the experience section
/// carries the catalog role instead of repeating it.
pub fn combined_resume(inputs: &StageInputs) -> String {
    let story = &inputs.story;
    format!(
        "COMBINED CAREER STORY & PROFESSIONAL RESUME - {position}

{hook}

{name}
{title}

CONTACT INFORMATION:
{contact}

CAREER NARRATIVE:
{narrative}

PROFESSIONAL SUMMARY:
{summary}

CORE TECHNICAL COMPETENCIES:
{skills}

SIGNATURE ACHIEVEMENTS:
{achievements}

PROFESSIONAL EXPERIENCE:
{experience}

DEFINING PROJECTS:
{projects}

EDUCATION:
{education}

FUTURE VISION:
{vision}",
        position = position_title(inputs.field),
        hook = story.opening_hook,
        name = candidate_name(inputs.info).to_uppercase(),
        title = professional_title(inputs.field),
        contact = ContactCard::from_lines(&inputs.info.contact_info).render().join("\n"),
        narrative = story.professional_narrative,
        summary = professional_summary(inputs.field),
        skills = bullets(&merged_skills(inputs)),
        achievements = bullets(&story.signature_achievements),
        experience = catalog_experience(inputs),
        projects = bullets(&story.story_projects),
        education = education(inputs),
        vision = story.closing_vision,
    )
}
