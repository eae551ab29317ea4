//! Story Template Generator. Builds the narrative scaffolding behind the
//! career-story résumé variant (opening hook, first-person narrative,
//! three-chapter progression, achievements, projects, closing vision).

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::fields::FieldTag;
use crate::resume::ResumeInfo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryElements {
    pub opening_hook: String,
    pub professional_narrative: String,
    pub career_progression: String,
    pub signature_achievements: Vec<String>,
    pub story_projects: Vec<String>,
    pub closing_vision: String,
}

#[derive(Debug, Deserialize)]
struct StoryFile {
    stories: BTreeMap<String, StoryElements>,
}

static STORIES: Lazy<BTreeMap<String, StoryElements>> = Lazy::new(|| {
    match serde_yaml::from_str::<StoryFile>(include_str!("../data/stories.yaml")) {
        Ok(file) => file.stories,
        Err(e) => {
            error!("Embedded story catalog failed to parse, using synthesized stories only: {e}");
            BTreeMap::new()
        }
    }
});

const MAX_PERSONAL_ITEMS: usize = 4;
const MAX_STORY_ITEMS: usize = 6;
const MAX_NARRATIVE_SKILLS: usize = 6;

/// Story for `field`, hand-authored when available, synthesized otherwise.
pub fn generate_career_story(field: &FieldTag, role: &str, company: &str) -> StoryElements {
    match STORIES.get(field.as_str()) {
        Some(template) => {
            debug!(field = %field, "using authored career story");
            fill_placeholders(template, role, company)
        }
        None => generate_dynamic_story_template(field, role, company),
    }
}

fn fill_placeholders(template: &StoryElements, role: &str, company: &str) -> StoryElements {
    let fill = |s: &str| s.replace("{role}", role).replace("{company}", company);
    StoryElements {
        opening_hook: fill(&template.opening_hook),
        professional_narrative: fill(&template.professional_narrative),
        career_progression: fill(&template.career_progression),
        signature_achievements: template.signature_achievements.iter().map(|s| fill(s)).collect(),
        story_projects: template.story_projects.iter().map(|s| fill(s)).collect(),
        closing_vision: fill(&template.closing_vision),
    }
}

/// Three-chapter skeleton built around the field's display name.
pub fn generate_dynamic_story_template(field: &FieldTag, role: &str, company: &str) -> StoryElements {
    let display = field.display_name();
    let upper = display.to_uppercase();
    let phrase = field.phrase();

    StoryElements {
        opening_hook: format!("🌟 THE {upper} PROFESSIONAL: Turning expertise into results that matter"),
        professional_narrative: format!(
            "My journey in {phrase} began with curiosity and became a commitment to doing the work right. \
             Over the years I have built hands-on expertise, earned the trust of colleagues and clients, and \
             learned that quality is a habit rather than an event. As a {role}, I bring practical {phrase} \
             skills, a problem-solving mindset and a record of measurable results."
        ),
        career_progression: [
            format!(
                "Chapter 1: THE FOUNDATION - Built core {phrase} skills through training, certification and \
                 early hands-on work."
            ),
            format!(
                "Chapter 2: THE GROWTH - Took ownership of larger responsibilities, sharpening judgment and \
                 delivering consistent {phrase} outcomes."
            ),
            format!(
                "Chapter 3: THE MASTERY - Leading by example and mentoring others, ready to raise the bar at \
                 {company}."
            ),
        ]
        .join("\n"),
        signature_achievements: vec![
            format!("Delivered {phrase} work that improved team performance by 25%"),
            format!("Recognized for {display} excellence and client satisfaction"),
            "Streamlined processes that reduced turnaround time by 20%".into(),
            "Mentored new team members in professional standards and best practices".into(),
        ],
        story_projects: vec![
            format!("Professional {display} Certification"),
            format!("{display} Process Improvement Initiative"),
            format!("Advanced {display} Training Completion"),
            "Cross-Team Collaboration and Leadership Project".into(),
        ],
        closing_vision: format!(
            "At {company}, I want to bring {phrase} expertise that makes a lasting difference, growing with the \
             team and delivering results worth talking about."
        ),
    }
}

/// Career story enriched with the candidate's own skills, experience and projects.
pub fn generate_personalized_story(
    info: &ResumeInfo,
    field: &FieldTag,
    role: &str,
    company: &str,
) -> StoryElements {
    let mut story = generate_career_story(field, role, company);

    if !info.skills.is_empty() {
        let toolkit = info
            .skills
            .iter()
            .take(MAX_NARRATIVE_SKILLS)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        story
            .professional_narrative
            .push_str(&format!(" My toolkit includes {toolkit}."));
    }

    story.signature_achievements = personal_first(&info.experience, story.signature_achievements);
    story.story_projects = personal_first(&info.projects, story.story_projects);
    story
}

fn personal_first(personal: &[String], template: Vec<String>) -> Vec<String> {
    if personal.is_empty() {
        return template;
    }
    let mut merged: Vec<String> = personal.iter().take(MAX_PERSONAL_ITEMS).cloned().collect();
    for item in template {
        if merged.len() >= MAX_STORY_ITEMS {
            break;
        }
        if !merged.contains(&item) {
            merged.push(item);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(field: &str, role: &str, company: &str) -> StoryElements {
        generate_career_story(&FieldTag::new(field), role, company)
    }

    #[test]
    fn test_welder_story_elements() {
        let s = story("welder", "Senior Welder", "Industrial Manufacturing Co.");
        assert!(s.opening_hook.contains("METAL MASTER"));
        assert!(s.professional_narrative.contains("art meets engineering"));
        assert!(s.professional_narrative.contains("Senior Welder"));
        assert!(s.career_progression.contains("Chapter 1: THE FOUNDATION"));
        assert!(s.signature_achievements.len() >= 4);
        assert!(s.story_projects.len() >= 4);
        assert!(s.closing_vision.contains("Industrial Manufacturing Co."));
    }

    #[test]
    fn test_optical_story_elements() {
        let s = story("optical_engineer", "Laser Engineer", "PhotonCorp");
        assert!(s.opening_hook.starts_with("🔬 THE LIGHT ARCHITECT:"));
        assert!(s.professional_narrative.starts_with("Light has always been my medium"));
        let text = s.professional_narrative.to_lowercase();
        for term in ["precision optics", "photonic", "laser systems", "fiber optic"] {
            assert!(text.contains(term), "narrative missing {term}");
        }
        assert!(s.closing_vision.contains("PhotonCorp"));
    }

    #[test]
    fn test_software_and_data_hooks() {
        assert!(story("software_engineer", "Dev", "X").opening_hook.starts_with("💻 THE CODE CRAFTSMAN"));
        assert!(story("data_scientist", "DS", "X").opening_hook.starts_with("🔬 THE AI VISIONARY"));
    }

    #[test]
    fn test_dynamic_template_shape() {
        let s = story("carpenter", "Master Carpenter", "Artisan Builders");
        assert!(s.opening_hook.contains("CARPENTER"));
        for chapter in ["Chapter 1: THE FOUNDATION", "Chapter 2: THE GROWTH", "Chapter 3: THE MASTERY"] {
            assert!(s.career_progression.contains(chapter));
        }
        assert_eq!(s.signature_achievements.len(), 4);
        assert_eq!(s.story_projects.len(), 4);
        assert!(s.closing_vision.contains("Artisan Builders"));
        assert!(s.professional_narrative.to_lowercase().matches("journey").count() <= 1);
    }

    #[test]
    fn test_professions_get_distinct_stories() {
        let welder = story("welder", "Welder", "TestCorp");
        let engineer = story("mechanical_engineer", "Engineer", "TestCorp");
        assert_ne!(welder.opening_hook, engineer.opening_hook);
        assert_ne!(welder.professional_narrative, engineer.professional_narrative);
    }

    #[test]
    fn test_personalized_story_puts_resume_content_first() {
        let info = ResumeInfo {
            name: "John Smith".into(),
            experience: vec!["Built microservices cutting latency by 40%".into()],
            skills: vec!["Python".into(), "Docker".into()],
            projects: vec!["E-commerce Platform".into()],
            ..ResumeInfo::default()
        };
        let s = generate_personalized_story(&info, &FieldTag::default(), "Engineer", "Acme");
        assert!(s.professional_narrative.contains("Python, Docker"));
        assert_eq!(s.signature_achievements[0], "Built microservices cutting latency by 40%");
        assert_eq!(s.story_projects[0], "E-commerce Platform");
        assert!(s.story_projects.len() <= MAX_STORY_ITEMS);
    }

    #[test]
    fn test_personalized_story_without_resume_content_is_template() {
        let field = FieldTag::new("welder");
        let s = generate_personalized_story(&ResumeInfo::default(), &field, "Welder", "Co");
        assert_eq!(s, generate_career_story(&field, "Welder", "Co"));
    }
}
