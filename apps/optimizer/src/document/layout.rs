//! Rebuilds the chosen résumé variant as a one-column Word document.
//!
//! The variant text is parsed back into sections with the same
//! [`SectionKind`] machine the extractor uses, then laid out in a fixed
//! order: name, contact, education, experience and projects, skills,
//! references. Sections the text lacks are filled from the field catalog.

use tracing::debug;

use crate::assembler::styles::NAME_PLACEHOLDER;
use crate::document::docx::{default_page_setup, Document, Paragraph, ParagraphStyle};
use crate::fields::{get_field_data, FieldTag};
use crate::resume::sections::{
    is_banner, is_contact_line, is_education_line, parse_header, strip_bullet, urls_in, SectionKind,
};

const NAME_PT: u8 = 26;
const HEADING_PT: u8 = 14;
const BODY_PT: u8 = 12;
const MAX_NAME_CHARS: usize = 50;

const EXPERIENCE_HEADING: &str = "Experience & Projects (Continuous Timeline)";
const PROJECTS_LABEL: &str = "Key Projects & Certifications:";

/// Sections recovered from a rendered variant.
#[derive(Debug, Default, PartialEq)]
pub struct ParsedResume {
    pub name: Option<String>,
    pub contact: Vec<String>,
    pub education: Vec<String>,
    /// Job titles stay as-is, bullets keep their marker.
    pub experience: Vec<String>,
    pub projects: Vec<String>,
    pub skills: Vec<String>,
}

pub fn parse_variant(text: &str) -> ParsedResume {
    let mut parsed = ParsedResume::default();
    let mut state = SectionKind::Unknown;
    let mut seen_header = false;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(kind) = parse_header(line) {
            state = kind;
            seen_header = true;
            continue;
        }

        if state == SectionKind::Contact || (!seen_header && is_contact_line(line)) {
            if is_education_line(line) {
                push_unique(&mut parsed.education, strip_bullet(line));
            } else {
                push_unique(&mut parsed.contact, line);
            }
            continue;
        }

        if !seen_header {
            // The line under the name is a headline, which the layout drops.
            if parsed.name.is_none() && is_name_line(line) {
                parsed.name = Some(line.to_string());
            }
            continue;
        }

        match state {
            SectionKind::Education => push_unique(&mut parsed.education, strip_bullet(line)),
            SectionKind::Experience => parsed.experience.push(line.to_string()),
            SectionKind::Projects => push_unique(&mut parsed.projects, strip_bullet(line)),
            SectionKind::Skills => push_unique(&mut parsed.skills, strip_bullet(line)),
            SectionKind::Contact | SectionKind::Narrative | SectionKind::Unknown => {}
        }
    }
    parsed
}

fn is_name_line(line: &str) -> bool {
    line.chars().count() <= MAX_NAME_CHARS
        && !is_banner(line)
        && !line.starts_with(['-', '*', '•'])
        && line.chars().any(char::is_alphabetic)
}

fn is_bullet(line: &str) -> bool {
    line.starts_with(['-', '*', '•', '·'])
}

fn push_unique(items: &mut Vec<String>, item: &str) {
    let item = item.trim();
    if !item.is_empty() && !items.iter().any(|i| i == item) {
        items.push(item.to_string());
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

pub fn build_resume_document(primary: &str, field: &FieldTag) -> Document {
    let parsed = parse_variant(primary);
    let data = get_field_data(field);
    debug!(
        field = %field,
        has_name = parsed.name.is_some(),
        contact = parsed.contact.len(),
        experience = parsed.experience.len(),
        "laying out résumé document"
    );

    let mut doc = Document::new(default_page_setup());

    let name = parsed.name.as_deref().unwrap_or(NAME_PLACEHOLDER);
    doc.push(Paragraph::new(ParagraphStyle::Title).centered().text(name, NAME_PT));
    for line in &parsed.contact {
        doc.push(contact_paragraph(line));
    }

    heading(&mut doc, "Education");
    let education = if parsed.education.is_empty() {
        data.education.lines().map(str::to_string).collect()
    } else {
        parsed.education
    };
    for line in &education {
        doc.push(Paragraph::blank().text(line.as_str(), BODY_PT));
    }

    heading(&mut doc, EXPERIENCE_HEADING);
    let mut experience = parsed.experience;
    if experience.is_empty() {
        experience.push(data.experience_title.clone());
        experience.extend(data.experience_bullets.iter().map(|b| format!("• {b}")));
    } else if experience.first().map_or(false, |l| is_bullet(l)) {
        experience.insert(0, data.experience_title.clone());
    }
    for line in &experience {
        if is_bullet(line) {
            doc.push(Paragraph::blank().text(format!("- {}", strip_bullet(line)), BODY_PT));
        } else {
            doc.push(Paragraph::blank().bold(line.as_str(), BODY_PT));
        }
    }

    let projects = if parsed.projects.is_empty() {
        data.projects
    } else {
        parsed.projects
    };
    doc.push(Paragraph::blank().bold(PROJECTS_LABEL, BODY_PT));
    for project in &projects {
        doc.push(Paragraph::blank().text(format!("- {project}"), BODY_PT));
    }

    heading(&mut doc, "Technical Skills");
    let skills = if parsed.skills.is_empty() {
        data.skills
    } else {
        parsed.skills
    };
    doc.push(Paragraph::blank().text(skills.join(", "), BODY_PT));

    heading(&mut doc, "References");
    doc.push(Paragraph::blank().text("Available upon request", BODY_PT));
    doc
}

fn heading(doc: &mut Document, title: &str) {
    doc.push(Paragraph::blank());
    doc.push(Paragraph::new(ParagraphStyle::Heading1).text(title, HEADING_PT));
}

/// Centered contact line with every URL turned into a hyperlink.
fn contact_paragraph(line: &str) -> Paragraph {
    let mut paragraph = Paragraph::blank().centered();
    let mut cursor = 0;
    for (start, end) in urls_in(line) {
        if start > cursor {
            paragraph = paragraph.text(&line[cursor..start], BODY_PT);
        }
        let shown = &line[start..end];
        let target = if shown.starts_with("http") {
            shown.to_string()
        } else {
            format!("https://{shown}")
        };
        paragraph = paragraph.link(target, shown, BODY_PT);
        cursor = end;
    }
    if cursor < line.len() {
        paragraph = paragraph.text(&line[cursor..], BODY_PT);
    }
    paragraph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::reader::read_docx_text;

    const VARIANT: &str = "CAREER STORY RESUME FOR OPTICAL ENGINEER

🔬 THE LIGHT ARCHITECT: Engineering the future through precision optics

JANE DOE
Optical Engineer Professional

CONTACT INFORMATION:
📞 (555) 123-4567 | ✉️ jane@example.com
🔗 LinkedIn: www.linkedin.com/in/jane | 💻 GitHub: https://github.com/jane
Stanford University, MS Optics 2020

PROFESSIONAL NARRATIVE:
Light has always been my medium.

TECHNICAL COMPETENCIES:
• Zemax
• Lens Design

PROFESSIONAL EXPERIENCE & KEY ACHIEVEMENTS:
• Designed a 12-element zoom lens
• Cut alignment time by 40%

DEFINING PROJECTS:
• Fiber coupler prototype

EDUCATION:
Stanford University, MS Optics 2020
";

    fn optical() -> FieldTag {
        FieldTag::new("optical_engineer")
    }

    #[test]
    fn test_parse_variant_sections() {
        let parsed = parse_variant(VARIANT);
        assert_eq!(parsed.name.as_deref(), Some("JANE DOE"));
        assert_eq!(parsed.contact.len(), 2);
        assert_eq!(parsed.education, vec!["Stanford University, MS Optics 2020"]);
        assert_eq!(parsed.skills, vec!["Zemax", "Lens Design"]);
        assert_eq!(parsed.projects, vec!["Fiber coupler prototype"]);
        assert_eq!(parsed.experience.len(), 2);
    }

    #[test]
    fn test_name_and_contact_appear_once() {
        let doc = build_resume_document(VARIANT, &optical());
        let lines = doc.visible_lines();
        assert_eq!(lines[0], "JANE DOE");
        assert_eq!(lines.iter().filter(|l| l.contains("JANE DOE")).count(), 1);
        assert_eq!(lines.iter().filter(|l| l.contains("jane@example.com")).count(), 1);
        assert_eq!(lines.iter().filter(|l| l.contains("Stanford University")).count(), 1);
        assert_eq!(doc.paragraphs[0].style, ParagraphStyle::Title);
    }

    #[test]
    fn test_section_order_and_bullets() {
        let lines = build_resume_document(VARIANT, &optical()).visible_lines();
        let pos = |needle: &str| lines.iter().position(|l| l == needle).unwrap();
        assert!(pos("Education") < pos(EXPERIENCE_HEADING));
        assert!(pos(EXPERIENCE_HEADING) < pos(PROJECTS_LABEL));
        assert!(pos(PROJECTS_LABEL) < pos("Technical Skills"));
        assert!(pos("Technical Skills") < pos("References"));
        assert!(lines.contains(&"- Cut alignment time by 40%".to_string()));
        assert!(lines.contains(&"Zemax, Lens Design".to_string()));
        assert_eq!(lines.last().unwrap(), "Available upon request");
        assert!(!lines.iter().any(|l| l.contains("medium")));
    }

    #[test]
    fn test_contact_urls_become_hyperlinks() {
        let doc = build_resume_document(VARIANT, &optical());
        assert_eq!(
            doc.hyperlinks(),
            vec!["https://www.linkedin.com/in/jane", "https://github.com/jane"]
        );
        assert!(doc
            .visible_lines()
            .contains(&"🔗 LinkedIn: www.linkedin.com/in/jane | 💻 GitHub: https://github.com/jane".to_string()));
    }

    #[test]
    fn test_missing_sections_fall_back_to_catalog() {
        let data = get_field_data(&optical());
        let lines = build_resume_document("PROFESSIONAL NARRATIVE:\nJust a story.", &optical()).visible_lines();
        assert_eq!(lines[0], NAME_PLACEHOLDER);
        assert!(lines.contains(&data.experience_title));
        assert!(lines.contains(&data.skills.join(", ")));
    }

    #[test]
    fn test_round_trip_through_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("optimized_resume.docx");
        let doc = build_resume_document(VARIANT, &optical());
        doc.save(&path).unwrap();
        assert_eq!(read_docx_text(&path).unwrap(), doc.visible_lines().join("\n"));
    }
}
