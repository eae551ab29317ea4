//! Résumé Information Extractor: pulls name, contact lines, skills,
//! experience, education and projects out of free-form résumé text.
//!
//! Best effort and infallible: a line-by-line state machine over
//! [`SectionKind`]. Header lines switch the state, content lines are filed
//! under the current section.

use tracing::debug;

use crate::resume::sections::{is_banner, is_contact_line, parse_header, strip_bullet, SectionKind};
use crate::resume::ResumeInfo;

/// Contact details are only picked up outside a contact section within this many lines.
const CONTACT_WINDOW: usize = 10;
const MAX_NAME_CHARS: usize = 50;
/// A `Label: a, b` skills line keeps only the part after a label this short.
const MAX_SKILL_LABEL_WORDS: usize = 4;

pub fn extract_resume_information(text: &str) -> ResumeInfo {
    let mut info = ResumeInfo::default();
    let mut education: Vec<String> = Vec::new();
    let mut state = SectionKind::Unknown;
    let mut seen_header = false;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(kind) = parse_header(line) {
            state = kind;
            seen_header = true;
            continue;
        }

        let contact_like = is_contact_line(line);
        if state == SectionKind::Contact || (idx < CONTACT_WINDOW && contact_like) {
            push_unique(&mut info.contact_info, line.to_string());
            continue;
        }

        // Only the block above the first header can hold the name.
        if !seen_header && !info.has_name() && is_name_candidate(line) {
            info.name = line.to_string();
            continue;
        }

        match state {
            SectionKind::Skills => {
                for skill in split_skills(line) {
                    push_unique(&mut info.skills, skill);
                }
            }
            SectionKind::Experience => push_bullet(&mut info.experience, line),
            SectionKind::Projects => push_bullet(&mut info.projects, line),
            SectionKind::Education => education.push(strip_bullet(line).to_string()),
            SectionKind::Contact | SectionKind::Narrative | SectionKind::Unknown => {}
        }
    }

    info.education = education.join("\n");
    debug!(
        name = %info.name,
        contacts = info.contact_info.len(),
        skills = info.skills.len(),
        experience = info.experience.len(),
        projects = info.projects.len(),
        "résumé information extracted"
    );
    info
}

fn is_name_candidate(line: &str) -> bool {
    !line.contains('@')
        && line.chars().count() <= MAX_NAME_CHARS
        && !is_banner(line)
        && !line.starts_with(['-', '*', '•'])
        && line.chars().any(char::is_alphabetic)
}

fn push_unique(items: &mut Vec<String>, item: String) {
    if !item.is_empty() && !items.contains(&item) {
        items.push(item);
    }
}

fn push_bullet(items: &mut Vec<String>, line: &str) {
    push_unique(items, strip_bullet(line).to_string());
}

/// Splits a skills line on `,`, `|`, `•` and `;`, dropping a short leading label.
fn split_skills(line: &str) -> Vec<String> {
    let line = strip_bullet(line);
    let body = match line.split_once(':') {
        Some((label, rest)) if label.split_whitespace().count() <= MAX_SKILL_LABEL_WORDS => rest,
        _ => line,
    };
    body.split([',', '|', '•', ';'])
        .map(|s| strip_bullet(s).trim_end_matches('.').trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
