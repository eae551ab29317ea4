//! Section header recognition shared by the extractor and the DOCX layout.
//!
//! A header is a short line that either ends with `:`, is fully upper-case,
//! or is title-cased and leads with a section keyword. Its kind comes from the
//! first keyword table row whose keyword starts one of its words.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Contact,
    Narrative,
    Skills,
    Experience,
    Education,
    Projects,
    Unknown,
}

/// Order matters: "Experience & Projects" is experience, "Certifications &
/// Achievements" is projects.
const HEADER_KEYWORDS: &[(SectionKind, &[&str])] = &[
    (SectionKind::Contact, &["contact"]),
    (SectionKind::Education, &["education", "academic"]),
    (SectionKind::Experience, &["experience", "employment", "work"]),
    (SectionKind::Projects, &["project", "certification", "portfolio"]),
    (SectionKind::Experience, &["achievement", "accomplishment"]),
    (
        SectionKind::Skills,
        &["skill", "competenc", "technolog", "expertise", "toolkit"],
    ),
    (
        SectionKind::Narrative,
        &["summary", "narrative", "profile", "objective", "about", "progression", "vision"],
    ),
    (SectionKind::Unknown, &["reference", "interest", "hobbies"]),
];

const MAX_HEADER_WORDS: usize = 5;
const MAX_TITLED_WORDS: usize = 3;
const MAX_HEADER_CHARS: usize = 60;

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]?\d{4}").expect("phone pattern is valid")
});

static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(https?://|www\.)[^\s|,;)"']+"#).expect("url pattern is valid"));

fn words_of(body: &str) -> Vec<String> {
    body.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

fn keyword_kind(words: &[String]) -> Option<SectionKind> {
    HEADER_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            words
                .iter()
                .any(|w| keywords.iter().any(|kw| w.starts_with(kw)))
        })
        .map(|(kind, _)| *kind)
}

/// Returns the section a header line opens, or `None` for ordinary content.
pub fn parse_header(line: &str) -> Option<SectionKind> {
    let trimmed = line.trim();
    if trimmed.starts_with(['-', '*', '•']) {
        return None;
    }
    let has_colon = trimmed.ends_with(':');
    let body = trimmed.trim_end_matches(':').trim();
    if body.is_empty()
        || body.chars().count() > MAX_HEADER_CHARS
        || body.contains([',', '|', '@', '•', ':'])
    {
        return None;
    }

    let words = words_of(body);
    if words.is_empty() || words.len() > MAX_HEADER_WORDS {
        return None;
    }

    let upper = body.chars().any(char::is_alphabetic) && !body.chars().any(char::is_lowercase);
    let kind = keyword_kind(&words);

    if has_colon {
        return Some(kind.unwrap_or(SectionKind::Unknown));
    }
    if upper {
        return kind;
    }

    let titled = body.split_whitespace().all(|w| {
        w.chars()
            .find(|c| c.is_alphanumeric())
            .map_or(true, |c| !c.is_lowercase())
    });
    let leads_with_keyword = keyword_kind(&words[..1]).is_some();
    if titled && (words.len() <= MAX_TITLED_WORDS || leads_with_keyword) {
        return kind;
    }
    None
}

/// Contact-shaped content: email, phone, profile links.
pub fn is_contact_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains('@')
        || ["phone", "linkedin", "github", "http", "www."]
            .iter()
            .any(|m| lower.contains(m))
        || PHONE.is_match(line)
}

/// Decorative title lines produced by the résumé variants ("CAREER STORY
/// RESUME FOR ...", emoji hooks) that are neither a name nor content.
pub fn is_banner(line: &str) -> bool {
    let trimmed = line.trim();
    // Misc symbols, dingbats and the U+1F000 pictograph planes.
    let starts_with_emoji = trimmed
        .chars()
        .next()
        .map_or(false, |c| matches!(c as u32, 0x2600..=0x27BF | 0x1F000..));
    if starts_with_emoji {
        return true;
    }
    let upper = trimmed.to_uppercase();
    trimmed == upper && (upper.contains("RESUME") || upper.contains("RÉSUMÉ"))
}

/// Institution-shaped line, used to pull education out of other sections.
pub fn is_education_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    ["university", "college", "institute", "school", "academy"]
        .iter()
        .any(|m| lower.contains(m))
}

/// Removes a leading bullet marker (`-`, `*`, `•`, `·`) and surrounding space.
pub fn strip_bullet(line: &str) -> &str {
    line.trim()
        .trim_start_matches(['-', '*', '•', '·', '▪', '◦'])
        .trim()
}

pub fn urls_in(line: &str) -> Vec<(usize, usize)> {
    URL.find_iter(line).map(|m| (m.start(), m.end())).collect()
}
