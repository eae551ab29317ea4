//! Field Detector: maps a job description and/or role title to a career field tag.
//!
//! Rules are evaluated strictly in declaration order; the first match wins.
//! Specific domains (optics, welding, the software families) sit ahead of the
//! broad categories so that e.g. "optical engineer" never falls into the
//! generic engineering bucket. Detection never fails: the last resort is the
//! `software_engineer` default.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fields::{mentions, FieldTag};

/// Which stage of the rule cascade produced the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    PriorityRule,
    Category,
    StaticTable,
    NovelTerm,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub field: FieldTag,
    pub source: DetectionSource,
}

// ────────────────────────────────────────────────────────────────────────────
// Rule tables
// ────────────────────────────────────────────────────────────────────────────

/// Specific domains, checked first. Any single term fires the rule.
const PRIORITY_RULES: &[(&str, &[&str])] = &[
    (
        "optical_engineer",
        &["optical", "optics", "photonic", "laser", "zemax", "lens design"],
    ),
    ("welder", &["weld", "fabricator", "fabrication specialist"]),
    (
        "machine_learning_engineer",
        &["machine learning engineer", "ml engineer", "mlops"],
    ),
    ("data_scientist", &["data scientist", "data science", "data analyst"]),
    (
        "ai_researcher",
        &["ai researcher", "ai research", "artificial intelligence research"],
    ),
    (
        "web_developer",
        &["web developer", "web development", "frontend", "front-end", "full stack", "full-stack"],
    ),
    (
        "mobile_developer",
        &["mobile developer", "mobile app", "ios developer", "android developer"],
    ),
    (
        "devops_engineer",
        &["devops", "site reliability", "sre", "platform engineer"],
    ),
    (
        "security_engineer",
        &["security engineer", "cybersecurity", "penetration test", "infosec", "security analyst"],
    ),
    ("quantum_scientist", &["quantum"]),
    (
        "mathematician",
        &["mathematician", "mathematics", "topology", "algebraic"],
    ),
    ("physicist", &["physicist", "physics"]),
];

/// A broad category: its guard terms open it, then the first specialty whose
/// terms match decides the tag. A category whose guard fires but has no
/// matching specialty falls through to the next category.
struct Category {
    guard: &'static [&'static str],
    specialties: &'static [(&'static str, &'static [&'static str])],
}

const ALWAYS: &[&str] = &[];

const CATEGORIES: &[Category] = &[
    // medical
    Category {
        guard: &[
            "surgeon", "doctor", "physician", "medical", "hospital", "patient", "surgery", "clinic",
            "nurse", "healthcare",
        ],
        specialties: &[
            ("brain_surgeon", &["brain", "neurosurg", "neurolog"]),
            ("cardiologist", &["heart", "cardio", "cardiac"]),
            ("surgeon", &["surgeon"]),
            ("doctor", &["doctor", "physician"]),
            ("nurse", &["nurse"]),
        ],
    },
    // engineering
    Category {
        guard: &["engineer", "engineering", "technical", "design", "development"],
        specialties: &[
            ("software_engineer", &["software", "programming", "code"]),
            ("mechanical_engineer", &["mechanical", "machine"]),
            ("civil_engineer", &["civil", "construction"]),
            ("electrician", &["electrical", "electric"]),
        ],
    },
    // trades
    Category {
        guard: &["technician", "repair", "maintenance", "install", "fix", "service"],
        specialties: &[
            ("plumber", &["plumb", "pipe"]),
            ("electrician", &["electric", "wiring"]),
            ("mechanic", &["car", "auto", "vehicle"]),
        ],
    },
    // food service
    Category {
        guard: &["chef", "cook", "kitchen", "culinary", "restaurant", "food", "dishwasher"],
        specialties: &[
            ("chef", &["chef", "culinary"]),
            ("dishwasher", &["dishwasher", "dish"]),
            ("cook", &["cook"]),
        ],
    },
    // education
    Category {
        guard: &["teacher", "education", "school", "student", "classroom", "curriculum"],
        specialties: &[("teacher", ALWAYS)],
    },
    // legal
    Category {
        guard: &["lawyer", "attorney", "legal", "law", "court", "litigation"],
        specialties: &[("lawyer", ALWAYS)],
    },
    // finance
    Category {
        guard: &["finance", "accounting", "accountant", "financial", "banking", "investment"],
        specialties: &[("accountant", &["account"]), ("financial_analyst", ALWAYS)],
    },
];

/// Legacy keyword table: a field matches when its own tag appears in the text
/// or at least two of its keywords do.
const STATIC_TABLE: &[(&str, &[&str])] = &[
    (
        "electrician",
        &[
            "electrician", "electrical", "wiring", "voltage", "circuits", "nec", "electrical code",
            "motor control", "plc",
        ],
    ),
    (
        "plumber",
        &["plumber", "plumbing", "pipes", "water", "drain", "fixtures", "water heater", "sewer"],
    ),
    (
        "nurse",
        &["nurse", "nursing", "patient", "healthcare", "medical", "clinical", "rn", "lpn", "hospital"],
    ),
    (
        "teacher",
        &["teacher", "education", "classroom", "student", "curriculum", "lesson", "school", "teaching"],
    ),
    (
        "mechanic",
        &["mechanic", "automotive", "engine", "repair", "maintenance", "car", "vehicle", "diagnostic"],
    ),
    (
        "dishwasher",
        &[
            "dishwasher", "kitchen", "restaurant", "cleaning", "dishes", "food service", "sanitization",
            "busing",
        ],
    ),
    (
        "chef",
        &[
            "chef", "culinary", "cooking", "kitchen management", "menu", "cuisine", "culinary arts",
            "food preparation",
        ],
    ),
];

const STATIC_KEYWORD_THRESHOLD: usize = 2;

// ────────────────────────────────────────────────────────────────────────────
// Detection
// ────────────────────────────────────────────────────────────────────────────

/// Returns the field tag for the given text. Never fails.
pub fn detect_career_field(text: &str) -> FieldTag {
    classify(text).field
}

/// Runs the full rule cascade and reports which stage decided.
pub fn classify(text: &str) -> Detection {
    let content = text.to_lowercase();

    let detection = match_priority_rules(&content)
        .map(|field| (field, DetectionSource::PriorityRule))
        .or_else(|| match_categories(&content).map(|field| (field, DetectionSource::Category)))
        .or_else(|| match_static_table(&content).map(|field| (field, DetectionSource::StaticTable)))
        .map(|(field, source)| Detection {
            field: FieldTag::new(field),
            source,
        })
        .or_else(|| {
            novel_term(&content).map(|field| Detection {
                field,
                source: DetectionSource::NovelTerm,
            })
        })
        .unwrap_or_else(|| Detection {
            field: FieldTag::default(),
            source: DetectionSource::Default,
        });

    debug!(field = %detection.field, source = ?detection.source, "career field detected");
    detection
}

fn any_term(content: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| mentions(content, term))
}

fn match_priority_rules(content: &str) -> Option<&'static str> {
    PRIORITY_RULES
        .iter()
        .find(|(_, terms)| any_term(content, terms))
        .map(|(field, _)| *field)
}

fn match_categories(content: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .filter(|category| any_term(content, category.guard))
        .find_map(|category| {
            category
                .specialties
                .iter()
                .find(|(_, terms)| terms.is_empty() || any_term(content, terms))
                .map(|(field, _)| *field)
        })
}

fn match_static_table(content: &str) -> Option<&'static str> {
    STATIC_TABLE
        .iter()
        .find(|(field, keywords)| {
            let hits = keywords.iter().filter(|kw| mentions(content, kw)).count();
            content.contains(*field) || hits >= STATIC_KEYWORD_THRESHOLD
        })
        .map(|(field, _)| *field)
}

/// A one- or two-word input that matched nothing is taken as a new profession.
/// The normalized tag must still be longer than two characters and hold a
/// letter or digit.
fn novel_term(content: &str) -> Option<FieldTag> {
    let words: Vec<String> = content
        .split_whitespace()
        .map(|w| w.replace([',', '.', ':'], ""))
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() || words.len() > 2 {
        return None;
    }

    let tag = FieldTag::new(&words.join(" "));
    let slug = tag.as_str();
    (slug.chars().count() > 2 && slug.chars().any(char::is_alphanumeric)).then_some(tag)
}
