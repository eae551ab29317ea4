//! ATS compatibility: a linear, deterministic score of how well a résumé
//! variant survives applicant-tracking-system parsing.
//!
//! Algorithm:
//! 1. Start at 100.
//! 2. −15 per missing standard section (contact, experience, education, skills).
//! 3. −2 per emoji (capped at −20), −10 if graphics are referenced.
//! 4. Keyword density ≥3% is fine, ≥1.5% costs 5, below costs 15.
//! 5. −10 without bullet lines, −5 without quantified metrics.
//! 6. Narrative phrasing costs 5 (1–5 phrases) or 10 (more than 5).
//! 7. Clamp to 0..=100 and bucket into a level.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AtsLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl AtsLevel {
    fn from_score(score: u32) -> Self {
        match score {
            85.. => AtsLevel::Excellent,
            70..=84 => AtsLevel::Good,
            55..=69 => AtsLevel::Fair,
            _ => AtsLevel::Poor,
        }
    }
}

impl fmt::Display for AtsLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AtsLevel::Excellent => "EXCELLENT",
            AtsLevel::Good => "GOOD",
            AtsLevel::Fair => "FAIR",
            AtsLevel::Poor => "POOR",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsReport {
    pub score: u32, // 0 – 100
    pub level: AtsLevel,
    pub strengths: Vec<String>,
    pub issues: Vec<String>,
    /// Common-keyword hits per 100 words.
    pub keyword_density: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Rule tables
// ────────────────────────────────────────────────────────────────────────────

const REQUIRED_SECTIONS: &[(&str, &[&str])] = &[
    ("contact", &["contact", "phone", "email", "@"]),
    ("experience", &["experience", "work", "employment", "professional"]),
    ("education", &["education", "degree", "university", "college"]),
    ("skills", &["skills", "technical", "competencies", "technologies"]),
];

const EMOJI: &[&str] = &["🔥", "🔬", "💻", "🌟", "📞", "✉️", "🔗"];
const GRAPHICS_WORDS: &[&str] = &["image", "graphic", "chart", "logo"];
const COMMON_KEYWORDS: &[&str] = &[
    "experience", "skills", "project", "develop", "manage", "lead", "engineer", "technical",
    "analysis", "design", "system",
];
const NARRATIVE_PHRASES: &[&str] = &[
    "my journey", "my story", "career story", "chapter", "narrative", "always been", "passion for",
    "fascination with",
];

const MISSING_SECTION_PENALTY: i32 = 15;
const EMOJI_PENALTY: i32 = 2;
const EMOJI_PENALTY_CAP: i32 = 20;
const GRAPHICS_PENALTY: i32 = 10;
const NO_BULLETS_PENALTY: i32 = 10;
const NO_METRICS_PENALTY: i32 = 5;
const GOOD_DENSITY: f64 = 3.0;
const MODERATE_DENSITY: f64 = 1.5;
const HEAVY_NARRATIVE: usize = 5;

static METRIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:%|\+|years?|months?)").expect("metric pattern is valid"));

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

pub fn analyze_ats_compatibility(content: &str) -> AtsReport {
    let text = content.to_lowercase();
    let mut score: i32 = 100;
    let mut strengths = Vec::new();
    let mut issues = Vec::new();

    for (section, markers) in REQUIRED_SECTIONS {
        if markers.iter().any(|m| text.contains(m)) {
            strengths.push(format!("Has {section} section"));
        } else {
            issues.push(format!("Missing {section} section"));
            score -= MISSING_SECTION_PENALTY;
        }
    }

    let emoji_count = EMOJI.iter().map(|e| content.matches(e).count()).sum::<usize>() as i32;
    if emoji_count > 0 {
        issues.push(format!("Contains {emoji_count} emojis (ATS may not parse)"));
        score -= (emoji_count * EMOJI_PENALTY).min(EMOJI_PENALTY_CAP);
    } else {
        strengths.push("Clean text formatting".to_string());
    }

    if GRAPHICS_WORDS.iter().any(|w| text.contains(w)) {
        issues.push("Contains graphics/images".to_string());
        score -= GRAPHICS_PENALTY;
    } else {
        strengths.push("Text-only format".to_string());
    }

    let word_count = text.split_whitespace().count();
    let keyword_hits: usize = COMMON_KEYWORDS.iter().map(|k| text.matches(k).count()).sum();
    let keyword_density = if word_count == 0 {
        0.0
    } else {
        keyword_hits as f64 / word_count as f64 * 100.0
    };
    if keyword_density >= GOOD_DENSITY {
        strengths.push(format!("Good keyword density ({keyword_density:.1}%)"));
    } else if keyword_density >= MODERATE_DENSITY {
        score -= 5;
    } else {
        issues.push("Low keyword density".to_string());
        score -= 15;
    }

    let bullets = content
        .lines()
        .filter(|l| {
            let l = l.trim_start();
            l.starts_with('•') || l.starts_with('-')
        })
        .count();
    if bullets > 0 {
        strengths.push(format!("Uses {bullets} bullet points"));
    } else {
        issues.push("No bullet points for readability".to_string());
        score -= NO_BULLETS_PENALTY;
    }

    let metrics = METRIC.find_iter(&text).count();
    if metrics > 0 {
        strengths.push(format!("Contains {metrics} quantified metrics"));
    } else {
        score -= NO_METRICS_PENALTY;
    }

    let narrative: usize = NARRATIVE_PHRASES.iter().map(|p| text.matches(p).count()).sum();
    if narrative > HEAVY_NARRATIVE {
        issues.push(format!("Heavy narrative style ({narrative} narrative phrases)"));
        score -= 10;
    } else if narrative > 0 {
        score -= 5;
    } else {
        strengths.push("Fact-based professional style".to_string());
    }

    let score = score.clamp(0, 100) as u32;
    AtsReport {
        score,
        level: AtsLevel::from_score(score),
        strengths,
        issues,
        keyword_density,
    }
}

/// Human-readable block for one scored variant.
pub fn render_ats_report(label: &str, report: &AtsReport) -> String {
    let mut out = format!(
        "{label}: {}/100 ({})\nKeyword density: {:.2}%\n",
        report.score, report.level, report.keyword_density
    );
    out.push_str(&format!("Strengths ({}):\n", report.strengths.len()));
    for s in &report.strengths {
        out.push_str(&format!("• {s}\n"));
    }
    out.push_str(&format!("Potential issues ({}):\n", report.issues.len()));
    if report.issues.is_empty() {
        out.push_str("• None found\n");
    }
    for i in &report.issues {
        out.push_str(&format!("• {i}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN: &str = "JANE DOE
Contact: jane@example.com | Phone: 555-123-4567

PROFESSIONAL EXPERIENCE:
Senior Engineer | Acme | 2019 - Present
• Led system design for a platform serving 2M users, cutting costs by 30%
• Managed a technical team of 8 engineers across 3 years
• Developed analysis tooling and project dashboards

EDUCATION:
State University — B.S. Computer Science

TECHNICAL SKILLS:
Rust, Python, SQL, Kubernetes";

    #[test]
    fn test_clean_resume_scores_excellent() {
        let r = analyze_ats_compatibility(CLEAN);
        assert_eq!(r.score, 100, "issues: {:?}", r.issues);
        assert_eq!(r.level, AtsLevel::Excellent);
        assert!(r.issues.is_empty());
        assert!(r.keyword_density >= GOOD_DENSITY);
    }

    #[test]
    fn test_empty_text_loses_everything_it_can() {
        let r = analyze_ats_compatibility("");
        // 4 sections, low density, no bullets, no metrics.
        assert_eq!(r.score, 100 - 60 - 15 - 10 - 5);
        assert_eq!(r.level, AtsLevel::Poor);
        assert_eq!(r.keyword_density, 0.0);
    }

    #[test]
    fn test_emoji_penalty_is_capped() {
        let many = format!("{CLEAN}\n{}", "🔥".repeat(30));
        assert_eq!(analyze_ats_compatibility(&many).score, 80);
        let few = format!("{CLEAN}\n🔬 💻");
        assert_eq!(analyze_ats_compatibility(&few).score, 96);
    }

    #[test]
    fn test_narrative_phrases_cost_points() {
        let light = format!("{CLEAN}\nI have always been curious.");
        assert_eq!(analyze_ats_compatibility(&light).score, 95);
        let heavy = format!(
            "{CLEAN}\nchapter chapter chapter my journey my story narrative"
        );
        let r = analyze_ats_compatibility(&heavy);
        assert_eq!(r.score, 90);
        assert!(r.issues[0].contains("Heavy narrative"));
    }

    #[test]
    fn test_graphics_words_penalized() {
        let with_logo = format!("{CLEAN}\nCompany logo attached");
        assert_eq!(analyze_ats_compatibility(&with_logo).score, 90);
    }

    #[test]
    fn test_levels() {
        assert_eq!(AtsLevel::from_score(85), AtsLevel::Excellent);
        assert_eq!(AtsLevel::from_score(84), AtsLevel::Good);
        assert_eq!(AtsLevel::from_score(70), AtsLevel::Good);
        assert_eq!(AtsLevel::from_score(55), AtsLevel::Fair);
        assert_eq!(AtsLevel::from_score(54), AtsLevel::Poor);
        assert_eq!(AtsLevel::Fair.to_string(), "FAIR");
    }

    #[test]
    fn test_render_lists_strengths_and_issues() {
        let report = analyze_ats_compatibility(CLEAN);
        let text = render_ats_report("ATS-optimized", &report);
        assert!(text.starts_with("ATS-optimized: 100/100 (EXCELLENT)"));
        assert!(text.contains("• None found"));
    }
}
