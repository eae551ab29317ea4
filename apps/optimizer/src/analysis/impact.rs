//! Bullet impact check for the flaw report: does each experience line state
//! a measurable result, and which résumé clichés stand in for one?

/// Duty-style openers that describe a role instead of an outcome.
const WEAK_PHRASES: &[&str] = &[
    "responsible for",
    "duties included",
    "worked on",
    "helped",
    "assisted",
    "participated in",
    "involved in",
    "tasked with",
    "supported",
    "collaborated",
];

/// Amounts a recruiter cannot verify.
const VAGUE_AMOUNTS: &[&str] = &[
    "various",
    "several",
    "many",
    "numerous",
    "multiple",
    "significant",
    "substantial",
    "a lot of",
];

const CURRENCY: [char; 4] = ['$', '€', '£', '¥'];

/// Result of checking one experience bullet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletCheck<'a> {
    pub bullet: &'a str,
    /// Holds a digit (counts, years, `3x`), a percentage or an amount of money.
    pub quantified: bool,
    pub weak_phrases: Vec<&'static str>,
    pub vague_amounts: Vec<&'static str>,
}

impl BulletCheck<'_> {
    pub fn is_measurable(&self) -> bool {
        self.quantified
    }

    /// One rewrite hint per finding; empty for a measurable bullet.
    pub fn advice(&self) -> Vec<String> {
        if self.quantified {
            return Vec::new();
        }
        let mut advice: Vec<String> = self
            .weak_phrases
            .iter()
            .map(|p| format!("Replace '{p}' with the result you delivered, e.g. 'cut costs 15%'"))
            .collect();
        advice.extend(
            self.vague_amounts
                .iter()
                .map(|a| format!("Swap '{a}' for an exact figure: 4 clients, 12 sites, 30 hours")),
        );
        if advice.is_empty() {
            advice.push("Add a number: people served, money saved, time cut or volume handled".to_string());
        }
        advice
    }
}

pub fn check_bullet(bullet: &str) -> BulletCheck<'_> {
    let lower = bullet.to_lowercase();
    let quantified = bullet.chars().any(|c| c.is_ascii_digit() || c == '%' || CURRENCY.contains(&c));
    let found = |table: &[&'static str]| -> Vec<&'static str> {
        table.iter().copied().filter(|term| lower.contains(term)).collect()
    };
    BulletCheck {
        bullet,
        quantified,
        weak_phrases: found(WEAK_PHRASES),
        vague_amounts: found(VAGUE_AMOUNTS),
    }
}

/// Text block appended to the flaw report: one line per bullet checked.
pub fn render_impact_check(bullets: &[String]) -> String {
    let mut out = String::from("BULLET IMPACT CHECK:\n");
    if bullets.is_empty() {
        out.push_str("- No experience bullets could be extracted from the résumé\n");
        return out;
    }

    let checks: Vec<BulletCheck<'_>> = bullets.iter().map(|b| check_bullet(b)).collect();
    for check in &checks {
        if check.is_measurable() {
            out.push_str(&format!("✓ {}\n", check.bullet));
            continue;
        }
        out.push_str(&format!("✗ {}\n", check.bullet));
        for hint in check.advice() {
            out.push_str(&format!("    {hint}\n"));
        }
    }

    let unmeasured = checks.iter().filter(|c| !c.is_measurable()).count();
    if unmeasured == 0 {
        out.push_str(&format!("\nAll {} bullets show a measurable result\n", checks.len()));
    } else {
        out.push_str(&format!(
            "\n{unmeasured} of {} bullets lack a measurable result; add numbers, percentages or time saved\n",
            checks.len()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_money_and_percentages_count() {
        assert!(check_bullet("Reduced scrap by 40% on the night shift").is_measurable());
        assert!(check_bullet("Managed a $50,000 renovation budget").is_measurable());
        assert!(check_bullet("Trained 15 apprentices in TIG welding").is_measurable());
        assert!(check_bullet("Made builds 3x faster").is_measurable());
        assert!(check_bullet("Generated €200k in new revenue").is_measurable());
    }

    #[test]
    fn test_duty_phrasing_is_flagged() {
        let check = check_bullet("Responsible for inventory and helped customers");
        assert!(!check.is_measurable());
        assert_eq!(check.weak_phrases, vec!["responsible for", "helped"]);
        assert_eq!(check.advice().len(), 2);
    }

    #[test]
    fn test_vague_amounts_are_flagged() {
        let check = check_bullet("Collaborated with team on various projects");
        assert_eq!(check.weak_phrases, vec!["collaborated"]);
        assert_eq!(check.vague_amounts, vec!["various"]);
        assert!(check.advice()[1].contains("'various'"));
    }

    #[test]
    fn test_plain_unquantified_bullet_gets_generic_advice() {
        let check = check_bullet("Architected the authentication system");
        assert!(check.weak_phrases.is_empty() && check.vague_amounts.is_empty());
        assert_eq!(check.advice().len(), 1);
        assert!(check.advice()[0].starts_with("Add a number"));
    }

    #[test]
    fn test_measurable_bullet_needs_no_advice() {
        let check = check_bullet("Helped cut onboarding time by 2 weeks");
        assert_eq!(check.weak_phrases, vec!["helped"]);
        assert!(check.advice().is_empty());
    }

    #[test]
    fn test_render_impact_check() {
        let bullets = vec![
            "Reduced latency by 40%".to_string(),
            "Built database systems with SQL".to_string(),
        ];
        let text = render_impact_check(&bullets);
        assert!(text.starts_with("BULLET IMPACT CHECK:"));
        assert!(text.contains("✓ Reduced latency by 40%"));
        assert!(text.contains("✗ Built database systems with SQL"));
        assert!(text.contains("1 of 2 bullets lack a measurable result"));
    }

    #[test]
    fn test_render_all_measurable_and_empty() {
        let text = render_impact_check(&["Served 80 covers a night".to_string()]);
        assert!(text.contains("All 1 bullets show a measurable result"));
        let empty = render_impact_check(&[]);
        assert!(empty.contains("No experience bullets"));
    }
}
