//! Career fields: detection of a field tag from free text, and the catalog of
//! per-field résumé content keyed by that tag.

pub mod catalog;
pub mod detector;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use catalog::{get_field_data, FieldData};
pub use detector::{classify, Detection, DetectionSource};

/// Internal key identifying a profession, e.g. `plumber` or `optical_engineer`.
///
/// Always a lowercase slug with `_` separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldTag(String);

impl FieldTag {
    /// Normalizes arbitrary text into a tag: lowercase, words joined by `_`.
    /// Text with no words yields the default tag.
    pub fn new(raw: &str) -> Self {
        let slug = raw
            .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
            .filter(|w| !w.is_empty())
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join("_");
        if slug.is_empty() {
            return FieldTag::default();
        }
        FieldTag(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable form: `optical_engineer` → `Optical Engineer`.
    pub fn display_name(&self) -> String {
        title_case(&self.0.replace('_', " "))
    }

    /// Space-separated lowercase form: `optical_engineer` → `optical engineer`.
    pub fn phrase(&self) -> String {
        self.0.replace('_', " ")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }
}

impl Default for FieldTag {
    fn default() -> Self {
        FieldTag("software_engineer".to_string())
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Case-sensitive term test used by every keyword table.
///
/// Terms of three characters or fewer (`rn`, `law`, `sql`, `c++`) must stand
/// alone as a word; longer terms match anywhere as a substring.
pub fn mentions(text: &str, term: &str) -> bool {
    if term.chars().count() > 3 {
        return text.contains(term);
    }
    let is_word = |c: char| c.is_alphanumeric();
    text.match_indices(term).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + term.len()..].chars().next();
        !before.map_or(false, is_word) && !after.map_or(false, is_word)
    })
}

/// Capitalizes the first letter of every word and lowercases the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_tag_normalizes_spaces_and_case() {
        assert_eq!(FieldTag::new("Marine Biologist").as_str(), "marine_biologist");
        assert_eq!(FieldTag::new("  optical-engineer ").as_str(), "optical_engineer");
    }

    #[test]
    fn test_field_tag_without_words_is_default() {
        for raw in ["", "   ", "- -", "_"] {
            assert_eq!(FieldTag::new(raw), FieldTag::default(), "{raw:?}");
        }
    }

    #[test]
    fn test_display_name_title_cases_words() {
        let tag = FieldTag::new("optical_engineer");
        assert_eq!(tag.display_name(), "Optical Engineer");
        assert_eq!(tag.phrase(), "optical engineer");
    }

    #[test]
    fn test_mentions_short_terms_need_word_boundaries() {
        assert!(mentions("licensed rn with icu experience", "rn"));
        assert!(!mentions("modern hospital", "rn"));
        assert!(!mentions("lawn care", "law"));
        assert!(mentions("family law practice", "law"));
        assert!(mentions("experience with c++ and go", "c++"));
    }

    #[test]
    fn test_mentions_long_terms_match_substrings() {
        assert!(mentions("welding inspector", "weld"));
        assert!(mentions("neurosurgery fellowship", "neurosurg"));
    }

    #[test]
    fn test_title_case_handles_punctuation() {
        assert_eq!(title_case("node.js"), "Node.Js");
        assert_eq!(title_case("html5"), "Html5");
        assert_eq!(title_case("c++"), "C++");
    }
}
