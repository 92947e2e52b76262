// src/matching.rs
//! Token-boundary pattern matching and normalized edit similarity

use anyhow::{Context, Result};
use regex::Regex;

/// Normalized Levenshtein similarity in `[0, 1]`
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Highest similarity between `text` and any candidate, 0.0 for none
pub fn best_similarity<'a, I>(text: &str, candidates: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .map(|candidate| similarity(text, candidate))
        .fold(0.0, f64::max)
}

/// A lower-case pattern matched only at token boundaries.
///
/// "r" matches "r and sas" but not "regulatory"; spaces inside a phrase
/// match any run of whitespace.
#[derive(Debug, Clone)]
pub struct BoundaryPattern {
    pattern: String,
    regex: Regex,
}

impl BoundaryPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = pattern.trim().to_lowercase();
        let regex = Regex::new(&boundary_regex(&pattern))
            .with_context(|| format!("Failed to compile pattern: {}", pattern))?;
        Ok(Self { pattern, regex })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// `text` must already be lower-cased
    pub fn is_match(&self, text: &str) -> bool {
        !self.pattern.is_empty() && self.regex.is_match(text)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn boundary_regex(pattern: &str) -> String {
    let body = pattern
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");

    let left = match pattern.chars().next() {
        Some(c) if is_word_char(c) => r"\b",
        _ => "",
    };
    let right = match pattern.chars().last() {
        Some(c) if is_word_char(c) => r"\b",
        _ => "",
    };

    format!("{}{}{}", left, body, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letter_pattern_rejects_substrings() {
        let r = BoundaryPattern::new("R").unwrap();
        assert!(!r.is_match("regulatory affairs"));
        assert!(!r.is_match("programming in rust"));
        assert!(r.is_match("experience with r and sas"));
        assert!(r.is_match("python/r"));
    }

    #[test]
    fn test_phrase_spans_whitespace() {
        let phrase = BoundaryPattern::new("project management").unwrap();
        assert!(phrase.is_match("strong project\n  management background"));
        assert!(!phrase.is_match("project managements"));
    }

    #[test]
    fn test_punctuated_patterns() {
        let sklearn = BoundaryPattern::new("scikit-learn").unwrap();
        assert!(sklearn.is_match("pandas, scikit-learn."));
        let iso = BoundaryPattern::new("iso 9001").unwrap();
        assert!(iso.is_match("certified to iso 9001"));
        assert!(!iso.is_match("iso 90012"));
    }

    #[test]
    fn test_empty_pattern_never_matches() {
        let empty = BoundaryPattern::new("  ").unwrap();
        assert!(!empty.is_match("anything"));
    }

    #[test]
    fn test_similarity_tolerates_phrasing_drift() {
        assert!(similarity("what you will bring", "what you'll bring") >= 0.8);
        assert!(similarity("benefits", "qualifications") < 0.8);
        assert_eq!(similarity("profile", "profile"), 1.0);
    }

    #[test]
    fn test_best_similarity() {
        let candidates = ["profile", "about you"];
        assert_eq!(best_similarity("profile", candidates), 1.0);
        assert_eq!(best_similarity("profile", std::iter::empty()), 0.0);
    }
}
