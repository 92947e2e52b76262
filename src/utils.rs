// src/utils.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Normalize a header or vocabulary phrase for comparison
pub fn normalize_phrase(text: &str) -> String {
    let folded = fold_apostrophes(&text.to_lowercase());
    let collapsed = collapse_whitespace(&folded);
    collapsed.trim_end_matches(':').trim_end().to_string()
}

/// Replace typographic apostrophes and their common mojibake with `'`
pub fn fold_apostrophes(text: &str) -> String {
    text.replace("â€™", "'")
        .replace(['\u{2019}', '\u{2018}', '\u{02bc}'], "'")
}

/// Collapse runs of whitespace (including newlines) into single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean node text: trim every line, drop blank ones, join with spaces
pub fn clean_text(text: &str) -> String {
    let joined = text
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    collapse_whitespace(&joined)
}

/// True when the lower-cased `text` contains any of the (lower-case) markers
pub fn contains_marker(text: &str, markers: &[String]) -> bool {
    if markers.is_empty() {
        return false;
    }
    let lower = fold_apostrophes(&text.to_lowercase());
    markers.iter().any(|marker| lower.contains(marker.as_str()))
}

/// Split free text into sentence-like segments on `.`, `!` and `?`
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Resolve a possibly relative path against the current working directory
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(current_dir.join(path))
    }
}

/// Parse a `HH:MM` wall-clock time
pub fn parse_time_of_day(value: &str) -> Result<chrono::NaiveTime> {
    chrono::NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .with_context(|| format!("Invalid time of day (expected HH:MM): {}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phrase() {
        assert_eq!(normalize_phrase("  Qualifications:  "), "qualifications");
        assert_eq!(
            normalize_phrase("What You\u{2019}ll   Bring to the Role:"),
            "what you'll bring to the role"
        );
        assert_eq!(normalize_phrase("What youâ€™ll bring"), "what you'll bring");
        assert_eq!(normalize_phrase("   "), "");
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  a\n\n   b  c \n"), "a b c");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_contains_marker() {
        let markers = vec!["apply now".to_string()];
        assert!(contains_marker("Click to APPLY NOW!", &markers));
        assert!(!contains_marker("Apply later", &markers));
        assert!(!contains_marker("anything", &[]));
    }

    #[test]
    fn test_split_sentences() {
        assert_eq!(
            split_sentences("First one. Second!  Third?  "),
            vec!["First one", "Second", "Third"]
        );
        assert!(split_sentences(" ... ").is_empty());
    }

    #[test]
    fn test_parse_time_of_day() {
        let time = parse_time_of_day("06:30").unwrap();
        assert_eq!(time.format("%H:%M").to_string(), "06:30");
        assert!(parse_time_of_day("25:00").is_err());
        assert!(parse_time_of_day("noon").is_err());
    }
}
