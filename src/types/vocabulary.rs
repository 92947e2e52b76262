// src/types/vocabulary.rs
//! Header phrasings and keyword rule sets loaded from `vocabulary.toml`

use crate::config::{ExtractionSettings, MatchingSettings};
use crate::utils::{fold_apostrophes, normalize_phrase};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

const BUILTIN_VOCABULARY: &str = include_str!("../../config/vocabulary.toml");

/// Known phrasings that introduce a requirements/profile section
#[derive(Debug, Clone, Default)]
pub struct HeaderVocabulary {
    phrasings: Vec<String>,
    excluded: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct HeaderVocabularyFile {
    #[serde(default = "default_excluded")]
    excluded: Vec<String>,
    phrasings: Vec<String>,
}

fn default_excluded() -> Vec<String> {
    vec!["jobs by experience".to_string()]
}

impl HeaderVocabulary {
    pub fn new<I, S>(phrasings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for phrase in phrasings {
            let phrase = normalize_phrase(phrase.as_ref());
            if !phrase.is_empty() && !normalized.contains(&phrase) {
                normalized.push(phrase);
            }
        }
        Self {
            phrasings: normalized,
            excluded: default_excluded(),
        }
    }

    /// Extra header markers to reject; "jobs by experience" is always kept
    pub fn with_excluded<I, S>(mut self, excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut markers = default_excluded();
        for marker in excluded {
            let marker = normalize_phrase(marker.as_ref());
            if !marker.is_empty() && !markers.contains(&marker) {
                markers.push(marker);
            }
        }
        self.excluded = markers;
        self
    }

    pub fn phrasings(&self) -> &[String] {
        &self.phrasings
    }

    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    pub fn is_empty(&self) -> bool {
        self.phrasings.is_empty()
    }
}

impl<'de> Deserialize<'de> for HeaderVocabulary {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let file = HeaderVocabularyFile::deserialize(deserializer)?;
        Ok(HeaderVocabulary::new(file.phrasings).with_excluded(file.excluded))
    }
}

/// Category -> ordered, de-duplicated lower-case patterns
#[derive(Debug, Clone)]
pub struct RuleSet {
    categories: BTreeMap<String, Vec<String>>,
    /// Distinct keyword hits needed to assign a category (job areas only)
    min_keyword_hits: usize,
}

#[derive(Debug, Deserialize)]
struct RuleSetFile {
    #[serde(default = "default_min_keyword_hits")]
    min_keyword_hits: usize,
    #[serde(default)]
    categories: BTreeMap<String, Vec<String>>,
}

fn default_min_keyword_hits() -> usize {
    2
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet {
    pub fn new() -> Self {
        Self {
            categories: BTreeMap::new(),
            min_keyword_hits: default_min_keyword_hits(),
        }
    }

    pub fn with_category<I, S>(mut self, category: &str, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.categories.entry(category.to_string()).or_default();
        for pattern in patterns {
            let pattern = fold_apostrophes(&pattern.as_ref().trim().to_lowercase());
            if !pattern.is_empty() && !entry.contains(&pattern) {
                entry.push(pattern);
            }
        }
        self
    }

    pub fn with_min_keyword_hits(mut self, hits: usize) -> Self {
        self.min_keyword_hits = hits;
        self
    }

    pub fn min_keyword_hits(&self) -> usize {
        self.min_keyword_hits
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, patterns)| (name.as_str(), patterns.as_slice()))
    }

    /// Every pattern across all categories, de-duplicated, in category order
    pub fn patterns(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for patterns in self.categories.values() {
            for pattern in patterns {
                if !seen.contains(&pattern.as_str()) {
                    seen.push(pattern.as_str());
                }
            }
        }
        seen
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(|patterns| patterns.is_empty())
    }
}

impl<'de> Deserialize<'de> for RuleSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let file = RuleSetFile::deserialize(deserializer)?;
        let mut rules = RuleSet::new().with_min_keyword_hits(file.min_keyword_hits);
        for (category, patterns) in file.categories {
            rules = rules.with_category(&category, patterns);
        }
        Ok(rules)
    }
}

/// Every configuration surface the pipelines read, loaded once per process
#[derive(Debug, Clone, Deserialize)]
pub struct Vocabulary {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub extraction: ExtractionSettings,
    pub headers: HeaderVocabulary,
    #[serde(default)]
    pub job_areas: RuleSet,
    #[serde(default)]
    pub tools: RuleSet,
    #[serde(default)]
    pub certificates: RuleSet,
    #[serde(default)]
    pub trends: RuleSet,
}

impl Vocabulary {
    /// The vocabulary shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_VOCABULARY).context("Failed to parse built-in vocabulary")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary file: {}", path.display()))?;
        let vocabulary = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse vocabulary file: {}", path.display()))?;
        info!(
            "Loaded vocabulary from {} ({} header phrasings)",
            path.display(),
            vocabulary.headers.phrasings().len()
        );
        Ok(vocabulary)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut vocabulary: Vocabulary = toml::from_str(content).context("Invalid vocabulary TOML")?;
        vocabulary.extraction = vocabulary.extraction.normalized();
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    pub fn validate(&self) -> Result<()> {
        if self.headers.is_empty() {
            anyhow::bail!("Header vocabulary must contain at least one phrasing");
        }

        let threshold = self.matching.similarity_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            anyhow::bail!(
                "Similarity threshold must be in (0, 1], got {}",
                threshold
            );
        }

        if self.job_areas.min_keyword_hits() == 0 {
            anyhow::bail!("job_areas.min_keyword_hits must be at least 1");
        }

        if self.extraction.header_tags.is_empty() {
            anyhow::bail!("extraction.header_tags must name at least one tag");
        }

        Ok(())
    }
}
