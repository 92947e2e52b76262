// src/analysis/classifier.rs
use crate::matching::{similarity, BoundaryPattern};
use crate::types::{RuleSet, Vocabulary};
use crate::utils::{collapse_whitespace, fold_apostrophes, split_sentences};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// How a trend phrase was found in a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendMatch {
    /// Boundary match against the whole text
    Exact,
    /// A single sentence was similar enough to the phrase
    Fuzzy,
}

/// Everything found in one profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub job_areas: BTreeSet<String>,
    pub tools: BTreeSet<String>,
    pub certificates: BTreeSet<String>,
    pub trends: BTreeSet<String>,
}

#[derive(Debug, Clone)]
struct AreaRule {
    name: String,
    keywords: Vec<BoundaryPattern>,
}

/// Compiled rule sets; built once and shared read-only
#[derive(Debug, Clone)]
pub struct LexicalClassifier {
    job_areas: Vec<AreaRule>,
    min_keyword_hits: usize,
    tools: Vec<BoundaryPattern>,
    certificates: Vec<BoundaryPattern>,
    trends: Vec<BoundaryPattern>,
    threshold: f64,
}

fn compile_entities(rules: &RuleSet) -> Result<Vec<BoundaryPattern>> {
    rules
        .patterns()
        .into_iter()
        .map(BoundaryPattern::new)
        .collect()
}

fn normalize_text(text: &str) -> String {
    fold_apostrophes(&text.to_lowercase())
}

impl LexicalClassifier {
    pub fn from_vocabulary(vocabulary: &Vocabulary) -> Result<Self> {
        Self::new(
            &vocabulary.job_areas,
            &vocabulary.tools,
            &vocabulary.certificates,
            &vocabulary.trends,
            vocabulary.matching.similarity_threshold,
        )
    }

    pub fn new(
        job_areas: &RuleSet,
        tools: &RuleSet,
        certificates: &RuleSet,
        trends: &RuleSet,
        threshold: f64,
    ) -> Result<Self> {
        let areas = job_areas
            .categories()
            .map(|(name, keywords)| {
                let keywords = keywords
                    .iter()
                    .map(|keyword| BoundaryPattern::new(keyword))
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| format!("Failed to compile job area: {}", name))?;
                Ok(AreaRule {
                    name: name.to_string(),
                    keywords,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            job_areas: areas,
            min_keyword_hits: job_areas.min_keyword_hits().max(1),
            tools: compile_entities(tools).context("Failed to compile tools")?,
            certificates: compile_entities(certificates)
                .context("Failed to compile certificates")?,
            trends: compile_entities(trends).context("Failed to compile trend phrases")?,
            threshold,
        })
    }

    /// Job areas with at least `min_keyword_hits` distinct keyword matches
    pub fn categorize(&self, profile_text: &str) -> BTreeSet<String> {
        self.categorize_normalized(&normalize_text(profile_text))
    }

    /// Tools and certificates mentioned at least once
    pub fn extract_entities(&self, profile_text: &str) -> (BTreeSet<String>, BTreeSet<String>) {
        let text = normalize_text(profile_text);
        (
            matching_patterns(&self.tools, &text),
            matching_patterns(&self.certificates, &text),
        )
    }

    /// Trend phrases present in the profile, each at most once
    pub fn detect_trends(&self, profile_text: &str) -> BTreeSet<String> {
        self.trend_matches(profile_text).into_keys().collect()
    }

    /// Trend phrases with the path that found them
    pub fn trend_matches(&self, profile_text: &str) -> BTreeMap<String, TrendMatch> {
        self.trend_matches_normalized(&normalize_text(profile_text))
    }

    pub fn classify(&self, profile_text: &str) -> Classification {
        let text = normalize_text(profile_text);
        if text.trim().is_empty() {
            return Classification::default();
        }

        Classification {
            job_areas: self.categorize_normalized(&text),
            tools: matching_patterns(&self.tools, &text),
            certificates: matching_patterns(&self.certificates, &text),
            trends: self.trend_matches_normalized(&text).into_keys().collect(),
        }
    }

    fn categorize_normalized(&self, text: &str) -> BTreeSet<String> {
        self.job_areas
            .iter()
            .filter(|area| {
                let hits = area
                    .keywords
                    .iter()
                    .filter(|keyword| keyword.is_match(text))
                    .count();
                hits >= self.min_keyword_hits
            })
            .map(|area| area.name.clone())
            .collect()
    }

    fn trend_matches_normalized(&self, text: &str) -> BTreeMap<String, TrendMatch> {
        let mut found = BTreeMap::new();
        if text.trim().is_empty() {
            return found;
        }

        let mut segments: Option<Vec<String>> = None;
        for phrase in &self.trends {
            if phrase.is_match(text) {
                found.insert(phrase.pattern().to_string(), TrendMatch::Exact);
                continue;
            }

            let sentences = segments.get_or_insert_with(|| {
                split_sentences(text)
                    .into_iter()
                    .map(collapse_whitespace)
                    .collect()
            });
            let fuzzy = sentences
                .iter()
                .any(|segment| similarity(phrase.pattern(), segment) >= self.threshold);
            if fuzzy {
                found.insert(phrase.pattern().to_string(), TrendMatch::Fuzzy);
            }
        }
        found
    }
}

fn matching_patterns(patterns: &[BoundaryPattern], text: &str) -> BTreeSet<String> {
    patterns
        .iter()
        .filter(|pattern| pattern.is_match(text))
        .map(|pattern| pattern.pattern().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> LexicalClassifier {
        LexicalClassifier::from_vocabulary(&Vocabulary::builtin().unwrap()).unwrap()
    }

    fn synthetic() -> LexicalClassifier {
        let areas = RuleSet::new()
            .with_category("Data Analysis", ["data", "sql", "python", "r"])
            .with_category("Regulatory", ["regulatory", "gcp"]);
        let tools = RuleSet::new().with_category("General", ["python", "r", "power bi"]);
        let certificates = RuleSet::new().with_category("General", ["gmp", "six sigma"]);
        let trends = RuleSet::new().with_category("Upskilling", ["agile", "communication skills"]);
        LexicalClassifier::new(&areas, &tools, &certificates, &trends, 0.8).unwrap()
    }

    #[test]
    fn test_single_keyword_does_not_assign_area() {
        let classifier = synthetic();
        assert!(classifier.categorize("Good data habits").is_empty());
        assert!(classifier.categorize("data, data and more data").is_empty());
    }

    #[test]
    fn test_two_distinct_keywords_assign_area() {
        let classifier = synthetic();
        let areas = classifier.categorize("Data modelling in SQL");
        assert_eq!(areas, BTreeSet::from(["Data Analysis".to_string()]));
    }

    #[test]
    fn test_profile_can_hit_several_areas() {
        let classifier = synthetic();
        let areas = classifier.categorize("Python and R for regulatory GCP submissions");
        assert_eq!(areas.len(), 2);
    }

    #[test]
    fn test_r_does_not_match_inside_words() {
        let classifier = synthetic();
        let (tools, _) = classifier.extract_entities("Regulatory affairs");
        assert!(tools.is_empty());
        let areas = classifier.categorize("regulatory affairs and data");
        assert!(!areas.contains("Data Analysis"));
    }

    #[test]
    fn test_entities_need_a_single_hit() {
        let classifier = synthetic();
        let (tools, certificates) =
            classifier.extract_entities("Power BI dashboards; GMP environment.");
        assert_eq!(tools, BTreeSet::from(["power bi".to_string()]));
        assert_eq!(certificates, BTreeSet::from(["gmp".to_string()]));
    }

    #[test]
    fn test_exact_trend_skips_fuzzy_path() {
        let classifier = synthetic();
        let matches = classifier.trend_matches("We work in an Agile team.");
        assert_eq!(matches.get("agile"), Some(&TrendMatch::Exact));
    }

    #[test]
    fn test_fuzzy_trend_matches_one_sentence() {
        let classifier = synthetic();
        let text = "Excellent communication skill. Team player! Communication skils?";
        let matches = classifier.trend_matches(text);
        assert_eq!(matches.get("communication skills"), Some(&TrendMatch::Fuzzy));
        assert_eq!(matches.len(), 1);
        assert_eq!(classifier.detect_trends(text).len(), 1);
    }

    #[test]
    fn test_long_sentences_do_not_fuzzy_match() {
        let classifier = synthetic();
        let text = "You bring strong written and verbal communication abilities across teams.";
        assert!(classifier.detect_trends(text).is_empty());
    }

    #[test]
    fn test_typographic_apostrophes_match_either_way() {
        let empty = RuleSet::new();
        let trends = RuleSet::new().with_category("Therapeutic", ["Parkinson\u{2019}s disease"]);
        let classifier = LexicalClassifier::new(&empty, &empty, &empty, &trends, 0.8).unwrap();

        let curly = classifier.trend_matches("Research on Parkinson\u{2019}s disease.");
        assert_eq!(curly.get("parkinson's disease"), Some(&TrendMatch::Exact));
        let straight = classifier.trend_matches("Research on Parkinson's disease.");
        assert_eq!(straight.get("parkinson's disease"), Some(&TrendMatch::Exact));
    }

    #[test]
    fn test_empty_text_yields_empty_results() {
        let classifier = builtin();
        assert_eq!(classifier.classify(""), Classification::default());
        assert_eq!(classifier.classify("  \n "), Classification::default());
        assert!(classifier.detect_trends("").is_empty());
    }

    #[test]
    fn test_builtin_classification() {
        let classifier = builtin();
        let text = "MSc in statistics. Experience with SAS, SQL and Python for clinical trials. \
                    Knowledge of GCP and ICH guidelines. Project management and communication skills.";
        let result = classifier.classify(text);

        assert!(result.job_areas.contains("Data Analysis"));
        assert!(result.job_areas.contains("Regulatory"));
        assert!(result.job_areas.contains("Clinical"));
        assert!(result.tools.contains("sas"));
        assert!(result.tools.contains("python"));
        assert!(result.certificates.contains("gcp"));
        assert!(result.certificates.contains("msc"));
        assert!(result.trends.contains("clinical trials"));
        assert!(result.trends.contains("project management"));
        assert!(result.trends.contains("communication skills"));
    }
}
