//! Profile mining for job postings: locate the candidate-profile section of
//! each posting, then rank job areas, tools, certificates and trends across
//! the corpus.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod core;
pub mod environment;
pub mod extraction;
pub mod matching;
pub mod report;
pub mod scheduler;
pub mod scraping;
pub mod storage;
pub mod types;
pub mod utils;

pub use analysis::{Classification, CorpusAggregator, CorpusTables, LexicalClassifier};
pub use config::{ExtractionSettings, MatchingSettings};
pub use extraction::{HeaderMatch, HeaderMatcher, ProfileExtractor, SectionSource};
pub use report::AnalysisReport;
pub use types::{FrequencyTable, Profile, ProfileRecord, Vocabulary};

use anyhow::Result;

/// Extract the profile section of one posting with the built-in vocabulary
pub fn extract_profile(raw_html: &str) -> Result<Profile> {
    let extractor = ProfileExtractor::from_vocabulary(&Vocabulary::builtin()?)?;
    Ok(extractor.extract_profile(raw_html))
}

/// Aggregate a corpus of profile texts with the built-in vocabulary
pub fn analyze_corpus<S: AsRef<str> + Sync>(corpus: &[S]) -> Result<CorpusTables> {
    let classifier = LexicalClassifier::from_vocabulary(&Vocabulary::builtin()?)?;
    Ok(CorpusAggregator::new(&classifier).aggregate(corpus))
}
