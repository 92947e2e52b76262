// src/analysis/aggregator.rs
use super::classifier::{Classification, LexicalClassifier};
use crate::types::FrequencyTable;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

/// One presence-count table per rule set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusTables {
    pub job_areas: FrequencyTable,
    pub tools: FrequencyTable,
    pub certificates: FrequencyTable,
    pub trends: FrequencyTable,
}

impl CorpusTables {
    fn record(mut self, classification: Classification) -> Self {
        self.job_areas.record_presence(classification.job_areas);
        self.tools.record_presence(classification.tools);
        self.certificates.record_presence(classification.certificates);
        self.trends.record_presence(classification.trends);
        self
    }

    pub fn merge(self, other: CorpusTables) -> CorpusTables {
        CorpusTables {
            job_areas: self.job_areas.merge(other.job_areas),
            tools: self.tools.merge(other.tools),
            certificates: self.certificates.merge(other.certificates),
            trends: self.trends.merge(other.trends),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.job_areas.is_empty()
            && self.tools.is_empty()
            && self.certificates.is_empty()
            && self.trends.is_empty()
    }
}

/// Reduce a per-profile detector over the corpus into presence counts.
///
/// The corpus is partitioned across threads and partial tables merged, so
/// the result does not depend on scheduling.
pub fn aggregate_by<S, F>(corpus: &[S], detect: F) -> FrequencyTable
where
    S: AsRef<str> + Sync,
    F: Fn(&str) -> BTreeSet<String> + Sync + Send,
{
    corpus
        .par_iter()
        .fold(FrequencyTable::new, |mut table, profile| {
            table.record_presence(detect(profile.as_ref()));
            table
        })
        .reduce(FrequencyTable::new, FrequencyTable::merge)
}

/// Runs the classifier over a corpus; every call starts from empty tables
pub struct CorpusAggregator<'a> {
    classifier: &'a LexicalClassifier,
}

impl<'a> CorpusAggregator<'a> {
    pub fn new(classifier: &'a LexicalClassifier) -> Self {
        Self { classifier }
    }

    pub fn aggregate<S>(&self, corpus: &[S]) -> CorpusTables
    where
        S: AsRef<str> + Sync,
    {
        let tables = corpus
            .par_iter()
            .fold(CorpusTables::default, |tables, profile| {
                tables.record(self.classifier.classify(profile.as_ref()))
            })
            .reduce(CorpusTables::default, CorpusTables::merge);

        info!(
            "Aggregated {} profiles: {} job areas, {} tools, {} certificates, {} trends",
            corpus.len(),
            tables.job_areas.len(),
            tables.tools.len(),
            tables.certificates.len(),
            tables.trends.len()
        );
        tables
    }

    pub fn job_areas<S: AsRef<str> + Sync>(&self, corpus: &[S]) -> FrequencyTable {
        aggregate_by(corpus, |text| self.classifier.categorize(text))
    }

    pub fn tools<S: AsRef<str> + Sync>(&self, corpus: &[S]) -> FrequencyTable {
        aggregate_by(corpus, |text| self.classifier.extract_entities(text).0)
    }

    pub fn certificates<S: AsRef<str> + Sync>(&self, corpus: &[S]) -> FrequencyTable {
        aggregate_by(corpus, |text| self.classifier.extract_entities(text).1)
    }

    pub fn trends<S: AsRef<str> + Sync>(&self, corpus: &[S]) -> FrequencyTable {
        aggregate_by(corpus, |text| self.classifier.detect_trends(text))
    }
}
