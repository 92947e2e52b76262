// src/analysis/mod.rs
//! Corpus of profile texts in, presence-count tables out

pub mod aggregator;
pub mod classifier;

pub use aggregator::{CorpusAggregator, CorpusTables};
pub use classifier::{Classification, LexicalClassifier, TrendMatch};
