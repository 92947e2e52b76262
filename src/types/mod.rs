// src/types/mod.rs
pub mod frequency;
pub mod profile;
pub mod vocabulary;

pub use frequency::FrequencyTable;
pub use profile::{ExtractedSection, HeaderCandidate, JobPosting, Profile, ProfileRecord};
pub use vocabulary::{HeaderVocabulary, RuleSet, Vocabulary};
