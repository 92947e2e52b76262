// src/extraction/pipeline.rs
use super::dom::{DomLayout, HtmlDocument};
use super::header_matcher::HeaderMatcher;
use super::noise_filter::NoiseFilter;
use super::section_locator::{SectionLocator, SectionSource};
use crate::types::{JobPosting, Profile, Vocabulary};
use anyhow::Result;
use rayon::prelude::*;
use tracing::{debug, info};

pub const UNKNOWN_TITLE: &str = "N/A";

/// Raw HTML in, `Profile` out. Holds only read-only configuration.
#[derive(Debug, Clone)]
pub struct ProfileExtractor {
    layout: DomLayout,
    matcher: HeaderMatcher,
    locator: SectionLocator,
    noise: NoiseFilter,
}

impl ProfileExtractor {
    pub fn from_vocabulary(vocabulary: &Vocabulary) -> Result<Self> {
        Ok(Self {
            layout: DomLayout::from_settings(&vocabulary.extraction)?,
            matcher: HeaderMatcher::new(
                vocabulary.headers.clone(),
                vocabulary.matching.similarity_threshold,
            ),
            locator: SectionLocator::from_settings(&vocabulary.extraction),
            noise: NoiseFilter::from_settings(&vocabulary.extraction),
        })
    }

    /// Cleaned section text, or `None` when no header matched
    pub fn extract_text<S>(&self, source: &S) -> Option<String>
    where
        S: SectionSource + ?Sized,
    {
        let section = self.locator.locate(source, &self.matcher)?;
        Some(self.noise.clean(&section.raw_text()))
    }

    pub fn extract_profile(&self, raw_html: &str) -> Profile {
        let document = HtmlDocument::parse(raw_html, &self.layout);
        let job_title = document
            .job_title()
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string());
        let text = self.extract_text(&document);

        Profile { job_title, text }
    }

    /// Extract every posting in parallel; output order follows input order
    pub fn extract_batch(&self, postings: &[JobPosting]) -> Vec<Profile> {
        let profiles: Vec<Profile> = postings
            .par_iter()
            .map(|posting| {
                let profile = self.extract_profile(&posting.raw_html);
                if !profile.is_found() {
                    debug!("No profile section found in {}", posting.url);
                }
                profile
            })
            .collect();

        let found = profiles.iter().filter(|p| p.is_found()).count();
        info!(
            "Extracted {} profiles from {} postings",
            found,
            postings.len()
        );
        profiles
    }
}
