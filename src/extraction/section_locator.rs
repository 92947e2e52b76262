// src/extraction/section_locator.rs
use super::header_matcher::HeaderMatch;
use crate::config::ExtractionSettings;
use crate::types::{ExtractedSection, HeaderCandidate};
use crate::utils::contains_marker;
use tracing::debug;

/// What the locator needs from a parsed document
pub trait SectionSource {
    /// Header-level nodes inside the content container, in document order
    fn headers(&self) -> Vec<HeaderCandidate>;

    /// Text of each sibling following the header at `position`, in order
    fn following_texts(&self, position: usize) -> Vec<String>;
}

/// Finds the first matching header and accumulates the content after it
#[derive(Debug, Clone)]
pub struct SectionLocator {
    stop_markers: Vec<String>,
    skip_markers: Vec<String>,
}

impl Default for SectionLocator {
    fn default() -> Self {
        Self::from_settings(&ExtractionSettings::default())
    }
}

impl SectionLocator {
    pub fn from_settings(settings: &ExtractionSettings) -> Self {
        Self {
            stop_markers: settings.stop_markers.clone(),
            skip_markers: settings.skip_markers.clone(),
        }
    }

    /// Slice out the section under the first matching header.
    ///
    /// Only one section is extracted per document; later headers are ignored
    /// even if they also match.
    pub fn locate<S, M>(&self, source: &S, matcher: &M) -> Option<ExtractedSection>
    where
        S: SectionSource + ?Sized,
        M: HeaderMatch + ?Sized,
    {
        let header = source
            .headers()
            .into_iter()
            .find(|candidate| matcher.matches(&candidate.text))?;

        debug!(
            "Matched header '{}' at position {}",
            header.text, header.position
        );

        let mut lines = Vec::new();
        for text in source.following_texts(header.position) {
            if contains_marker(&text, &self.stop_markers) {
                break;
            }
            if contains_marker(&text, &self.skip_markers) {
                continue;
            }
            let text = text.trim();
            if !text.is_empty() {
                lines.push(text.to_string());
            }
        }

        Some(ExtractedSection { header, lines })
    }
}
