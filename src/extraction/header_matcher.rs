// src/extraction/header_matcher.rs
use crate::matching::best_similarity;
use crate::types::HeaderVocabulary;
use crate::utils::normalize_phrase;

/// Decides whether a header introduces the section we are after
pub trait HeaderMatch {
    fn matches(&self, header_text: &str) -> bool;
}

impl<F> HeaderMatch for F
where
    F: Fn(&str) -> bool,
{
    fn matches(&self, header_text: &str) -> bool {
        self(header_text)
    }
}

/// Vocabulary-driven matcher: keyword containment, then closest-phrasing similarity
#[derive(Debug, Clone)]
pub struct HeaderMatcher {
    vocabulary: HeaderVocabulary,
    threshold: f64,
}

impl HeaderMatcher {
    pub fn new(vocabulary: HeaderVocabulary, threshold: f64) -> Self {
        Self {
            vocabulary,
            threshold,
        }
    }

    pub fn vocabulary(&self) -> &HeaderVocabulary {
        &self.vocabulary
    }

    fn is_excluded(&self, header: &str) -> bool {
        self.vocabulary
            .excluded()
            .iter()
            .any(|marker| header.contains(marker.as_str()))
    }

    fn contains_phrasing(&self, header: &str) -> bool {
        self.vocabulary
            .phrasings()
            .iter()
            .any(|phrase| header.contains(phrase.as_str()))
    }

    fn closest_similarity(&self, header: &str) -> f64 {
        best_similarity(
            header,
            self.vocabulary.phrasings().iter().map(String::as_str),
        )
    }
}

impl HeaderMatch for HeaderMatcher {
    fn matches(&self, header_text: &str) -> bool {
        let header = normalize_phrase(header_text);
        if header.is_empty() || self.is_excluded(&header) {
            return false;
        }

        self.contains_phrasing(&header) || self.closest_similarity(&header) >= self.threshold
    }
}
