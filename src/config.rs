// src/config.rs
use serde::Deserialize;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Knobs shared by the fuzzy paths of the header matcher and trend detector
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl MatchingSettings {
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }
}

/// How a posting's DOM is scanned and where accumulation stops
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    #[serde(default = "default_header_tags")]
    pub header_tags: Vec<String>,
    #[serde(default)]
    pub container_selectors: Vec<String>,
    #[serde(default = "default_stop_markers")]
    pub stop_markers: Vec<String>,
    #[serde(default)]
    pub skip_markers: Vec<String>,
    #[serde(default = "default_truncation_markers")]
    pub truncation_markers: Vec<String>,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            header_tags: default_header_tags(),
            container_selectors: Vec::new(),
            stop_markers: default_stop_markers(),
            skip_markers: Vec::new(),
            truncation_markers: default_truncation_markers(),
        }
    }
}

impl ExtractionSettings {
    pub fn with_header_tags(mut self, tags: Vec<String>) -> Self {
        self.header_tags = tags;
        self
    }

    pub fn with_container_selectors(mut self, selectors: Vec<String>) -> Self {
        self.container_selectors = selectors;
        self
    }

    pub fn with_stop_markers(mut self, markers: Vec<String>) -> Self {
        self.stop_markers = markers;
        self
    }

    pub fn with_skip_markers(mut self, markers: Vec<String>) -> Self {
        self.skip_markers = markers;
        self
    }

    pub fn with_truncation_markers(mut self, markers: Vec<String>) -> Self {
        self.truncation_markers = markers;
        self
    }

    /// Lower-case every marker so matching can compare against lower-cased text
    pub(crate) fn normalized(mut self) -> Self {
        for markers in [
            &mut self.stop_markers,
            &mut self.skip_markers,
            &mut self.truncation_markers,
        ] {
            *markers = normalize_markers(markers);
        }
        self.header_tags = self
            .header_tags
            .iter()
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect();
        self
    }
}

fn normalize_markers(markers: &[String]) -> Vec<String> {
    markers
        .iter()
        .map(|marker| crate::utils::fold_apostrophes(&marker.trim().to_lowercase()))
        .filter(|marker| !marker.is_empty())
        .collect()
}

fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_header_tags() -> Vec<String> {
    ["h2", "h3", "h4", "h5", "h6"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_stop_markers() -> Vec<String> {
    vec!["apply now".to_string()]
}

fn default_truncation_markers() -> Vec<String> {
    vec!["apply now".to_string(), "jobs by experience".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_normalization() {
        let settings = ExtractionSettings::default()
            .with_header_tags(vec![" H3 ".to_string(), "".to_string()])
            .with_skip_markers(vec!["Share This Job".to_string(), "  ".to_string()])
            .normalized();

        assert_eq!(settings.header_tags, vec!["h3"]);
        assert_eq!(settings.skip_markers, vec!["share this job"]);
        assert_eq!(settings.stop_markers, vec!["apply now"]);
    }

    #[test]
    fn test_matching_defaults() {
        assert_eq!(MatchingSettings::default().similarity_threshold, 0.8);
        let custom = MatchingSettings::default().with_similarity_threshold(0.9);
        assert_eq!(custom.similarity_threshold, 0.9);
    }
}
