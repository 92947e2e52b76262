// src/extraction/noise_filter.rs
use crate::config::ExtractionSettings;
use crate::utils::contains_marker;

/// Line-level truncation at boilerplate markers
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    markers: Vec<String>,
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::from_settings(&ExtractionSettings::default())
    }
}

impl NoiseFilter {
    pub fn from_settings(settings: &ExtractionSettings) -> Self {
        Self {
            markers: settings.truncation_markers.clone(),
        }
    }

    /// Trim every line and drop the first marker line and everything after it
    pub fn clean(&self, raw_text: &str) -> String {
        let mut lines: Vec<&str> = raw_text
            .lines()
            .map(str::trim)
            .take_while(|line| !contains_marker(line, &self.markers))
            .collect();
        // drop trailing blank lines
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_at_first_marker() {
        let filter = NoiseFilter::default();
        let raw = "  Degree in pharmacy \nGMP experience\nApply Now\nMore jobs";
        assert_eq!(filter.clean(raw), "Degree in pharmacy\nGMP experience");
    }

    #[test]
    fn test_footer_marker() {
        let filter = NoiseFilter::default();
        let raw = "Python\nSQL\nJobs by Experience\nEntry level";
        assert_eq!(filter.clean(raw), "Python\nSQL");
    }

    #[test]
    fn test_keeps_text_without_markers() {
        let filter = NoiseFilter::default();
        assert_eq!(filter.clean("a\n\n  b  "), "a\n\nb");
        assert_eq!(filter.clean(""), "");
    }

    #[test]
    fn test_marker_on_first_line_empties_output() {
        let filter = NoiseFilter::default();
        assert_eq!(filter.clean("apply now to join\nrest"), "");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let filter = NoiseFilter::default();
        let inputs = [
            "  one \n two\napply now\nthree",
            "\n\n  x\r\n y \n",
            "no markers at all",
            "Jobs by experience",
            "a\n\n",
            "",
        ];
        for input in inputs {
            let once = filter.clean(input);
            assert_eq!(filter.clean(&once), once, "input: {:?}", input);
        }
    }
}
