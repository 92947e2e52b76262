// src/types/profile.rs
use serde::{Deserialize, Serialize};

/// A fetched posting, consumed once by the extraction pipeline
#[derive(Debug, Clone)]
pub struct JobPosting {
    pub url: String,
    pub raw_html: String,
}

/// A header-level element inside the posting's content container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCandidate {
    pub text: String,
    /// Document-order index among the scanned header nodes
    pub position: usize,
}

/// Lines accumulated after a matched header until a stop condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSection {
    pub header: HeaderCandidate,
    pub lines: Vec<String>,
}

impl ExtractedSection {
    pub fn raw_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Final artifact of the extraction pipeline.
///
/// `text` is `None` when no header matched; `Some("")` means a section was
/// found but carried no content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub job_title: String,
    pub text: Option<String>,
}

impl Profile {
    pub fn is_found(&self) -> bool {
        self.text.is_some()
    }

    /// Persistable row, or `None` for postings without a located section
    pub fn into_record(self) -> Option<ProfileRecord> {
        let profile = self.text?;
        Some(ProfileRecord {
            job_title: self.job_title,
            profile,
        })
    }
}

/// One persisted `(Job Title, Profile)` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(rename = "Job Title")]
    pub job_title: String,
    #[serde(rename = "Profile")]
    pub profile: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_profile_has_no_record() {
        let profile = Profile {
            job_title: "Data Manager".to_string(),
            text: None,
        };
        assert!(!profile.is_found());
        assert!(profile.into_record().is_none());
    }

    #[test]
    fn test_empty_profile_is_still_persisted() {
        let profile = Profile {
            job_title: "Data Manager".to_string(),
            text: Some(String::new()),
        };
        let record = profile.into_record().unwrap();
        assert_eq!(record.profile, "");
        assert_eq!(record.job_title, "Data Manager");
    }
}
