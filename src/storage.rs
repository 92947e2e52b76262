// src/storage.rs
//! `(Job Title, Profile)` rows persisted as UTF-8 CSV with quoted multi-line fields

use crate::core::FsOps;
use crate::types::ProfileRecord;
use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Serialize rows with a `Job Title,Profile` header
pub fn write_records<W: Write>(writer: W, records: &[ProfileRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer
            .serialize(record)
            .with_context(|| format!("Failed to serialize profile: {}", record.job_title))?;
    }
    csv_writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// Read rows back; malformed rows are skipped with a warning
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ProfileRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    let mut skipped = 0;

    for (index, result) in csv_reader.deserialize::<ProfileRecord>().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                warn!("Skipping malformed CSV row {}: {}", index + 1, e);
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {} malformed rows", skipped);
    }
    Ok(records)
}

/// CSV file holding the extracted corpus
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the file with `records`
    pub async fn save(&self, records: &[ProfileRecord]) -> Result<()> {
        let mut buffer = Vec::new();
        write_records(&mut buffer, records)?;
        let content = String::from_utf8(buffer).context("CSV output is not valid UTF-8")?;

        FsOps::write_file_safe(&self.path, &content).await?;
        info!(
            "Saved {} profiles to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    pub async fn load(&self) -> Result<Vec<ProfileRecord>> {
        let content = FsOps::read_file_safe(&self.path).await?;
        let records = read_records(content.as_bytes())
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        info!(
            "Loaded {} profiles from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    /// Profile texts only, in file order
    pub async fn load_corpus(&self) -> Result<Vec<String>> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .map(|record| record.profile)
            .collect())
    }
}
