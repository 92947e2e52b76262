// src/report.rs
use crate::analysis::CorpusTables;
use crate::core::FsOps;
use crate::types::FrequencyTable;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Aggregated frequency tables for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub profiles: usize,
    #[serde(flatten)]
    pub tables: CorpusTables,
}

impl AnalysisReport {
    pub fn new(profiles: usize, tables: CorpusTables) -> Self {
        Self {
            generated_at: Utc::now(),
            profiles,
            tables,
        }
    }

    fn sections(&self) -> [(&'static str, &FrequencyTable); 4] {
        [
            ("Job areas", &self.tables.job_areas),
            ("Tools", &self.tables.tools),
            ("Certificates", &self.tables.certificates),
            ("Trends", &self.tables.trends),
        ]
    }

    /// Ranked `category: count` lines per table, at most `top` per table
    pub fn render_text(&self, top: Option<usize>) -> String {
        let mut out = format!(
            "Analyzed {} profiles ({})\n",
            self.profiles,
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        );

        for (title, table) in self.sections() {
            out.push_str(&format!("\n{}\n", title));
            let ranked = table.ranked();
            if ranked.is_empty() {
                out.push_str("  (none)\n");
                continue;
            }
            let limit = top.unwrap_or(ranked.len());
            for (name, count) in ranked.into_iter().take(limit) {
                out.push_str(&format!("  {}: {}\n", name, count));
            }
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }

    pub async fn write_json(&self, path: &Path) -> Result<()> {
        FsOps::write_file_safe(path, &self.to_json()?).await?;
        info!("Report written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> AnalysisReport {
        let mut tables = CorpusTables::default();
        tables.tools.record_presence(["python", "sas"]);
        tables.tools.record_presence(["python"]);
        tables.tools.record_presence(["excel"]);
        tables.certificates.record_presence(["gmp"]);
        AnalysisReport::new(3, tables)
    }

    #[test]
    fn test_render_ranks_and_limits() {
        let text = report().render_text(Some(2));
        assert!(text.starts_with("Analyzed 3 profiles"));
        assert!(text.contains("Tools\n  python: 2\n  excel: 1\n"));
        assert!(!text.contains("sas: 1"));
        assert!(text.contains("Job areas\n  (none)"));
    }

    #[test]
    fn test_render_without_limit() {
        let text = report().render_text(None);
        assert!(text.contains("  sas: 1"));
    }

    #[test]
    fn test_json_shape() {
        let report = report();
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["profiles"], 3);
        assert_eq!(value["tools"]["python"], 2);
        assert_eq!(value["job_areas"], serde_json::json!({}));
        assert!(value["generated_at"].is_string());
    }

    #[tokio::test]
    async fn test_write_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/analysis.json");
        let report = report();

        report.write_json(&path).await.unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: AnalysisReport = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded, report);
    }
}
