// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::utils::resolve_path;

const DEFAULT_LISTING_URL: &str = "https://www.europharmajobs.com/job_search/category/bioinformatics/category/biotechnology_and_genetics/category/clinical_data_management/category/clinical_research/category/data_programming_and_statistics/category/manufacturing_and_logistics/category/medical/category/medical_devices/category/pharmacovigilance_and_medical_information/category/pre-clinical_research_and_development/category/programming/category/quality_assurance/category/regulatory_affairs/category/sales_marketing_and_communications/category/statistics";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36";

/// Where to scrape from and where results live, per deployment environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default = "default_listing_url")]
    pub listing_url: String,
    /// Substring identifying job detail links on the listing page
    #[serde(default = "default_job_link_marker")]
    pub job_link_marker: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Pause between two posting requests
    #[serde(default)]
    pub request_delay_ms: u64,
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    #[serde(default)]
    pub vocabulary_path: Option<PathBuf>,
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: Option<EnvironmentConfig>,
}

fn default_listing_url() -> String {
    DEFAULT_LISTING_URL.to_string()
}

fn default_job_link_marker() -> String {
    "job_display".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/title_profile.csv")
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            job_link_marker: default_job_link_marker(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
            request_delay_ms: 0,
            data_path: default_data_path(),
            vocabulary_path: None,
            report_dir: default_report_dir(),
        }
    }
}

impl EnvironmentConfig {
    /// Load `config_path` for the current environment, or defaults when absent
    pub fn load(config_path: &Path) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            Self::from_yaml_str(&content, &environment)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else {
            info!(
                "{} not found, using built-in defaults",
                config_path.display()
            );
            Self::default()
        };

        config.resolved()
    }

    fn get_environment() -> String {
        std::env::var("PROFILE_MINER_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn from_yaml_str(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile =
            serde_yaml::from_str(content).context("Invalid configuration YAML")?;

        match environment {
            "production" => config_file
                .production
                .context("No 'production' section in configuration"),
            _ => Ok(config_file.local),
        }
    }

    /// Make every path absolute
    fn resolved(mut self) -> Result<Self> {
        self.data_path = resolve_path(&self.data_path)?;
        self.report_dir = resolve_path(&self.report_dir)?;
        if let Some(path) = &self.vocabulary_path {
            self.vocabulary_path = Some(resolve_path(path)?);
        }
        Ok(self)
    }
}
