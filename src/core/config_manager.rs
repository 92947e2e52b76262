// src/core/config_manager.rs
//! Loads environment settings and the vocabulary once per process

use crate::environment::EnvironmentConfig;
use crate::types::Vocabulary;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub vocabulary: Arc<Vocabulary>,
}

impl ConfigManager {
    /// Load all configurations; `vocabulary_override` wins over the config file
    pub fn load(config_path: &Path, vocabulary_override: Option<PathBuf>) -> Result<Self> {
        let mut environment = EnvironmentConfig::load(config_path)?;
        if let Some(path) = vocabulary_override {
            environment.vocabulary_path = Some(crate::utils::resolve_path(&path)?);
        }

        let vocabulary = Self::load_vocabulary(environment.vocabulary_path.as_deref())?;

        Ok(Self {
            environment,
            vocabulary: Arc::new(vocabulary),
        })
    }

    pub fn with_vocabulary(environment: EnvironmentConfig, vocabulary: Vocabulary) -> Self {
        Self {
            environment,
            vocabulary: Arc::new(vocabulary),
        }
    }

    fn load_vocabulary(path: Option<&Path>) -> Result<Vocabulary> {
        match path {
            Some(path) => Vocabulary::load(path),
            None => {
                info!("Using built-in vocabulary");
                Vocabulary::builtin()
            }
        }
    }

    /// Ensure the directories results are written to exist
    pub async fn ensure_directories(&self) -> Result<()> {
        use crate::core::FsOps;

        if let Some(data_dir) = self.environment.data_path.parent() {
            FsOps::ensure_dir_exists(data_dir).await?;
        }
        FsOps::ensure_dir_exists(&self.environment.report_dir).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_override() {
        let dir = tempfile::tempdir().unwrap();
        let vocabulary_path = dir.path().join("vocabulary.toml");
        std::fs::write(
            &vocabulary_path,
            "[headers]\nphrasings = [\"Requirements\"]\n",
        )
        .unwrap();

        let config =
            ConfigManager::load(&dir.path().join("config.yaml"), Some(vocabulary_path)).unwrap();
        assert_eq!(config.vocabulary.headers.phrasings(), ["requirements"]);
    }

    #[test]
    fn test_builtin_vocabulary_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigManager::load(&dir.path().join("config.yaml"), None).unwrap();
        assert!(config.vocabulary.headers.phrasings().len() > 10);
    }

    #[tokio::test]
    async fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let environment = EnvironmentConfig {
            data_path: dir.path().join("data/profiles.csv"),
            report_dir: dir.path().join("reports"),
            ..EnvironmentConfig::default()
        };
        let config = ConfigManager::with_vocabulary(environment, Vocabulary::builtin().unwrap());

        config.ensure_directories().await.unwrap();
        assert!(dir.path().join("data").is_dir());
        assert!(dir.path().join("reports").is_dir());
    }
}
