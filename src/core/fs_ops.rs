// src/core/fs_ops.rs
//! Async file system helpers with error context

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

pub struct FsOps;

impl FsOps {
    /// Create the directory and its parents if missing
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Write (overwrite) a file, creating its parent directory first
    pub async fn write_file_safe(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir_exists(parent).await?;
            }
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        debug!("Written file: {}", path.display());
        Ok(())
    }

    pub async fn file_accessible(path: &Path) -> bool {
        fs::metadata(path).await.is_ok()
    }
}
