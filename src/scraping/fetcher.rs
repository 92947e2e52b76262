// src/scraping/fetcher.rs
use crate::environment::EnvironmentConfig;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Source of raw posting HTML. Implementations own retries, if any.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Plain `reqwest` fetcher with a fixed user agent and timeout
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    pub fn from_environment(environment: &EnvironmentConfig) -> Result<Self> {
        Self::new(
            &environment.user_agent,
            Duration::from_secs(environment.timeout_seconds),
        )
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error {} for {}", response.status(), url);
        }

        response
            .text()
            .await
            .context("Failed to read response body")
    }
}
