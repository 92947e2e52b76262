// src/scraping/crawler.rs
use super::fetcher::Fetcher;
use super::links::extract_job_links;
use crate::environment::EnvironmentConfig;
use crate::extraction::ProfileExtractor;
use crate::types::{JobPosting, ProfileRecord};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Outcome of one scrape run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub discovered: usize,
    pub fetched: usize,
    pub failed: usize,
    pub extracted: usize,
    pub missed: usize,
    pub records: Vec<ProfileRecord>,
}

/// Listing page -> posting pages -> profile records
pub struct ProfileScraper<F: Fetcher> {
    fetcher: F,
    extractor: Arc<ProfileExtractor>,
    listing_url: String,
    link_marker: String,
    request_delay: Duration,
}

impl<F: Fetcher> ProfileScraper<F> {
    pub fn new(fetcher: F, extractor: Arc<ProfileExtractor>, environment: &EnvironmentConfig) -> Self {
        Self {
            fetcher,
            extractor,
            listing_url: environment.listing_url.clone(),
            link_marker: environment.job_link_marker.clone(),
            request_delay: Duration::from_millis(environment.request_delay_ms),
        }
    }

    pub async fn discover_job_links(&self) -> Result<Vec<String>> {
        let listing = self
            .fetcher
            .fetch(&self.listing_url)
            .await
            .context("Failed to fetch job listing")?;

        let links = extract_job_links(&listing, &self.listing_url, &self.link_marker);
        info!("Found {} job links on {}", links.len(), self.listing_url);
        Ok(links)
    }

    /// Fetch up to `limit` postings and extract their profiles.
    ///
    /// A posting that cannot be fetched is logged and skipped; only a failed
    /// listing request aborts the run.
    pub async fn scrape(&self, limit: Option<usize>) -> Result<ScrapeSummary> {
        let mut links = self.discover_job_links().await?;
        let discovered = links.len();
        if let Some(limit) = limit {
            links.truncate(limit);
        }

        let mut postings = Vec::with_capacity(links.len());
        let mut failed = 0;
        for (index, url) in links.into_iter().enumerate() {
            if index > 0 && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }

            match self.fetcher.fetch(&url).await {
                Ok(raw_html) => postings.push(JobPosting { url, raw_html }),
                Err(e) => {
                    failed += 1;
                    warn!("Skipping {}: {:#}", url, e);
                }
            }
        }
        let fetched = postings.len();

        let extractor = Arc::clone(&self.extractor);
        let profiles = tokio::task::spawn_blocking(move || extractor.extract_batch(&postings))
            .await
            .context("Extraction task failed")?;

        let records: Vec<ProfileRecord> = profiles
            .into_iter()
            .filter_map(|profile| profile.into_record())
            .collect();

        let summary = ScrapeSummary {
            discovered,
            fetched,
            failed,
            extracted: records.len(),
            missed: fetched - records.len(),
            records,
        };
        info!(
            "Scrape finished: {} discovered, {} fetched, {} failed, {} extracted, {} without profile",
            summary.discovered, summary.fetched, summary.failed, summary.extracted, summary.missed
        );
        Ok(summary)
    }
}
