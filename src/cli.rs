// src/cli.rs
use crate::analysis::{CorpusAggregator, LexicalClassifier};
use crate::core::{ConfigManager, FsOps};
use crate::extraction::ProfileExtractor;
use crate::report::AnalysisReport;
use crate::scheduler::run_daily;
use crate::scraping::{HttpFetcher, ProfileScraper, ScrapeSummary};
use crate::storage::ProfileStore;
use crate::utils::parse_time_of_day;
use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "profile-miner")]
#[command(about = "Extract candidate profiles from job postings and rank skills, tools and trends")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Environment configuration file
    #[arg(long, global = true, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Vocabulary file overriding the configured or built-in one
    #[arg(long, global = true)]
    pub vocabulary: Option<PathBuf>,

    /// Also write JSON logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scrape the job listing and save extracted profiles to CSV
    Scrape {
        /// Fetch at most this many postings
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Extract the profile section from a local HTML file
    Extract { html_file: PathBuf },
    /// Rank job areas, tools, certificates and trends across saved profiles
    Analyze {
        /// Profile CSV to read instead of the configured data path
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write the report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
        /// Show only the N most frequent entries per table
        #[arg(long)]
        top: Option<usize>,
    },
    /// Scrape, then analyze
    Run {
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        top: Option<usize>,
    },
    /// Scrape and analyze every day at a fixed local time
    Schedule {
        /// Local time of day, HH:MM
        #[arg(long)]
        at: String,
        /// Stop after this many runs
        #[arg(long)]
        runs: Option<usize>,
    },
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = ConfigManager::load(&cli.config, cli.vocabulary)?;

    match cli.command {
        Command::Scrape { limit } => {
            let summary = scrape(&config, limit).await?;
            println!(
                "Saved {} profiles ({} postings fetched, {} failed, {} without profile section)",
                summary.extracted, summary.fetched, summary.failed, summary.missed
            );
        }

        Command::Extract { html_file } => {
            let raw_html = FsOps::read_file_safe(&html_file).await?;
            let extractor = ProfileExtractor::from_vocabulary(&config.vocabulary)?;
            let profile = extractor.extract_profile(&raw_html);

            println!("Job title: {}", profile.job_title);
            match profile.text {
                Some(text) if text.is_empty() => println!("Profile section found but empty"),
                Some(text) => println!("\n{}", text),
                None => println!("No profile section found"),
            }
        }

        Command::Analyze { csv, json, top } => {
            let csv = csv.unwrap_or_else(|| config.environment.data_path.clone());
            if !FsOps::file_accessible(&csv).await {
                anyhow::bail!(
                    "No profiles at {}; run `profile-miner scrape` first",
                    csv.display()
                );
            }
            let report = analyze(&config, &csv).await?;
            print!("{}", report.render_text(top));
            if let Some(path) = json {
                report.write_json(&path).await?;
            }
        }

        Command::Run { limit, top } => {
            let report = run_once(&config, limit).await?;
            print!("{}", report.render_text(top));
        }

        Command::Schedule { at, runs } => {
            let at = parse_time_of_day(&at)?;
            info!("Scheduling daily runs at {}", at.format("%H:%M"));
            let config = &config;
            run_daily(at, runs, move || async move {
                run_once(config, None).await.map(|_| ())
            })
            .await;
        }
    }

    Ok(())
}

/// Scrape the configured listing and overwrite the profile CSV
pub async fn scrape(config: &ConfigManager, limit: Option<usize>) -> Result<ScrapeSummary> {
    config.ensure_directories().await?;

    let extractor = Arc::new(ProfileExtractor::from_vocabulary(&config.vocabulary)?);
    let fetcher = HttpFetcher::from_environment(&config.environment)?;
    let scraper = ProfileScraper::new(fetcher, extractor, &config.environment);

    let summary = scraper.scrape(limit).await?;
    if summary.records.is_empty() {
        warn!("No profiles extracted; the CSV will only contain a header");
    }
    ProfileStore::new(&config.environment.data_path)
        .save(&summary.records)
        .await?;
    Ok(summary)
}

/// Aggregate every profile stored in `csv`
pub async fn analyze(config: &ConfigManager, csv: &Path) -> Result<AnalysisReport> {
    let corpus = ProfileStore::new(csv).load_corpus().await?;
    let classifier = LexicalClassifier::from_vocabulary(&config.vocabulary)?;

    let profiles = corpus.len();
    let tables = tokio::task::spawn_blocking(move || {
        CorpusAggregator::new(&classifier).aggregate(&corpus)
    })
    .await?;

    Ok(AnalysisReport::new(profiles, tables))
}

/// Scrape, analyze the fresh CSV and keep a timestamped JSON report
async fn run_once(config: &ConfigManager, limit: Option<usize>) -> Result<AnalysisReport> {
    scrape(config, limit).await?;
    let report = analyze(config, &config.environment.data_path).await?;

    let file_name = format!("analysis_{}.json", Utc::now().format("%Y%m%d_%H%M%S"));
    report
        .write_json(&config.environment.report_dir.join(file_name))
        .await?;
    Ok(report)
}
