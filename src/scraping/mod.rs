// src/scraping/mod.rs
pub mod crawler;
pub mod fetcher;
pub mod links;

pub use crawler::{ProfileScraper, ScrapeSummary};
pub use fetcher::{Fetcher, HttpFetcher};
pub use links::extract_job_links;
