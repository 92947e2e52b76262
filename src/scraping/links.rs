// src/scraping/links.rs
use reqwest::Url;
use scraper::{Html, Selector};
use tracing::warn;

/// Job detail links on a listing page: anchors whose `href` contains `marker`,
/// resolved against `base_url`, de-duplicated in page order
pub fn extract_job_links(listing_html: &str, base_url: &str, marker: &str) -> Vec<String> {
    let base = match Url::parse(base_url) {
        Ok(base) => base,
        Err(e) => {
            warn!("Invalid listing URL {}: {}", base_url, e);
            return Vec::new();
        }
    };
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(listing_html);
    let mut links: Vec<String> = Vec::new();
    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.contains(marker) {
            continue;
        }
        match base.join(href.trim()) {
            Ok(url) => {
                let url = url.to_string();
                if !links.contains(&url) {
                    links.push(url);
                }
            }
            Err(e) => warn!("Skipping unresolvable link {}: {}", href, e),
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.europharmajobs.com/job_search/category/statistics";

    #[test]
    fn test_links_are_filtered_resolved_and_deduplicated() {
        let html = r#"
            <a href="job_display/123/Statistician">Statistician</a>
            <a href="/about">About</a>
            <a href="/job_display/456/QA">QA</a>
            <a href="job_display/123/Statistician">Statistician again</a>
            <a href="https://other.example.com/job_display/789">Partner</a>
            <a>No href</a>"#;

        let links = extract_job_links(html, BASE, "job_display");
        assert_eq!(
            links,
            vec![
                "https://www.europharmajobs.com/job_search/category/job_display/123/Statistician",
                "https://www.europharmajobs.com/job_display/456/QA",
                "https://other.example.com/job_display/789",
            ]
        );
    }

    #[test]
    fn test_invalid_base_url_yields_nothing() {
        let html = r#"<a href="job_display/1">x</a>"#;
        assert!(extract_job_links(html, "not a url", "job_display").is_empty());
    }
}
