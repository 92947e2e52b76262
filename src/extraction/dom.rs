// src/extraction/dom.rs
//! `scraper`-backed DOM access: header nodes and the text of their following siblings

use super::section_locator::SectionSource;
use crate::config::ExtractionSettings;
use crate::types::HeaderCandidate;
use crate::utils::{clean_text, collapse_whitespace};
use anyhow::Result;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

/// Validated selector strings for locating headers and the content container.
///
/// Selectors are compiled per document; the layout itself is plain strings.
#[derive(Debug, Clone)]
pub struct DomLayout {
    header_selector: String,
    container_selectors: Vec<String>,
}

impl DomLayout {
    pub fn from_settings(settings: &ExtractionSettings) -> Result<Self> {
        let header_selector = settings.header_tags.join(", ");
        parse_selector(&header_selector)?;
        for selector in &settings.container_selectors {
            parse_selector(selector)?;
        }

        Ok(Self {
            header_selector,
            container_selectors: settings.container_selectors.clone(),
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow::anyhow!("Invalid selector '{}': {:?}", selector, e))
}

/// A parsed posting
pub struct HtmlDocument {
    html: Html,
    header_selector: Option<Selector>,
    container_selectors: Vec<Selector>,
}

impl HtmlDocument {
    pub fn parse(raw_html: &str, layout: &DomLayout) -> Self {
        let html = Html::parse_document(raw_html);
        let header_selector = parse_selector(&layout.header_selector).ok();
        let container_selectors = layout
            .container_selectors
            .iter()
            .filter_map(|selector| parse_selector(selector).ok())
            .collect();

        Self {
            html,
            header_selector,
            container_selectors,
        }
    }

    /// First `h1` anywhere in the document
    pub fn job_title(&self) -> Option<String> {
        let selector = Selector::parse("h1").ok()?;
        self.html
            .select(&selector)
            .map(|element| clean_text(&element.text().collect::<String>()))
            .find(|title| !title.is_empty())
    }

    /// The first configured container present, or the whole document
    fn container(&self) -> ElementRef<'_> {
        for selector in &self.container_selectors {
            if let Some(element) = self.html.select(selector).next() {
                return element;
            }
        }
        debug!("No content container found, scanning the whole document");
        self.html.root_element()
    }

    fn header_elements(&self) -> Vec<ElementRef<'_>> {
        match &self.header_selector {
            Some(selector) => self.container().select(selector).collect(),
            None => Vec::new(),
        }
    }
}

/// Elements whose boundaries start a new line of text
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Text of `element` with inline markup flattened and block children on their own lines
fn collect_block_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(inner) => {
                let Some(inner_ref) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCK_TAGS.contains(&inner.name());
                if block {
                    out.push('\n');
                }
                collect_block_text(inner_ref, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// Non-blank lines, whitespace-collapsed, joined by `\n`
fn text_lines(text: &str) -> String {
    text.lines()
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn element_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    collect_block_text(element, &mut text);
    text_lines(&text)
}

impl SectionSource for HtmlDocument {
    fn headers(&self) -> Vec<HeaderCandidate> {
        self.header_elements()
            .into_iter()
            .enumerate()
            .map(|(position, element)| HeaderCandidate {
                text: clean_text(&element.text().collect::<String>()),
                position,
            })
            .collect()
    }

    fn following_texts(&self, position: usize) -> Vec<String> {
        let headers = self.header_elements();
        let Some(header) = headers.get(position) else {
            return Vec::new();
        };

        header
            .next_siblings()
            .filter_map(|node| match node.value() {
                Node::Element(_) => ElementRef::wrap(node).map(element_text),
                Node::Text(text) => Some(text_lines(text)),
                _ => None,
            })
            .filter(|text| !text.is_empty())
            .collect()
    }
}
