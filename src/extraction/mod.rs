// src/extraction/mod.rs
//! One posting in, one profile out: header matching, section slicing, noise removal

pub mod dom;
pub mod header_matcher;
pub mod noise_filter;
pub mod pipeline;
pub mod section_locator;

pub use dom::{DomLayout, HtmlDocument};
pub use header_matcher::{HeaderMatch, HeaderMatcher};
pub use noise_filter::NoiseFilter;
pub use pipeline::ProfileExtractor;
pub use section_locator::{SectionLocator, SectionSource};
