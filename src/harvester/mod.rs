//! Harvester module for page fetching and extraction
//!
//! This module contains the single-page scrape pipeline:
//! - HTTP fetching with a bounded timeout and redirect cap
//! - Parsing markup into a queryable document
//! - Running the field extractors and assembling the result

mod aggregator;
mod fetcher;
mod parser;

pub use aggregator::{scrape_markup, scrape_website, Harvester};
pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use parser::parse_document;

pub(crate) use fetcher::classify_error;
