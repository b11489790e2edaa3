//! Scrape orchestration
//!
//! Runs the fetcher, the document parser and every field extractor, and
//! assembles one `ScrapedData` per page.

use crate::config::FetcherConfig;
use crate::extract::{extract_page, ScrapedData};
use crate::harvester::{build_http_client, fetch_page, parse_document};
use crate::UrlError;
use reqwest::Client;
use std::time::Instant;
use url::Url;

/// Page scraper holding a reusable HTTP client
///
/// A `Harvester` carries no per-scrape state, so one instance can serve
/// concurrent scrapes.
#[derive(Debug, Clone)]
pub struct Harvester {
    client: Client,
}

impl Harvester {
    /// Creates a harvester with a client built from the fetch configuration
    pub fn new(config: &FetcherConfig) -> crate::Result<Self> {
        let client = build_http_client(config)?;
        Ok(Self { client })
    }

    /// Scrapes a page, absorbing any failure
    ///
    /// If the page cannot be fetched or parsed, the failure is logged and an
    /// empty `ScrapedData` is returned. Use [`Harvester::try_scrape`] to tell
    /// an unreachable page apart from a page with no data.
    pub async fn scrape(&self, url: &str) -> ScrapedData {
        match self.try_scrape(url).await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Error scraping {}: {}", url, e);
                ScrapedData::default()
            }
        }
    }

    /// Scrapes a page, returning the fetch or parse error on failure
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapedData)` - The page was fetched and parsed (fields may still be empty)
    /// * `Err(HarvestError)` - The URL was invalid, or fetching or parsing failed
    pub async fn try_scrape(&self, url: &str) -> crate::Result<ScrapedData> {
        let start_time = Instant::now();
        let target = Url::parse(url.trim())?;
        if target.scheme() != "http" && target.scheme() != "https" {
            return Err(UrlError::InvalidScheme(target.scheme().to_string()).into());
        }

        tracing::info!("Scraping {}", target);
        let page = fetch_page(&self.client, &target).await?;
        let data = scrape_markup(&page.body, &page.final_url)?;

        tracing::info!(
            "Scraped {} in {:.2?}: {} emails, {} phone numbers, {} social links, {} images, {} videos, {} documents",
            target,
            start_time.elapsed(),
            data.emails.len(),
            data.phone_numbers.len(),
            data.social_links.len(),
            data.images.len(),
            data.videos.len(),
            data.documents.len()
        );

        Ok(data)
    }
}

/// Parses markup and runs every extractor over it
///
/// # Arguments
///
/// * `markup` - Raw page markup
/// * `base_url` - The page URL, used to absolutize links
pub fn scrape_markup(markup: &str, base_url: &Url) -> crate::Result<ScrapedData> {
    let document = parse_document(markup, base_url)?;
    Ok(extract_page(&document, base_url))
}

/// Scrapes a page with the default configuration
///
/// Convenience wrapper around [`Harvester::scrape`]; returns an empty
/// result if the client cannot be built or the page cannot be fetched.
///
/// # Example
///
/// ```no_run
/// use page_harvest::harvester::scrape_website;
///
/// # async fn example() {
/// let data = scrape_website("https://example.com/contact").await;
/// println!("Found {} emails", data.emails.len());
/// # }
/// ```
pub async fn scrape_website(url: &str) -> ScrapedData {
    match Harvester::new(&FetcherConfig::default()) {
        Ok(harvester) => harvester.scrape(url).await,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            ScrapedData::default()
        }
    }
}
