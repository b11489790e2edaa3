//! HTTP fetcher implementation
//!
//! This module handles the page request, including:
//! - Building HTTP clients with a browser user agent
//! - Capping redirect chains
//! - Enforcing the connect and read timeout
//! - Error classification

use crate::config::FetcherConfig;
use crate::HarvestError;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,
    /// Page markup
    pub body: String,
}

/// Builds an HTTP client for page requests
///
/// # Example
///
/// ```no_run
/// use page_harvest::config::FetcherConfig;
/// use page_harvest::harvester::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_millis(config.timeout_ms);

    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page with a single GET request
///
/// No retries are attempted; any failure is terminal for this page.
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Timeout | `HarvestError::Timeout` |
/// | Redirect chain too long | `HarvestError::RedirectLimit` |
/// | Connection refused / DNS / TLS | `HarvestError::Connect` |
/// | Non-2xx status | `HarvestError::Status` |
/// | Body read failure | `HarvestError::Http` |
pub async fn fetch_page(client: &Client, url: &Url) -> crate::Result<FetchedPage> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    let final_url = response.url().clone();

    if !status.is_success() {
        return Err(HarvestError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = response.text().await.map_err(|e| classify_error(url, e))?;

    tracing::debug!(
        "Fetched {} ({} bytes, status {}, {})",
        final_url,
        body.len(),
        status.as_u16(),
        content_type.as_deref().unwrap_or("no content type")
    );

    Ok(FetchedPage {
        final_url,
        body,
    })
}

/// Maps a reqwest error onto the crate error type
pub(crate) fn classify_error(url: &Url, error: reqwest::Error) -> HarvestError {
    let url = url.to_string();
    if error.is_timeout() {
        HarvestError::Timeout { url }
    } else if error.is_redirect() {
        HarvestError::RedirectLimit { url }
    } else if error.is_connect() {
        HarvestError::Connect { url }
    } else {
        HarvestError::Http { url, source: error }
    }
}
