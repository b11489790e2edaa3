//! Document parser
//!
//! Turns raw markup into the `scraper` tree the extractors query.

use crate::HarvestError;
use scraper::Html;
use url::Url;

/// Parses page markup into a queryable document
///
/// HTML parsing is forgiving, so the only rejected input is a body with no
/// markup at all.
///
/// # Example
///
/// ```
/// use page_harvest::harvester::parse_document;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/").unwrap();
/// let document = parse_document("<html><head><title>Hi</title></head></html>", &url).unwrap();
/// assert_eq!(document.root_element().value().name(), "html");
/// ```
pub fn parse_document(markup: &str, url: &Url) -> crate::Result<Html> {
    if markup.trim().is_empty() {
        return Err(HarvestError::HtmlParse {
            url: url.to_string(),
            message: "empty document".to_string(),
        });
    }

    let document = Html::parse_document(markup);
    if !document.errors.is_empty() {
        tracing::trace!(
            "{} recoverable parse errors in {}",
            document.errors.len(),
            url
        );
    }

    Ok(document)
}
