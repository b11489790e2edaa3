//! Title and description extraction

use super::visible_text;
use scraper::{Html, Selector};

/// Selectors tried in order for the page title. Meta selectors read `content`.
const TITLE_SOURCES: &[&str] = &[
    "title",
    "h1",
    r#"meta[property="og:title"]"#,
    r#"meta[name="twitter:title"]"#,
    ".title",
    "#title",
    ".page-title",
    ".site-title",
    ".entry-title",
    ".post-title",
];

/// Meta selectors tried in order for the page description
const DESCRIPTION_SOURCES: &[&str] = &[
    r#"meta[name="description"]"#,
    r#"meta[property="og:description"]"#,
    r#"meta[name="twitter:description"]"#,
    r#"meta[name="Description"]"#,
];

/// Extracts the page title
///
/// Returns the first non-empty trimmed value from `<title>`, the first
/// `<h1>`, Open Graph and Twitter card metadata, then common title
/// classes and ids. Empty if nothing matches.
pub fn extract_title(document: &Html) -> String {
    first_match(document, TITLE_SOURCES)
}

/// Extracts the page description from meta tags
pub fn extract_description(document: &Html) -> String {
    first_match(document, DESCRIPTION_SOURCES)
}

fn first_match(document: &Html, sources: &[&str]) -> String {
    for source in sources {
        let Ok(selector) = Selector::parse(source) else {
            tracing::debug!("Skipping unparseable selector {}", source);
            continue;
        };

        // Only the first element of each source is considered
        let Some(element) = document.select(&selector).next() else {
            continue;
        };

        let value = if element.value().name() == "meta" {
            element
                .value()
                .attr("content")
                .map(|content| content.trim().to_string())
                .unwrap_or_default()
        } else {
            visible_text(element)
        };

        if !value.is_empty() {
            return value;
        }
    }

    String::new()
}
