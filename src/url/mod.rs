//! URL handling module for Page-Harvest
//!
//! This module provides boundary validation of the page URL, resolution of
//! relative candidates against the page URL, and domain matching used to
//! recognise social platforms and video hosts.

mod domain;
mod matcher;
mod resolve;
mod validate;

// Re-export main functions
pub use domain::extract_domain;
pub use matcher::matches_domain;
pub use resolve::{file_name, path_extension, resolve_url};
pub use validate::validate_target_url;

use url::Url;

/// Returns true if the URL's host is `domain` or one of its subdomains
///
/// # Examples
///
/// ```
/// use page_harvest::url::host_matches;
/// use url::Url;
///
/// let url = Url::parse("https://www.youtube.com/embed/abc").unwrap();
/// assert!(host_matches(&url, "youtube.com"));
/// ```
pub fn host_matches(url: &Url, domain: &str) -> bool {
    extract_domain(url).is_some_and(|host| matches_domain(domain, &host))
}
