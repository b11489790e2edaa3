use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves a candidate href or src against the page URL
///
/// Relative references (`/logo.png`, `../img/a.jpg`, `//cdn.site.com/x.png`)
/// are joined onto `base_url`. The result must be an HTTP(S) URL with a host.
///
/// # Examples
///
/// ```
/// use page_harvest::url::resolve_url;
/// use url::Url;
///
/// let base = Url::parse("https://site.com/page").unwrap();
/// let url = resolve_url(&base, "/logo.png").unwrap();
/// assert_eq!(url.as_str(), "https://site.com/logo.png");
/// ```
pub fn resolve_url(base_url: &Url, candidate: &str) -> UrlResult<Url> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return Err(UrlError::Missing);
    }

    let url = base_url
        .join(candidate)
        .map_err(|e| UrlError::Parse(format!("{}: {}", candidate, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Returns the last path segment of a URL, if it is non-empty
pub fn file_name(url: &Url) -> Option<&str> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
}

/// Returns the lowercase extension of the URL's file name (without the dot)
///
/// # Examples
///
/// ```
/// use page_harvest::url::path_extension;
/// use url::Url;
///
/// let url = Url::parse("https://site.com/a/Photo.JPG?w=200").unwrap();
/// assert_eq!(path_extension(&url), Some("jpg".to_string()));
///
/// let url = Url::parse("https://site.com/watch").unwrap();
/// assert_eq!(path_extension(&url), None);
/// ```
pub fn path_extension(url: &Url) -> Option<String> {
    let name = file_name(url)?;
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}
