use crate::{UrlError, UrlResult};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Permissive URL shape: optional scheme, domain or IPv4 host, optional port,
/// path, query and fragment.
static URL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(https?://)?((([a-z\d]([a-z\d-]*[a-z\d])*)\.)+[a-z]{2,}|((\d{1,3}\.){3}\d{1,3}))(:\d+)?(/[-a-z\d%_.~+]*)*(\?[;&a-z\d%_.~+=-]*)?(#[-a-z\d_]*)?$",
    )
    .expect("URL shape pattern is valid")
});

/// Validates a user-supplied page URL before any extraction work starts
///
/// Input without a scheme is treated as `https://`. Rejections are the
/// caller's equivalent of a 400 response.
///
/// # Returns
///
/// * `Ok(Url)` - A parsed HTTP(S) URL
/// * `Err(UrlError::Missing)` - The input was empty
/// * `Err(UrlError::Malformed)` - The input does not look like a web address
///
/// # Examples
///
/// ```
/// use page_harvest::url::validate_target_url;
///
/// let url = validate_target_url("example.com/contact").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/contact");
///
/// assert!(validate_target_url("").is_err());
/// assert!(validate_target_url("not a url").is_err());
/// ```
pub fn validate_target_url(input: &str) -> UrlResult<Url> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlError::Missing);
    }

    if !URL_SHAPE.is_match(input) {
        return Err(UrlError::Malformed(input.to_string()));
    }

    let lower = input.to_ascii_lowercase();
    let with_scheme = if lower.starts_with("http://") || lower.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;
    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}
