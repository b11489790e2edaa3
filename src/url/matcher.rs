/// Checks if a host belongs to a known domain
///
/// A host matches when it equals the domain or is one of its subdomains,
/// so `m.facebook.com` matches `facebook.com` but `notfacebook.com` does not.
///
/// # Examples
///
/// ```
/// use page_harvest::url::matches_domain;
///
/// assert!(matches_domain("facebook.com", "facebook.com"));
/// assert!(matches_domain("facebook.com", "m.facebook.com"));
/// assert!(!matches_domain("facebook.com", "notfacebook.com"));
/// assert!(!matches_domain("x.com", "dropbox.com"));
/// ```
pub fn matches_domain(domain: &str, host: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
