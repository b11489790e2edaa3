use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern used to find email addresses inside free text
pub static EMAIL_SCAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email scan pattern is valid")
});

static EMAIL_EXACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Placeholder addresses that show up in templates and form hints
const FALSE_POSITIVE_EMAILS: &[&str] = &[
    "example@example.com",
    "test@test.com",
    "email@example.com",
    "user@example.com",
    "name@example.com",
    "your@email.com",
    "youremail@example.com",
    "your-email@example.com",
    "email@domain.com",
    "name@domain.com",
    "user@domain.com",
    "someone@example.com",
    "john@doe.com",
    "johndoe@example.com",
];

/// Top-level "domains" that are really asset names such as `logo@2x.png`
const ASSET_SUFFIXES: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "ico", "avif", "css", "js",
];

const MAX_EMAIL_LEN: usize = 100;

/// Checks the syntax and length of an email address
pub fn is_valid_email(email: &str) -> bool {
    email.len() < MAX_EMAIL_LEN && EMAIL_EXACT.is_match(email)
}

/// Returns true for known placeholder addresses and asset-name matches
///
/// Expects a lowercase address.
pub fn is_false_positive_email(email: &str) -> bool {
    if FALSE_POSITIVE_EMAILS.contains(&email) {
        return true;
    }

    email
        .rsplit_once('.')
        .is_some_and(|(_, tld)| ASSET_SUFFIXES.contains(&tld))
}

/// Trims, lowercases and validates an email candidate
///
/// # Returns
///
/// * `Some(String)` - The normalized address
/// * `None` - The candidate is malformed or a known false positive
///
/// # Examples
///
/// ```
/// use page_harvest::validate::normalize_email;
///
/// assert_eq!(normalize_email(" Info@Acme.io "), Some("info@acme.io".to_string()));
/// assert_eq!(normalize_email("test@test.com"), None);
/// assert_eq!(normalize_email("not-an-email"), None);
/// ```
pub fn normalize_email(candidate: &str) -> Option<String> {
    let email = candidate.trim().to_lowercase();
    if !is_valid_email(&email) || is_false_positive_email(&email) {
        return None;
    }
    Some(email)
}
