//! Phone number validation

use percent_encoding::percent_decode_str;

const MIN_DIGITS: usize = 10;
const MAX_DIGITS: usize = 15;

/// Digit-only forms of numbers that appear as template placeholders
const PLACEHOLDER_NUMBERS: &[&str] = &["1234567890", "0123456789", "9876543210", "5555555555"];

/// Strips everything but ASCII digits
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Checks the digit count and rejects year-like prefixes
///
/// Numbers whose digit-only form starts with `19` or `20` are usually dates
/// (`2023 10 15 1200`) rather than phone numbers.
///
/// # Examples
///
/// ```
/// use page_harvest::validate::is_valid_phone;
///
/// assert!(is_valid_phone("(555) 123-4567"));
/// assert!(is_valid_phone("+44 7911 123456"));
/// assert!(!is_valid_phone("555-1234"));
/// assert!(!is_valid_phone("2023-10-15 1200"));
/// ```
pub fn is_valid_phone(candidate: &str) -> bool {
    let digits = digits_only(candidate);
    (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len())
        && !digits.starts_with("19")
        && !digits.starts_with("20")
}

/// Returns true for repeated-digit runs and well-known dummy numbers
pub fn is_placeholder_phone(candidate: &str) -> bool {
    let digits = digits_only(candidate);
    let Some(first) = digits.chars().next() else {
        return true;
    };

    digits.chars().all(|c| c == first)
        || PLACEHOLDER_NUMBERS
            .iter()
            .any(|placeholder| digits.ends_with(placeholder))
}

/// Normalizes the target of a `tel:` link
///
/// Percent-escapes are decoded first. Digits and the `+ ( ) - .`
/// punctuation are kept and everything else (whitespace, letters) is dropped.
///
/// # Examples
///
/// ```
/// use page_harvest::validate::normalize_tel_href;
///
/// assert_eq!(normalize_tel_href("tel:+1%20(555)%20123-4567"), "+1(555)123-4567");
/// ```
pub fn normalize_tel_href(href: &str) -> String {
    let trimmed = href.trim();
    let number = match trimmed.get(..4) {
        Some(scheme) if scheme.eq_ignore_ascii_case("tel:") => &trimmed[4..],
        _ => trimmed,
    };

    percent_decode_str(number)
        .decode_utf8_lossy()
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '(' | ')' | '-' | '.'))
        .collect()
}
