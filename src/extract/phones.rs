//! Phone number extraction

use super::contact::{body_text, contact_context_texts};
use crate::validate::{
    digits_only, is_placeholder_phone, is_valid_phone, normalize_tel_href, UniqueList,
};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

static ANCHORS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("anchor selector"));

/// `+` prefixed international numbers: `+44 20 7946 0958`, `+1 (415) 555-0132`
static INTERNATIONAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+\d{1,3}[-. ]?(?:\(\d{1,4}\)|\d{1,4})(?:[-. ]?\d{2,4}){2,4}\b")
        .expect("international phone pattern")
});

/// US style numbers: `(415) 555-0132`, `415-555-0132`, `415.555.0132`
static US_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\(\d{3}\)|\b\d{3})[-. ]?\d{3}[-. ]\d{4}\b").expect("US phone pattern")
});

/// Plain grouped digits: `0412 345 678`, `030 1234 5678`
static GROUPED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{2,4}[-. ]\d{3,4}[-. ]\d{3,4}\b").expect("grouped phone pattern")
});

const MIN_TEL_DIGITS: usize = 10;

/// Extracts phone numbers from a page
///
/// # Sources (in priority order)
///
/// 1. `tel:` links, normalized to digits and `+ ( ) - .`
/// 2. Contact-context text scanned with the international, US-style and
///    grouped-digit patterns
/// 3. The whole body text, only when 1 and 2 found nothing; placeholder
///    numbers such as `000-000-0000` are also rejected here
///
/// Every number has 10-15 digits and no year-like `19`/`20` prefix.
/// Duplicates are detected on the digit-only form.
pub fn extract_phone_numbers(document: &Html) -> Vec<String> {
    let mut phones = UniqueList::new();

    for element in document.select(&ANCHORS) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !href.trim_start().to_ascii_lowercase().starts_with("tel:") {
            continue;
        }

        let number = normalize_tel_href(href);
        let digits = digits_only(&number);
        if digits.len() >= MIN_TEL_DIGITS && is_valid_phone(&number) {
            phones.insert_keyed(digits, number);
        } else {
            tracing::debug!("Rejected tel link: {}", href);
        }
    }

    for text in contact_context_texts(document) {
        scan_text(&text, false, &mut phones);
    }

    if phones.is_empty() {
        tracing::debug!("No phone numbers in links or contact sections, scanning full page text");
        scan_text(&body_text(document), true, &mut phones);
    }

    phones.into_vec()
}

/// Scans text with every pattern, keeping the first valid match for any span
///
/// Patterns are tried from most to least specific; a match overlapping an
/// already accepted span is dropped so a single number is reported once.
fn scan_text(text: &str, reject_placeholders: bool, phones: &mut UniqueList) {
    let mut accepted: Vec<(usize, usize, &str)> = Vec::new();

    for pattern in [&*INTERNATIONAL, &*US_STYLE, &*GROUPED] {
        for found in pattern.find_iter(text) {
            let (start, end) = (found.start(), found.end());
            if accepted.iter().any(|&(s, e, _)| start < e && s < end) {
                continue;
            }

            let candidate = found.as_str().trim();
            if !is_valid_phone(candidate) {
                continue;
            }
            if reject_placeholders && is_placeholder_phone(candidate) {
                tracing::debug!("Rejected placeholder phone number: {}", candidate);
                continue;
            }

            accepted.push((start, end, candidate));
        }
    }

    accepted.sort_by_key(|&(start, _, _)| start);
    for (_, _, candidate) in accepted {
        phones.insert_keyed(digits_only(candidate), candidate.to_string());
    }
}
