//! Email address extraction

use super::contact::{body_text, contact_context_texts};
use crate::validate::{normalize_email, UniqueList, EMAIL_SCAN};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static ANCHORS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("anchor selector"));

/// Extracts email addresses from a page
///
/// # Sources (in priority order)
///
/// 1. `mailto:` links; query parameters are dropped and comma separated
///    recipient lists are split
/// 2. Text inside contact-context elements (footers, headers, elements whose
///    class or id mentions contact, about, email, ...)
/// 3. The whole body text, only when 1 and 2 found nothing
///
/// Addresses are lowercased, validated, filtered against known placeholders
/// and returned in first-seen order without duplicates.
pub fn extract_emails(document: &Html) -> Vec<String> {
    let mut emails = UniqueList::new();

    for element in document.select(&ANCHORS) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(target) = strip_mailto(href) else {
            continue;
        };

        let recipients = target.split('?').next().unwrap_or_default();
        for candidate in recipients.split(',') {
            match normalize_email(candidate) {
                Some(email) => {
                    emails.insert(email);
                }
                None if !candidate.trim().is_empty() => {
                    tracing::debug!("Rejected mailto address: {}", candidate.trim());
                }
                None => {}
            }
        }
    }

    for text in contact_context_texts(document) {
        scan_text(&text, &mut emails);
    }

    if emails.is_empty() {
        tracing::debug!("No emails in links or contact sections, scanning full page text");
        scan_text(&body_text(document), &mut emails);
    }

    emails.into_vec()
}

fn strip_mailto(href: &str) -> Option<&str> {
    let href = href.trim();
    match href.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("mailto:") => Some(&href[7..]),
        _ => None,
    }
}

fn scan_text(text: &str, emails: &mut UniqueList) {
    for found in EMAIL_SCAN.find_iter(text) {
        if let Some(email) = normalize_email(found.as_str()) {
            emails.insert(email);
        }
    }
}
