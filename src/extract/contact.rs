//! Contact-context text gathering
//!
//! Emails and phone numbers are first searched for in the parts of a page
//! that usually carry contact details, and only then in the whole body.

use super::visible_text;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Class or id fragments that mark an element as contact context
const CONTACT_KEYWORDS: &[&str] = &[
    "contact", "footer", "header", "about", "email", "mail", "phone", "address", "info",
];

/// Elements that are contact context by tag alone
const CONTACT_TAGS: &[&str] = &["footer", "header", "address"];

static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").expect("body selector"));

fn is_contact_context(element: &ElementRef<'_>) -> bool {
    let value = element.value();
    if CONTACT_TAGS.contains(&value.name()) {
        return true;
    }

    [value.attr("class"), value.attr("id")]
        .into_iter()
        .flatten()
        .any(|attr| {
            let attr = attr.to_lowercase();
            CONTACT_KEYWORDS.iter().any(|keyword| attr.contains(keyword))
        })
}

/// Returns the text of every outermost contact-context element, in document order
///
/// An element nested inside another contact-context element is covered by its
/// ancestor's text and is not returned separately.
pub fn contact_context_texts(document: &Html) -> Vec<String> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(is_contact_context)
        .filter(|element| {
            !element
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|ancestor| is_contact_context(&ancestor))
        })
        .map(visible_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Returns the visible text of the whole body (or document if there is no body)
pub fn body_text(document: &Html) -> String {
    match document.select(&BODY).next() {
        Some(body) => visible_text(body),
        None => visible_text(document.root_element()),
    }
}
