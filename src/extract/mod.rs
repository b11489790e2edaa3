//! Field extractors for a parsed page
//!
//! Every extractor is a read-only function over the same parsed document
//! (plus the page URL for link resolution). Each one owns the working state
//! of its own pass, so nothing is shared between extractors or between
//! concurrent scrapes.

mod contact;
mod emails;
mod media;
mod metadata;
mod phones;
mod social;

pub use contact::{body_text, contact_context_texts};
pub use emails::extract_emails;
pub use media::{
    extract_documents, extract_images, extract_videos, DOCUMENT_EXTENSIONS, IMAGE_EXTENSIONS,
    VIDEO_EXTENSIONS, VIDEO_HOSTS,
};
pub use metadata::{extract_description, extract_title};
pub use phones::extract_phone_numbers;
pub use social::{extract_social_links, SocialPlatform, SOCIAL_PLATFORMS};

use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Structured result of one page scrape
///
/// Serializes to the camelCase JSON shape consumed by API callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedData {
    pub title: String,
    pub description: String,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    /// Platform name to profile URL, at most one per platform
    pub social_links: BTreeMap<String, String>,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub documents: Vec<String>,
}

impl ScrapedData {
    /// Returns true if no field holds any data
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.description.is_empty()
            && self.emails.is_empty()
            && self.phone_numbers.is_empty()
            && self.social_links.is_empty()
            && self.images.is_empty()
            && self.videos.is_empty()
            && self.documents.is_empty()
    }

    /// Media URLs in download order: images, then videos, then documents
    pub fn media_urls(&self) -> impl Iterator<Item = &str> {
        self.images
            .iter()
            .chain(&self.videos)
            .chain(&self.documents)
            .map(String::as_str)
    }
}

/// Runs every extractor over a parsed document
///
/// # Arguments
///
/// * `document` - The parsed page
/// * `base_url` - The page URL, used to absolutize links
pub fn extract_page(document: &Html, base_url: &Url) -> ScrapedData {
    ScrapedData {
        title: extract_title(document),
        description: extract_description(document),
        emails: extract_emails(document),
        phone_numbers: extract_phone_numbers(document),
        social_links: extract_social_links(document, base_url),
        images: extract_images(document, base_url),
        videos: extract_videos(document, base_url),
        documents: extract_documents(document, base_url),
    }
}

/// Collects the rendered text of an element
///
/// Text inside `script`, `style`, `noscript` and `template` is skipped and
/// separate text nodes are joined with a single space.
pub(crate) fn visible_text(element: ElementRef<'_>) -> String {
    let mut parts = Vec::new();

    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().filter_map(ElementRef::wrap).any(|el| {
            matches!(
                el.value().name(),
                "script" | "style" | "noscript" | "template"
            )
        });
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }

    parts.join(" ")
}
