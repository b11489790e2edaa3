//! Image, video and document link extraction

use crate::url::{file_name, host_matches, path_extension, resolve_url};
use crate::validate::UniqueList;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

/// Extensions recognised as images
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "svg", "bmp", "ico", "avif", "tif", "tiff",
];

/// Extensions recognised as videos
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "ogv", "mov", "avi", "mkv", "m4v", "wmv", "flv"];

/// Extensions recognised as documents
pub const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "rtf",
];

/// Video hosting domains whose embeds and links count as videos
pub const VIDEO_HOSTS: &[&str] = &[
    "youtube.com",
    "youtu.be",
    "youtube-nocookie.com",
    "vimeo.com",
    "dailymotion.com",
    "dai.ly",
];

/// Path fragments that suggest an image even without an extension
const IMAGE_PATH_HINTS: &[&str] = &["images", "media", "photo", "img"];

/// Attributes of `<img>` that may hold the image source (lazy loaders use data-*)
const IMAGE_ATTRIBUTES: &[&str] = &["src", "data-src", "data-lazy"];

static IMAGES: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("img selector"));
static STYLED: Lazy<Selector> = Lazy::new(|| Selector::parse("[style]").expect("style selector"));
static VIDEO_SOURCES: Lazy<Selector> =
    Lazy::new(|| Selector::parse("video[src], source[src]").expect("video selector"));
static IFRAMES: Lazy<Selector> = Lazy::new(|| Selector::parse("iframe[src]").expect("iframe selector"));
static ANCHORS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("anchor selector"));

static BACKGROUND_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)background(?:-image)?\s*:[^;]*?url\(\s*['"]?([^'")]+?)['"]?\s*\)"#)
        .expect("background url pattern")
});

/// Extracts image URLs
///
/// Candidates come from `src`, `data-src` and `data-lazy` on `<img>` and from
/// inline `background-image: url(...)` styles. Data URIs and tracking pixels
/// (a file name containing `1x1` or `pixel`) are skipped. A resolved URL is kept when it has an image
/// extension or its path mentions images, media, photo or img.
pub fn extract_images(document: &Html, base_url: &Url) -> Vec<String> {
    let mut candidates = Vec::new();

    for element in document.select(&IMAGES) {
        for attr in IMAGE_ATTRIBUTES {
            if let Some(value) = element.value().attr(attr) {
                candidates.push(value);
            }
        }
    }

    for element in document.select(&STYLED) {
        if let Some(style) = element.value().attr("style") {
            for captures in BACKGROUND_URL.captures_iter(style) {
                if let Some(found) = captures.get(1) {
                    candidates.push(found.as_str());
                }
            }
        }
    }

    let mut images = UniqueList::new();
    for candidate in candidates {
        let lower = candidate.trim().to_lowercase();
        if lower.is_empty() || lower.starts_with("data:") {
            continue;
        }

        let Some(url) = resolve_candidate(base_url, candidate) else {
            continue;
        };

        if is_tracking_pixel(&url) {
            tracing::debug!("Skipping tracking pixel: {}", url);
            continue;
        }

        if is_image_url(&url) {
            images.insert(url.to_string());
        }
    }

    images.into_vec()
}

fn is_tracking_pixel(url: &Url) -> bool {
    file_name(url).is_some_and(|name| {
        let name = name.to_lowercase();
        name.contains("1x1") || name.contains("pixel")
    })
}

fn is_image_url(url: &Url) -> bool {
    if path_extension(url).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str())) {
        return true;
    }

    let path = url.path().to_lowercase();
    IMAGE_PATH_HINTS.iter().any(|hint| path.contains(hint))
}

/// Extracts video URLs
///
/// Candidates come from `<video>`/`<source>` sources, iframes embedding a
/// known video host, and anchors pointing at a video file. A resolved URL is
/// kept when it has a video extension or lives on a video host.
pub fn extract_videos(document: &Html, base_url: &Url) -> Vec<String> {
    let mut videos = UniqueList::new();

    for element in document.select(&VIDEO_SOURCES) {
        if let Some(url) = element
            .value()
            .attr("src")
            .and_then(|src| resolve_candidate(base_url, src))
        {
            if is_video_url(&url) {
                videos.insert(url.to_string());
            }
        }
    }

    for element in document.select(&IFRAMES) {
        if let Some(url) = element
            .value()
            .attr("src")
            .and_then(|src| resolve_candidate(base_url, src))
        {
            if is_video_host(&url) {
                videos.insert(url.to_string());
            }
        }
    }

    for element in document.select(&ANCHORS) {
        if let Some(url) = element
            .value()
            .attr("href")
            .and_then(|href| resolve_candidate(base_url, href))
        {
            if has_video_extension(&url) {
                videos.insert(url.to_string());
            }
        }
    }

    videos.into_vec()
}

fn has_video_extension(url: &Url) -> bool {
    path_extension(url).is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
}

fn is_video_host(url: &Url) -> bool {
    VIDEO_HOSTS.iter().any(|host| host_matches(url, host))
}

fn is_video_url(url: &Url) -> bool {
    has_video_extension(url) || is_video_host(url)
}

/// Extracts document URLs
///
/// Any anchor whose lowercase href mentions a document extension
/// (`.pdf`, `.docx`, `.xlsx`, ...) is resolved and kept.
pub fn extract_documents(document: &Html, base_url: &Url) -> Vec<String> {
    let mut documents = UniqueList::new();

    for element in document.select(&ANCHORS) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let lower = href.to_lowercase();
        let is_document = DOCUMENT_EXTENSIONS
            .iter()
            .any(|ext| lower.contains(&format!(".{}", ext)));
        if !is_document {
            continue;
        }

        if let Some(url) = resolve_candidate(base_url, href) {
            documents.insert(url.to_string());
        }
    }

    documents.into_vec()
}

fn resolve_candidate(base_url: &Url, candidate: &str) -> Option<Url> {
    match resolve_url(base_url, candidate) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!("Skipping unresolvable candidate {}: {}", candidate, e);
            None
        }
    }
}
