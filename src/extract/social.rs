//! Social profile link extraction

use crate::url::{host_matches, resolve_url};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use url::Url;

/// A social platform and the domains its profile links live on
#[derive(Debug, Clone, Copy)]
pub struct SocialPlatform {
    /// Key used in the result map
    pub name: &'static str,
    /// Domain aliases, matched against the link host and its parents
    pub domains: &'static [&'static str],
}

/// Known platforms, in the order they are checked for each link
pub const SOCIAL_PLATFORMS: &[SocialPlatform] = &[
    SocialPlatform {
        name: "linkedin",
        domains: &["linkedin.com", "lnkd.in"],
    },
    SocialPlatform {
        name: "twitter",
        domains: &["twitter.com", "x.com"],
    },
    SocialPlatform {
        name: "facebook",
        domains: &["facebook.com", "fb.com", "fb.me"],
    },
    SocialPlatform {
        name: "instagram",
        domains: &["instagram.com", "instagr.am"],
    },
    SocialPlatform {
        name: "github",
        domains: &["github.com"],
    },
    SocialPlatform {
        name: "youtube",
        domains: &["youtube.com", "youtu.be"],
    },
    SocialPlatform {
        name: "tiktok",
        domains: &["tiktok.com"],
    },
    SocialPlatform {
        name: "pinterest",
        domains: &["pinterest.com", "pin.it"],
    },
    SocialPlatform {
        name: "snapchat",
        domains: &["snapchat.com"],
    },
];

/// Path and query words marking a share or follow action rather than a profile
const SHARE_TOKENS: &[&str] = &[
    "share", "sharer", "widget", "widgets", "button", "follow", "like",
];

static ANCHORS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("anchor selector"));

/// Returns true if the link looks like a share/follow action
///
/// The link is split into words on `/ ? & = . # :` and only whole words
/// count, so a handle such as `acmewidgets` is still a profile.
pub fn is_share_link(href: &str) -> bool {
    let href = href.to_lowercase();
    let tokens: Vec<&str> = href
        .split(|c| matches!(c, '/' | '?' | '&' | '=' | '.' | '#' | ':'))
        .filter(|token| !token.is_empty())
        .collect();

    tokens.iter().any(|token| SHARE_TOKENS.contains(token))
        || tokens
            .windows(2)
            .any(|pair| pair[0] == "intent" && pair[1] == "tweet")
}

/// Extracts at most one profile link per known platform
///
/// Anchors are visited in document order. The first link whose host matches
/// a platform that has no entry yet is recorded, unless it is a share action
/// (`twitter.com/share`, `facebook.com/sharer.php`, ...). Links are stored as
/// absolute URLs.
pub fn extract_social_links(document: &Html, base_url: &Url) -> BTreeMap<String, String> {
    let mut links = BTreeMap::new();

    for element in document.select(&ANCHORS) {
        if links.len() == SOCIAL_PLATFORMS.len() {
            break;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let url = match resolve_url(base_url, href) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping unresolvable link {}: {}", href, e);
                continue;
            }
        };

        let Some(platform) = SOCIAL_PLATFORMS
            .iter()
            .find(|platform| platform.domains.iter().any(|d| host_matches(&url, d)))
        else {
            continue;
        };

        if links.contains_key(platform.name) {
            continue;
        }

        if is_share_link(url.as_str()) {
            tracing::debug!("Skipping {} share link: {}", platform.name, url);
            continue;
        }

        links.insert(platform.name.to_string(), url.to_string());
    }

    links
}
