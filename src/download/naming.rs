//! Filesystem-safe naming of downloaded files

use crate::url::file_name;
use chrono::Utc;
use percent_encoding::percent_decode_str;
use url::Url;

/// Longest file name written to disk, extension included
pub const MAX_FILE_NAME_LEN: usize = 100;

/// Extension used when the content type is unknown
const FALLBACK_EXTENSION: &str = ".bin";

/// Content type to extension table
const CONTENT_TYPE_EXTENSIONS: &[(&str, &str)] = &[
    ("image/jpeg", ".jpg"),
    ("image/jpg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/webp", ".webp"),
    ("image/svg+xml", ".svg"),
    ("image/bmp", ".bmp"),
    ("video/mp4", ".mp4"),
    ("video/webm", ".webm"),
    ("video/ogg", ".ogg"),
    ("video/quicktime", ".mov"),
    ("video/x-msvideo", ".avi"),
    ("video/x-matroska", ".mkv"),
    ("application/pdf", ".pdf"),
    ("application/msword", ".doc"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ".docx",
    ),
    ("application/vnd.ms-excel", ".xls"),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ".xlsx",
    ),
    ("application/vnd.ms-powerpoint", ".ppt"),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        ".pptx",
    ),
    ("text/plain", ".txt"),
    ("application/rtf", ".rtf"),
    ("text/rtf", ".rtf"),
];

/// Looks up the extension (with dot) for a Content-Type header value
///
/// Parameters such as `; charset=utf-8` are ignored. Unknown or missing
/// types map to `.bin`.
pub fn extension_for_content_type(content_type: Option<&str>) -> &'static str {
    let Some(content_type) = content_type else {
        return FALLBACK_EXTENSION;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    CONTENT_TYPE_EXTENSIONS
        .iter()
        .find(|(known, _)| *known == mime)
        .map_or(FALLBACK_EXTENSION, |(_, ext)| *ext)
}

/// Replaces characters outside `[A-Za-z0-9._-]` and caps the length
///
/// When the name is too long the stem is truncated and the extension kept.
///
/// # Examples
///
/// ```
/// use page_harvest::download::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("my photo (1).jpg"), "my_photo__1_.jpg");
/// ```
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.len() <= MAX_FILE_NAME_LEN {
        return cleaned;
    }

    // Only ASCII remains, so byte slicing is safe
    match cleaned.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && ext.len() + 1 < MAX_FILE_NAME_LEN => {
            let keep = MAX_FILE_NAME_LEN - ext.len() - 1;
            format!("{}.{}", &stem[..keep.min(stem.len())], ext)
        }
        _ => cleaned[..MAX_FILE_NAME_LEN].to_string(),
    }
}

fn has_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
}

/// Derives the on-disk file name for a media URL
///
/// Uses the percent-decoded last path segment when it has an extension,
/// otherwise `media_<unix millis><ext>` with the extension taken from the
/// content type.
pub fn derive_file_name(url: &Url, content_type: Option<&str>) -> String {
    let decoded = file_name(url).map(|name| percent_decode_str(name).decode_utf8_lossy());
    let raw = match decoded {
        Some(name) if has_extension(&name) => name.into_owned(),
        _ => format!(
            "media_{}{}",
            Utc::now().timestamp_millis(),
            extension_for_content_type(content_type)
        ),
    };

    sanitize_file_name(&raw)
}
