use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const BYTES_PER_MB: u64 = 1024 * 1024;

fn extensions(list: &[&str]) -> Vec<String> {
    list.iter().map(|ext| ext.to_string()).collect()
}

/// Options for one media download batch
///
/// Loaded from the `[download]` section of the configuration file or built
/// in code; every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MediaDownloadOptions {
    /// Directory the files are written to (created if missing)
    pub destination: PathBuf,

    /// Largest accepted file, in megabytes
    #[serde(rename = "max-file-size-mb")]
    pub max_file_size_mb: u64,

    /// Image extensions allowed, lowercase without the dot
    #[serde(rename = "allowed-image-types")]
    pub allowed_image_types: Vec<String>,

    /// Video extensions allowed
    #[serde(rename = "allowed-video-types")]
    pub allowed_video_types: Vec<String>,

    /// Document extensions allowed
    #[serde(rename = "allowed-document-types")]
    pub allowed_document_types: Vec<String>,

    /// Maximum number of downloads in flight at once
    #[serde(rename = "max-concurrent-downloads")]
    pub max_concurrent_downloads: usize,

    /// Timeout for the size-check HEAD request (milliseconds)
    #[serde(rename = "head-timeout-ms")]
    pub head_timeout_ms: u64,

    /// Timeout for the whole body download (milliseconds)
    #[serde(rename = "download-timeout-ms")]
    pub download_timeout_ms: u64,
}

impl Default for MediaDownloadOptions {
    fn default() -> Self {
        Self {
            destination: PathBuf::from("./downloads"),
            max_file_size_mb: 50,
            allowed_image_types: extensions(&["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp"]),
            allowed_video_types: extensions(&["mp4", "webm", "ogg", "mov", "avi", "mkv"]),
            allowed_document_types: extensions(&[
                "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "rtf",
            ]),
            max_concurrent_downloads: 5,
            head_timeout_ms: 10_000,
            download_timeout_ms: 30_000,
        }
    }
}

impl MediaDownloadOptions {
    /// Returns true if the extension appears in any allowed list (case-insensitive)
    pub fn is_allowed_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.');
        self.allowed_image_types
            .iter()
            .chain(&self.allowed_video_types)
            .chain(&self.allowed_document_types)
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }

    /// Maximum file size in bytes
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(BYTES_PER_MB)
    }

    pub fn head_timeout(&self) -> Duration {
        Duration::from_millis(self.head_timeout_ms)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_millis(self.download_timeout_ms)
    }
}

/// Converts a byte count to megabytes
pub(crate) fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB as f64
}
