use super::options::bytes_to_mb;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Error text for a URL whose extension is not in any allowed list
pub const FILE_TYPE_NOT_ALLOWED: &str = "File type not allowed";

/// Error text attached to a successful result when the file was already on disk
pub const FILE_ALREADY_EXISTS: &str = "File already exists (skipped)";

/// Outcome of one media download attempt
///
/// Exactly one result is produced per input URL. A skipped download counts
/// as a success and carries [`FILE_ALREADY_EXISTS`] in `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResult {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl DownloadResult {
    /// A failed attempt with a human-readable reason
    pub fn failure(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            file_path: None,
            success: false,
            error: Some(error.into()),
            file_size: None,
            file_name: None,
        }
    }

    /// A file rejected for exceeding the size limit
    pub fn too_large(url: impl Into<String>, file_size: u64, max_file_size_mb: u64) -> Self {
        Self {
            file_size: Some(file_size),
            ..Self::failure(
                url,
                format!(
                    "File too large: {:.2}MB (max {}MB)",
                    bytes_to_mb(file_size),
                    max_file_size_mb
                ),
            )
        }
    }

    /// A body cut off while streaming because it passed the size limit
    pub fn limit_exceeded(url: impl Into<String>, max_file_size_mb: u64) -> Self {
        Self::failure(
            url,
            format!("File too large: exceeds {}MB limit", max_file_size_mb),
        )
    }

    /// A file that was already present at the destination
    pub fn skipped(
        url: impl Into<String>,
        file_path: PathBuf,
        file_size: u64,
        file_name: String,
    ) -> Self {
        Self {
            url: url.into(),
            file_path: Some(file_path),
            success: true,
            error: Some(FILE_ALREADY_EXISTS.to_string()),
            file_size: Some(file_size),
            file_name: Some(file_name),
        }
    }

    /// A file written to disk
    pub fn downloaded(
        url: impl Into<String>,
        file_path: PathBuf,
        file_size: u64,
        file_name: String,
    ) -> Self {
        Self {
            url: url.into(),
            file_path: Some(file_path),
            success: true,
            error: None,
            file_size: Some(file_size),
            file_name: Some(file_name),
        }
    }

    /// Returns true if the file existed and was not downloaded again
    pub fn is_skipped(&self) -> bool {
        self.success && self.error.as_deref() == Some(FILE_ALREADY_EXISTS)
    }
}
