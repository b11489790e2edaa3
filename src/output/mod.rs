//! Output module for rendering scrape results and download reports
//!
//! This module handles:
//! - Rendering results as camelCase JSON
//! - Summarizing a download batch and printing the report

mod summary;

pub use summary::{print_download_summary, DownloadSummary};

use serde::Serialize;

/// Renders a value as JSON
///
/// # Arguments
///
/// * `value` - Anything serializable, usually a `ScrapedData` or a list of `DownloadResult`
/// * `pretty` - Indent the output instead of emitting a single line
///
/// # Returns
///
/// * `Ok(String)` - The rendered JSON
/// * `Err(HarvestError)` - Serialization failed
pub fn render_json<T: Serialize + ?Sized>(
    value: &T,
    pretty: bool,
) -> crate::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
