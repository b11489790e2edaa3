//! Download batch statistics

use crate::download::DownloadResult;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Totals for one download batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Number of URLs attempted
    pub attempted: usize,

    /// Files written during this batch
    pub downloaded: usize,

    /// Files already present at the destination
    pub skipped: usize,

    /// Attempts that produced no file
    pub failed: usize,

    /// Bytes written during this batch (skipped files excluded)
    pub total_bytes: u64,

    /// Failure reasons and how often each occurred
    pub failure_reasons: Vec<(String, usize)>,
}

impl DownloadSummary {
    /// Tallies a batch of results
    pub fn from_results(results: &[DownloadResult]) -> Self {
        let mut summary = Self {
            attempted: results.len(),
            ..Self::default()
        };

        for result in results {
            if result.is_skipped() {
                summary.skipped += 1;
            } else if result.success {
                summary.downloaded += 1;
                summary.total_bytes += result.file_size.unwrap_or(0);
            } else {
                summary.failed += 1;
                let reason = result
                    .error
                    .as_deref()
                    .map(failure_category)
                    .unwrap_or("Unknown error");
                match summary
                    .failure_reasons
                    .iter_mut()
                    .find(|(r, _)| r == reason)
                {
                    Some((_, count)) => *count += 1,
                    None => summary.failure_reasons.push((reason.to_string(), 1)),
                }
            }
        }

        summary
            .failure_reasons
            .sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        summary
    }
}

/// Collapses per-file error text into a reportable category
fn failure_category(error: &str) -> &str {
    if error.starts_with("File too large") {
        "File too large"
    } else {
        error.split(" for ").next().unwrap_or(error)
    }
}

/// Prints a download summary to stdout
///
/// # Arguments
///
/// * `summary` - The batch totals to display
pub fn print_download_summary(summary: &DownloadSummary) {
    println!("=== Download Summary ===\n");

    println!("Overview:");
    println!("  Attempted: {}", summary.attempted);
    println!("  Downloaded: {}", summary.downloaded);
    println!("  Skipped (already present): {}", summary.skipped);
    println!("  Failed: {}", summary.failed);
    println!(
        "  Data written: {:.2} MB",
        summary.total_bytes as f64 / BYTES_PER_MB
    );
    println!();

    if !summary.failure_reasons.is_empty() {
        println!("Failures:");
        for (reason, count) in &summary.failure_reasons {
            println!("  {}: {}", reason, count);
        }
        println!();
    }

    let saved = summary.downloaded + summary.skipped;
    let success_rate = if summary.attempted > 0 {
        (saved as f64 / summary.attempted as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Success Rate: {:.1}% ({} / {} files available locally)",
        success_rate, saved, summary.attempted
    );
}
