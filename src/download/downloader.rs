//! Bounded-concurrency media downloader
//!
//! Each URL goes through the same steps:
//! 1. Extension check against the allowed lists (no network call)
//! 2. HEAD request for content length and type
//! 3. Size check against the configured limit
//! 4. Safe file name derivation
//! 5. Skip if the file already exists
//! 6. Stream the body to a temporary file in the destination and move it
//!    into place only once complete
//!
//! Every failure is captured in that URL's result and never affects its
//! siblings.

use super::naming::derive_file_name;
use super::options::MediaDownloadOptions;
use super::result::{DownloadResult, FILE_TYPE_NOT_ALLOWED};
use crate::config::FetcherConfig;
use crate::extract::ScrapedData;
use crate::harvester::classify_error;
use crate::url::path_extension;
use crate::HarvestError;
use futures::future::join_all;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{redirect::Policy, Client, Response, StatusCode};
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Semaphore;
use url::Url;

/// Builds the HTTP client used for media downloads
///
/// The user agent and redirect cap come from the page fetch configuration,
/// and its timeout bounds connection setup. Request timeouts are applied per
/// request from [`MediaDownloadOptions`].
pub fn build_download_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(&config.user_agent)
        .connect_timeout(Duration::from_millis(config.timeout_ms))
        .redirect(Policy::limited(config.max_redirects))
        .build()
}

/// Downloads every media URL of a scrape result
///
/// URLs are taken from images, then videos, then documents. Duplicates
/// across fields are attempted independently. The returned vector has one
/// entry per URL, in the same order.
///
/// # Example
///
/// ```no_run
/// use page_harvest::{download_media, MediaDownloadOptions, ScrapedData};
///
/// # async fn example(data: ScrapedData) {
/// let results = download_media(&data, &MediaDownloadOptions::default()).await;
/// for result in results.iter().filter(|r| !r.success) {
///     eprintln!("{}: {:?}", result.url, result.error);
/// }
/// # }
/// ```
pub async fn download_media(
    data: &ScrapedData,
    options: &MediaDownloadOptions,
) -> Vec<DownloadResult> {
    download_media_with_config(data, options, &FetcherConfig::default()).await
}

/// Same as [`download_media`], with the HTTP client built from `fetcher`
pub async fn download_media_with_config(
    data: &ScrapedData,
    options: &MediaDownloadOptions,
    fetcher: &FetcherConfig,
) -> Vec<DownloadResult> {
    let urls: Vec<String> = data.media_urls().map(str::to_string).collect();

    match build_download_client(fetcher) {
        Ok(client) => download_urls(&client, &urls, options).await,
        Err(e) => {
            tracing::error!("Failed to build download client: {}", e);
            let message = format!("HTTP client error: {}", e);
            urls.iter()
                .map(|url| DownloadResult::failure(url.as_str(), message.as_str()))
                .collect()
        }
    }
}

/// Downloads a list of URLs with a caller-supplied client
///
/// At most `max_concurrent_downloads` downloads are in flight; a new one
/// starts as soon as any slot frees up.
pub async fn download_urls(
    client: &Client,
    urls: &[String],
    options: &MediaDownloadOptions,
) -> Vec<DownloadResult> {
    if urls.is_empty() {
        return Vec::new();
    }

    if let Err(e) = fs::create_dir_all(&options.destination).await {
        tracing::error!(
            "Failed to create destination {}: {}",
            options.destination.display(),
            e
        );
        let message = format!("Failed to create destination directory: {}", e);
        return urls
            .iter()
            .map(|url| DownloadResult::failure(url.as_str(), message.as_str()))
            .collect();
    }

    tracing::info!(
        "Downloading {} media files to {} ({} at a time)",
        urls.len(),
        options.destination.display(),
        options.max_concurrent_downloads
    );

    let semaphore = Semaphore::new(options.max_concurrent_downloads.max(1));
    let semaphore = &semaphore;

    let downloads = urls.iter().map(|url| async move {
        let _permit = semaphore.acquire().await;
        download_one(client, url, options).await
    });

    let results = join_all(downloads).await;

    let succeeded = results.iter().filter(|r| r.success).count();
    tracing::info!(
        "Download batch finished: {} succeeded, {} failed",
        succeeded,
        results.len() - succeeded
    );

    results
}

/// Downloads a single URL, converting any error into a failed result
pub async fn download_one(
    client: &Client,
    url: &str,
    options: &MediaDownloadOptions,
) -> DownloadResult {
    match try_download(client, url, options).await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("Download failed for {}: {}", url, e);
            DownloadResult::failure(url, e.to_string())
        }
    }
}

async fn try_download(
    client: &Client,
    url_str: &str,
    options: &MediaDownloadOptions,
) -> crate::Result<DownloadResult> {
    let url = Url::parse(url_str)?;

    let allowed = path_extension(&url).is_some_and(|ext| options.is_allowed_extension(&ext));
    if !allowed {
        tracing::debug!("Skipping {}: file type not allowed", url);
        return Ok(DownloadResult::failure(url_str, FILE_TYPE_NOT_ALLOWED));
    }

    let probe = probe(client, &url, options).await?;
    let max_bytes = options.max_file_size_bytes();

    if let Some(length) = probe.content_length {
        if length > max_bytes {
            tracing::debug!("Skipping {}: {} bytes exceeds limit", url, length);
            return Ok(DownloadResult::too_large(
                url_str,
                length,
                options.max_file_size_mb,
            ));
        }
    }

    let file_name = derive_file_name(&url, probe.content_type.as_deref());
    let file_path = options.destination.join(&file_name);

    if let Some(existing) = existing_file_size(&file_path).await? {
        tracing::debug!("Skipping {}: {} already exists", url, file_path.display());
        return Ok(DownloadResult::skipped(
            url_str, file_path, existing, file_name,
        ));
    }

    match stream_to_file(client, &url, &file_path, options).await? {
        StreamOutcome::Complete(size) => {
            tracing::debug!("Saved {} ({} bytes)", file_path.display(), size);
            Ok(DownloadResult::downloaded(url_str, file_path, size, file_name))
        }
        StreamOutcome::AlreadyExists => {
            tracing::debug!("{} was completed by another download", file_path.display());
            let size = existing_file_size(&file_path).await?.unwrap_or_default();
            Ok(DownloadResult::skipped(url_str, file_path, size, file_name))
        }
        StreamOutcome::TooLarge(Some(length)) => Ok(DownloadResult::too_large(
            url_str,
            length,
            options.max_file_size_mb,
        )),
        StreamOutcome::TooLarge(None) => Ok(DownloadResult::limit_exceeded(
            url_str,
            options.max_file_size_mb,
        )),
    }
}

/// Headers learned from the HEAD request
#[derive(Debug, Default)]
struct Probe {
    content_length: Option<u64>,
    content_type: Option<String>,
}

/// Sends the HEAD request
///
/// Servers that refuse HEAD (405/501) yield an empty probe; the size limit
/// is then enforced while streaming.
async fn probe(
    client: &Client,
    url: &Url,
    options: &MediaDownloadOptions,
) -> crate::Result<Probe> {
    let response = client
        .head(url.clone())
        .timeout(options.head_timeout())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if status == StatusCode::METHOD_NOT_ALLOWED || status == StatusCode::NOT_IMPLEMENTED {
        tracing::debug!("HEAD not supported for {}, size unknown", url);
        return Ok(Probe::default());
    }

    if !status.is_success() {
        return Err(HarvestError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    // Read the header directly: the body of a HEAD response is always empty
    let headers = response.headers();
    let content_length = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    Ok(Probe {
        content_length,
        content_type,
    })
}

async fn existing_file_size(path: &Path) -> crate::Result<Option<u64>> {
    match fs::metadata(path).await {
        Ok(metadata) => Ok(Some(metadata.len())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug)]
enum StreamOutcome {
    Complete(u64),
    /// Another download published a file under the same name first
    AlreadyExists,
    /// The declared length, or `None` when the body grew past the limit
    TooLarge(Option<u64>),
}

/// Downloads the body into a temporary file next to `file_path`
///
/// The temporary file is moved into place without overwriting only after the
/// whole body was written. On any failure it is deleted when dropped, so a
/// file at `file_path` is always a complete download.
async fn stream_to_file(
    client: &Client,
    url: &Url,
    file_path: &Path,
    options: &MediaDownloadOptions,
) -> crate::Result<StreamOutcome> {
    let max_bytes = options.max_file_size_bytes();

    let mut response = client
        .get(url.clone())
        .timeout(options.download_timeout())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    if let Some(length) = response.content_length() {
        if length > max_bytes {
            return Ok(StreamOutcome::TooLarge(Some(length)));
        }
    }

    let partial = tempfile::Builder::new()
        .prefix(".partial-")
        .tempfile_in(&options.destination)?;
    let mut file = fs::File::from_std(partial.as_file().try_clone()?);

    let written = write_body(&mut response, &mut file, url, max_bytes).await;
    drop(file);

    let Some(size) = written? else {
        tracing::debug!("Aborted {}: body exceeded {} bytes", url, max_bytes);
        return Ok(StreamOutcome::TooLarge(None));
    };

    match partial.persist_noclobber(file_path) {
        Ok(_) => Ok(StreamOutcome::Complete(size)),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(StreamOutcome::AlreadyExists),
        Err(e) => Err(e.error.into()),
    }
}

/// Copies the body into `file`, returning `None` once it passes `max_bytes`
async fn write_body(
    response: &mut Response,
    file: &mut fs::File,
    url: &Url,
    max_bytes: u64,
) -> crate::Result<Option<u64>> {
    let mut written: u64 = 0;

    while let Some(chunk) = response.chunk().await.map_err(|e| classify_error(url, e))? {
        written += chunk.len() as u64;
        if written > max_bytes {
            return Ok(None);
        }
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(Some(written))
}
