//! Media download module
//!
//! Takes the media URLs of a [`ScrapedData`](crate::ScrapedData) and saves
//! the allowed ones to a local directory, with a bounded number of
//! downloads in flight.

mod downloader;
mod naming;
mod options;
mod result;

pub use downloader::{
    build_download_client, download_media, download_media_with_config, download_one, download_urls,
};
pub use naming::{
    derive_file_name, extension_for_content_type, sanitize_file_name, MAX_FILE_NAME_LEN,
};
pub use options::MediaDownloadOptions;
pub use result::{DownloadResult, FILE_ALREADY_EXISTS, FILE_TYPE_NOT_ALLOWED};
