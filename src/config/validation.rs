use crate::config::types::{Config, FetcherConfig};
use crate::download::MediaDownloadOptions;
use crate::{ConfigError, ConfigResult};

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_fetcher_config(&config.fetcher)?;
    validate_download_options(&config.download)?;
    Ok(())
}

/// Validates page fetch configuration
fn validate_fetcher_config(config: &FetcherConfig) -> ConfigResult<()> {
    if config.timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "timeout-ms must be >= 100ms, got {}ms",
            config.timeout_ms
        )));
    }

    if config.max_redirects > 20 {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be <= 20, got {}",
            config.max_redirects
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates media download options
pub(crate) fn validate_download_options(
    options: &MediaDownloadOptions,
) -> ConfigResult<()> {
    if options.destination.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "destination cannot be empty".to_string(),
        ));
    }

    if options.max_file_size_mb < 1 {
        return Err(ConfigError::Validation(format!(
            "max-file-size-mb must be >= 1, got {}",
            options.max_file_size_mb
        )));
    }

    if options.max_concurrent_downloads < 1 || options.max_concurrent_downloads > 50 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-downloads must be between 1 and 50, got {}",
            options.max_concurrent_downloads
        )));
    }

    if options.head_timeout_ms < 100 || options.download_timeout_ms < 100 {
        return Err(ConfigError::Validation(
            "download timeouts must be >= 100ms".to_string(),
        ));
    }

    let all_types = options
        .allowed_image_types
        .iter()
        .chain(&options.allowed_video_types)
        .chain(&options.allowed_document_types);

    let mut any = false;
    for ext in all_types {
        any = true;
        if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Validation(format!(
                "allowed extension '{}' must be alphanumeric without a leading dot",
                ext
            )));
        }
    }

    if !any {
        return Err(ConfigError::Validation(
            "at least one allowed media type must be configured".to_string(),
        ));
    }

    Ok(())
}
