use crate::config::types::{
    Config, ExtractorConfig, ScopeConfig, SegmenterConfig, StorageConfig, WorkerConfig,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

const MAX_WORKERS: usize = 64;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_storage_config(&config.storage)?;
    validate_scope_config(&config.scope)?;
    validate_extractor_config(&config.extractor)?;
    validate_segmenter_config(&config.segmenter)?;
    validate_worker_config(&config.workers)?;
    Ok(())
}

/// Validates storage configuration
///
/// Existence of the root is checked when the store is opened, not here, so a
/// config can be validated before the corpus directory is created.
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.root.trim().is_empty() {
        return Err(ConfigError::Validation(
            "storage root cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates scope configuration
fn validate_scope_config(config: &ScopeConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.site_prefix).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "Invalid site-prefix '{}': {}",
            config.site_prefix, e
        ))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "site-prefix '{}' must use http or https",
            config.site_prefix
        )));
    }

    for ext in &config.denied_extensions {
        validate_extension(ext)?;
    }

    Ok(())
}

fn validate_extension(ext: &str) -> Result<(), ConfigError> {
    if ext.is_empty() {
        return Err(ConfigError::Validation(
            "denied extension cannot be empty".to_string(),
        ));
    }

    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::Validation(format!(
            "denied extension '{}' must be ASCII alphanumeric without a leading dot",
            ext
        )));
    }

    Ok(())
}

/// Validates extractor configuration
fn validate_extractor_config(config: &ExtractorConfig) -> Result<(), ConfigError> {
    validate_selector(&config.tag_selector)?;
    validate_selector(&config.content_selector)?;
    Ok(())
}

fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    if selector.trim().is_empty() {
        return Err(ConfigError::InvalidSelector(
            "selector cannot be empty".to_string(),
        ));
    }

    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {}", selector, e)))
}

/// Validates segmenter configuration
fn validate_segmenter_config(config: &SegmenterConfig) -> Result<(), ConfigError> {
    if config.min_length < 1 {
        return Err(ConfigError::Validation(format!(
            "min-length must be >= 1, got {}",
            config.min_length
        )));
    }
    Ok(())
}

/// Validates worker configuration
fn validate_worker_config(config: &WorkerConfig) -> Result<(), ConfigError> {
    if config.count < 1 || config.count > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "workers.count must be between 1 and {}, got {}",
            MAX_WORKERS, config.count
        )));
    }
    Ok(())
}
