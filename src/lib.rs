//! Tagged-Corpus: a categorized sentence corpus builder
//!
//! This crate turns already-fetched HTML pages into a corpus of sentence files,
//! one directory per topic tag, with durable and resumable per-category numbering.

pub mod config;
pub mod crawler;
pub mod output;
pub mod storage;
pub mod text;
pub mod url;

use thiserror::Error;

/// Main error type for Tagged-Corpus operations
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Invalid page {path}: {message}")]
    Page { path: String, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Tagged-Corpus operations
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{CrawlVisitor, FetchedPage, PageHandler};
pub use crate::storage::{CategoryStore, LazyStore, SentenceSink};
pub use crate::text::SentenceSegmenter;
pub use crate::url::ScopeFilter;
