//! Storage traits and error types
//!
//! This module defines the sink interface the page handler writes through and
//! the error type shared by the storage layer.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage root does not exist: {}", .0.display())]
    RootMissing(PathBuf),

    #[error("Storage root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("Failed to read storage root {}: {source}", .path.display())]
    RootUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid category name: {0:?}")]
    InvalidCategory(String),

    #[error("Failed to create category '{name}': {source}")]
    CategoryCreate {
        name: String,
        source: std::io::Error,
    },

    #[error("Failed to scan category '{name}': {source}")]
    CategoryScan {
        name: String,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Category store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Outcome of saving one page's content into a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// Normalized category the sentences went to
    pub category: String,

    /// Number of sentence files written
    pub written: u64,

    /// Number of sentences whose file could not be written
    pub failed: u64,

    /// Index of the first file written, if any
    pub first_index: Option<u64>,

    /// Next free index after this save
    pub next_index: u64,
}

impl SaveReport {
    pub fn new(category: String, next_index: u64) -> Self {
        Self {
            category,
            written: 0,
            failed: 0,
            first_index: None,
            next_index,
        }
    }
}

/// Destination for a page's extracted content
///
/// Implementations must be safe to call from many worker threads at once.
pub trait SentenceSink: Send + Sync {
    /// Segments `content` and persists each qualifying sentence under `tag`
    fn save(&self, content: &str, tag: &str) -> StorageResult<SaveReport>;
}

impl<S: SentenceSink + ?Sized> SentenceSink for Arc<S> {
    fn save(&self, content: &str, tag: &str) -> StorageResult<SaveReport> {
        (**self).save(content, tag)
    }
}
