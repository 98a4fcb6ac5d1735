//! Storage module for persisting the sentence corpus
//!
//! This module owns the on-disk layout, including:
//! - Category discovery from the storage root
//! - Tag normalization into safe directory names
//! - Per-category file counting and index assignment
//! - Init-once store access for worker threads

mod category;
mod lazy;
mod store;
mod traits;

pub use category::{is_hidden, is_valid_category, normalize_category, MAX_CATEGORY_BYTES};
pub use lazy::LazyStore;
pub use store::{sentence_file_name, CategoryStore, FileCount, FILE_PREFIX, FILE_SUFFIX};
pub use traits::{SaveReport, SentenceSink, StorageError, StorageResult};

use crate::config::Config;
use crate::text::SentenceSegmenter;
use crate::CorpusError;

/// Opens the category store described by the configuration
///
/// # Returns
///
/// * `Ok(CategoryStore)` - Store opened and existing categories registered
/// * `Err(CorpusError)` - The storage root is missing or unreadable
pub fn open_store(config: &Config) -> Result<CategoryStore, CorpusError> {
    let segmenter = SentenceSegmenter::new(config.segmenter.min_length);
    Ok(CategoryStore::with_segmenter(&config.storage.root, segmenter)?)
}
