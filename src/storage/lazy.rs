//! Init-once access to a category store
//!
//! [`LazyStore`] defers the startup scan until the first page needs it. All
//! concurrent first callers block on the same initialization and receive the
//! same store. A failed initialization is remembered: every later call fails
//! with the same message until a new `LazyStore` is built.

use crate::storage::store::CategoryStore;
use crate::storage::traits::{SaveReport, SentenceSink, StorageError, StorageResult};
use crate::text::SentenceSegmenter;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

pub struct LazyStore {
    root: PathBuf,
    segmenter: SentenceSegmenter,
    cell: OnceLock<Result<Arc<CategoryStore>, String>>,
}

impl LazyStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_segmenter(root, SentenceSegmenter::default())
    }

    pub fn with_segmenter(root: impl AsRef<Path>, segmenter: SentenceSegmenter) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            segmenter,
            cell: OnceLock::new(),
        }
    }

    /// Returns the store, opening it on first use
    pub fn get(&self) -> StorageResult<Arc<CategoryStore>> {
        self.cell
            .get_or_init(|| {
                CategoryStore::with_segmenter(&self.root, self.segmenter)
                    .map(Arc::new)
                    .map_err(|e| {
                        tracing::error!("Category store initialization failed: {}", e);
                        e.to_string()
                    })
            })
            .clone()
            .map_err(StorageError::Unavailable)
    }

    /// Returns true once initialization has run, successfully or not
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl SentenceSink for LazyStore {
    fn save(&self, content: &str, tag: &str) -> StorageResult<SaveReport> {
        self.get()?.save(content, tag)
    }
}
