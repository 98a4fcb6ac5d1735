//! Filesystem-backed category store
//!
//! Layout under the storage root:
//!
//! ```text
//! <root>/<category>/file_<index>.txt
//! ```
//!
//! Each category has a registry slot holding its file count behind its own
//! mutex. Saving to a category holds that mutex across the whole
//! read-count/write-file/advance-count sequence, so indices are never reused or
//! skipped by concurrent writers. Different categories never contend.

use crate::storage::category::{is_hidden, is_valid_category, normalize_category};
use crate::storage::traits::{SaveReport, SentenceSink, StorageError, StorageResult};
use crate::text::SentenceSegmenter;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const FILE_PREFIX: &str = "file_";
pub const FILE_SUFFIX: &str = ".txt";

/// Cached number of sentence files in a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCount {
    /// Not scanned yet
    Unknown,
    /// Scanned or maintained by writes
    Known(u64),
}

type Slot = Arc<Mutex<FileCount>>;

/// Returns the file name for a sentence index, e.g. `file_3.txt`
pub fn sentence_file_name(index: u64) -> String {
    format!("{}{}{}", FILE_PREFIX, index, FILE_SUFFIX)
}

/// Category registry and sentence writer over one storage root
pub struct CategoryStore {
    root: PathBuf,
    segmenter: SentenceSegmenter,
    categories: RwLock<HashMap<String, Slot>>,
}

impl std::fmt::Debug for CategoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryStore")
            .field("root", &self.root)
            .field("categories", &self.categories.read().len())
            .finish()
    }
}

impl CategoryStore {
    /// Opens a store with the default sentence segmenter
    ///
    /// # Errors
    ///
    /// Fails if the root is missing, is not a directory, or cannot be listed.
    pub fn open(root: impl AsRef<Path>) -> StorageResult<Self> {
        Self::with_segmenter(root, SentenceSegmenter::default())
    }

    /// Opens a store and registers every non-hidden subdirectory as a category
    ///
    /// Counts start as [`FileCount::Unknown`] and are resolved on first use.
    pub fn with_segmenter(
        root: impl AsRef<Path>,
        segmenter: SentenceSegmenter,
    ) -> StorageResult<Self> {
        let root = root.as_ref().to_path_buf();

        let metadata = fs::metadata(&root).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                StorageError::RootMissing(root.clone())
            } else {
                StorageError::RootUnreadable {
                    path: root.clone(),
                    source,
                }
            }
        })?;
        if !metadata.is_dir() {
            return Err(StorageError::RootNotDirectory(root));
        }

        let unreadable = |source| StorageError::RootUnreadable {
            path: root.clone(),
            source,
        };

        let mut categories = HashMap::new();
        for entry in fs::read_dir(&root).map_err(unreadable)? {
            let entry = entry.map_err(unreadable)?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::warn!("Ignoring non UTF-8 directory {:?}", raw);
                    continue;
                }
            };
            if is_hidden(&name) {
                continue;
            }
            categories.insert(name, Arc::new(Mutex::new(FileCount::Unknown)));
        }

        tracing::info!(
            "Opened category store at {} with {} categories",
            root.display(),
            categories.len()
        );

        Ok(Self {
            root,
            segmenter,
            categories: RwLock::new(categories),
        })
    }

    /// Returns the storage root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the directory for a category
    pub fn category_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Returns all known category names, sorted
    pub fn categories(&self) -> Vec<String> {
        let mut names: Vec<String> = self.categories.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns true if the category is registered
    pub fn category_exists(&self, name: &str) -> bool {
        self.categories.read().contains_key(name)
    }

    /// Creates the category directory if needed and registers the category
    ///
    /// Returns `false` (and logs) if the name is invalid or the directory cannot
    /// be created. An existing directory counts as success.
    pub fn ensure_category(&self, name: &str) -> bool {
        match self.create_category(name) {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("{}", e);
                false
            }
        }
    }

    /// Returns the number of sentence files in a category
    ///
    /// The first call for a registered category scans its directory; later
    /// calls use the cached count, including a cached zero. Unregistered names
    /// are scanned without caching. Invalid names and scan failures report zero.
    pub fn file_count(&self, name: &str) -> u64 {
        if !is_valid_category(name) {
            tracing::debug!("Not counting files for invalid category {:?}", name);
            return 0;
        }

        let slot = self.categories.read().get(name).cloned();
        let result = match slot {
            Some(slot) => {
                let mut count = slot.lock();
                self.resolve_count(name, &mut count)
            }
            None => self.scan_count(name),
        };

        result.unwrap_or_else(|e| {
            tracing::warn!("{}", e);
            0
        })
    }

    /// Returns the cached count without touching the disk
    pub fn cached_count(&self, name: &str) -> Option<FileCount> {
        self.categories.read().get(name).map(|slot| *slot.lock())
    }

    /// Segments `content` and writes each qualifying sentence to `tag`
    ///
    /// The tag is normalized first and the category is created if missing.
    /// Sentences are written under the category lock with consecutive indices.
    /// A sentence that fails to write is logged and skipped without consuming
    /// an index; the rest of the page is still attempted. Indices already
    /// occupied on disk are stepped over, never overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is invalid, the category directory cannot be
    /// created, or its existing files cannot be counted. Nothing is written then.
    pub fn save(&self, content: &str, tag: &str) -> StorageResult<SaveReport> {
        let category =
            normalize_category(tag).ok_or_else(|| StorageError::InvalidCategory(tag.to_string()))?;

        let existing = self.categories.read().get(&category).cloned();
        let slot = match existing {
            Some(slot) => slot,
            None => self.create_category(&category)?,
        };

        let mut count = slot.lock();
        let mut next = self.resolve_count(&category, &mut count)?;
        let dir = self.category_path(&category);
        let mut report = SaveReport::new(category.clone(), next);

        for sentence in self.segmenter.segment(content) {
            match write_sentence(&dir, &mut next, sentence.text) {
                Ok(index) => {
                    tracing::debug!("{}/{}: {}", category, sentence_file_name(index), sentence.text);
                    report.first_index.get_or_insert(index);
                    report.written += 1;
                }
                Err(e) => {
                    tracing::warn!("Skipping sentence in '{}': {}", category, e);
                    report.failed += 1;
                }
            }
            *count = FileCount::Known(next);
        }

        report.next_index = next;
        Ok(report)
    }

    fn create_category(&self, name: &str) -> StorageResult<Slot> {
        if !is_valid_category(name) {
            return Err(StorageError::InvalidCategory(name.to_string()));
        }

        let path = self.category_path(name);
        match fs::create_dir(&path) {
            Ok(()) => tracing::info!("Created category '{}'", name),
            Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => {}
            Err(source) => {
                return Err(StorageError::CategoryCreate {
                    name: name.to_string(),
                    source,
                })
            }
        }

        let slot = self
            .categories
            .write()
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(FileCount::Unknown)))
            .clone();
        Ok(slot)
    }

    fn resolve_count(&self, name: &str, count: &mut FileCount) -> StorageResult<u64> {
        match *count {
            FileCount::Known(n) => Ok(n),
            FileCount::Unknown => {
                let n = self.scan_count(name)?;
                tracing::debug!("Category '{}' holds {} files", name, n);
                *count = FileCount::Known(n);
                Ok(n)
            }
        }
    }

    /// Counts regular, non-hidden files with the sentence suffix
    fn scan_count(&self, name: &str) -> StorageResult<u64> {
        let scan_error = |source| StorageError::CategoryScan {
            name: name.to_string(),
            source,
        };

        let mut total = 0;
        for entry in fs::read_dir(self.category_path(name)).map_err(scan_error)? {
            let entry = entry.map_err(scan_error)?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if is_hidden(&file_name) || !file_name.ends_with(FILE_SUFFIX) {
                continue;
            }
            if entry.path().is_file() {
                total += 1;
            }
        }
        Ok(total)
    }
}

impl SentenceSink for CategoryStore {
    fn save(&self, content: &str, tag: &str) -> StorageResult<SaveReport> {
        CategoryStore::save(self, content, tag)
    }
}

/// Writes one sentence at the next free index and advances `next` past it
fn write_sentence(dir: &Path, next: &mut u64, text: &str) -> StorageResult<u64> {
    loop {
        let index = *next;
        let path = dir.join(sentence_file_name(index));

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                if let Err(source) = file.write_all(text.as_bytes()) {
                    drop(file);
                    if let Err(e) = fs::remove_file(&path) {
                        tracing::warn!("Failed to remove partial file {}: {}", path.display(), e);
                    }
                    return Err(StorageError::Write { path, source });
                }
                *next = index + 1;
                return Ok(index);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::warn!("{} already exists, skipping index", path.display());
                *next = index + 1;
            }
            Err(source) => return Err(StorageError::Write { path, source }),
        }
    }
}
