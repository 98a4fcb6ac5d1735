//! Worker pool feeding stored pages through the page handler
//!
//! Pages are HTML files on disk. A fixed number of threads pull paths from a
//! shared queue; each worker loads one page and fully processes it before
//! taking the next. All I/O is blocking.

use crate::crawler::handler::{FetchedPage, PageHandler, VisitOutcome};
use crate::crawler::parser::extract_canonical;
use crate::storage::SentenceSink;
use crate::CorpusError;
use parking_lot::Mutex;
use scraper::Html;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Totals for one ingest run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub pages_seen: u64,
    pub pages_saved: u64,
    pub pages_skipped: u64,
    pub pages_failed: u64,
    pub pages_unreadable: u64,
    pub sentences_written: u64,
    pub sentences_failed: u64,
}

impl IngestSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one visited page
    pub fn record(&mut self, outcome: &VisitOutcome) {
        self.pages_seen += 1;
        match outcome {
            VisitOutcome::Saved(report) => {
                self.pages_saved += 1;
                self.sentences_written += report.written;
                self.sentences_failed += report.failed;
            }
            VisitOutcome::Skipped(_) => self.pages_skipped += 1,
            VisitOutcome::Failed(_) => self.pages_failed += 1,
        }
    }

    /// Counts a page file that could not be loaded
    pub fn record_unreadable(&mut self) {
        self.pages_seen += 1;
        self.pages_unreadable += 1;
    }

    pub fn merge(&mut self, other: &IngestSummary) {
        self.pages_seen += other.pages_seen;
        self.pages_saved += other.pages_saved;
        self.pages_skipped += other.pages_skipped;
        self.pages_failed += other.pages_failed;
        self.pages_unreadable += other.pages_unreadable;
        self.sentences_written += other.sentences_written;
        self.sentences_failed += other.sentences_failed;
    }
}

/// Expands the input list into page files
///
/// Files are taken as given. Directories contribute their `.html` and `.htm`
/// files (one level, hidden files excluded), sorted by path.
pub fn collect_page_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, CorpusError> {
    let mut pages = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            pages.push(input.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in fs::read_dir(input)? {
            let path = entry?.path();
            if path.is_file() && is_html_file(&path) {
                found.push(path);
            }
        }
        found.sort();
        pages.extend(found);
    }

    Ok(pages)
}

fn is_html_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|name| name.to_str())
        .map_or(true, |name| name.starts_with('.'));
    let html = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));
    !hidden && html
}

/// Loads a stored page
///
/// The page URL is the document's canonical link when it has an absolute one,
/// otherwise the file's `file://` URL. Invalid UTF-8 is replaced, not rejected.
pub fn load_page(path: &Path) -> Result<FetchedPage, CorpusError> {
    let bytes = fs::read(path)?;
    let html = String::from_utf8_lossy(&bytes).into_owned();

    let canonical = extract_canonical(&Html::parse_document(&html), None);
    let url = match canonical {
        Some(url) => url,
        None => {
            let absolute = fs::canonicalize(path)?;
            Url::from_file_path(&absolute)
                .map_err(|_| CorpusError::Page {
                    path: absolute.display().to_string(),
                    message: "cannot express path as a file URL".to_string(),
                })?
                .to_string()
        }
    };

    Ok(FetchedPage { url, html })
}

/// Processes every page with `workers` threads
///
/// Returns the merged totals once all pages are done. Unreadable files are
/// logged and counted, never fatal.
pub fn run_workers<S: SentenceSink>(
    handler: &PageHandler<S>,
    pages: Vec<PathBuf>,
    workers: usize,
) -> IngestSummary {
    let workers = workers.max(1).min(pages.len().max(1));
    let queue = Mutex::new(pages.into_iter());

    let mut summary = IngestSummary::new();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker_id| {
                let queue = &queue;
                scope.spawn(move || {
                    let mut local = IngestSummary::new();
                    loop {
                        let next = queue.lock().next();
                        let Some(path) = next else {
                            break;
                        };
                        match load_page(&path) {
                            Ok(page) => local.record(&handler.handle(&page)),
                            Err(e) => {
                                tracing::warn!("Worker {}: cannot load {}: {}", worker_id, path.display(), e);
                                local.record_unreadable();
                            }
                        }
                    }
                    tracing::debug!("Worker {} finished after {} pages", worker_id, local.pages_seen);
                    local
                })
            })
            .collect();

        for handle in handles {
            match handle.join() {
                Ok(local) => summary.merge(&local),
                Err(_) => tracing::error!("A page worker panicked"),
            }
        }
    });

    summary
}
