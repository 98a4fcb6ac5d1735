//! Crawler-facing page processing
//!
//! This module contains the per-page pipeline, including:
//! - Tag and content extraction from parsed HTML
//! - The visitor interface a fetcher drives
//! - A thread pool for ingesting stored pages

mod handler;
mod parser;
mod worker;

pub use handler::{CrawlVisitor, FetchedPage, PageHandler, VisitOutcome};
pub use parser::{
    extract_canonical, extract_links, extract_title, ContentExtractor, PageRecord, SkipReason,
};
pub use worker::{collect_page_files, load_page, run_workers, IngestSummary};

use crate::config::Config;
use crate::storage::{open_store, CategoryStore};
use crate::CorpusError;
use std::path::PathBuf;
use std::sync::Arc;

/// Totals of an ingest run and the store it wrote to
#[derive(Debug)]
pub struct IngestRun {
    pub summary: IngestSummary,
    pub store: Arc<CategoryStore>,
}

/// Runs a complete ingest of stored pages
///
/// This is the main entry point for building the corpus from files. It will:
/// 1. Open the category store at the configured root
/// 2. Build the page handler
/// 3. Expand the inputs into page files
/// 4. Process them with the configured number of workers
///
/// # Returns
///
/// * `Ok(IngestRun)` - Totals for the run and the store, for reporting
/// * `Err(CorpusError)` - The store, handler, or inputs could not be set up
pub fn ingest(config: &Config, inputs: &[PathBuf]) -> Result<IngestRun, CorpusError> {
    let store = Arc::new(open_store(config)?);
    let handler = PageHandler::from_config(config, Arc::clone(&store))?;
    let pages = collect_page_files(inputs)?;

    tracing::info!(
        "Ingesting {} pages with {} workers",
        pages.len(),
        config.workers.count
    );

    let summary = run_workers(&handler, pages, config.workers.count);
    Ok(IngestRun { summary, store })
}
