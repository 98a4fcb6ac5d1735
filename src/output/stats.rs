//! Corpus statistics
//!
//! This module provides functionality for extracting and displaying
//! per-category sentence counts from the category store.

use crate::crawler::IngestSummary;
use crate::storage::CategoryStore;

/// Sentence counts across the corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusStatistics {
    /// Storage root the counts were taken from
    pub root: String,

    /// Category name and sentence file count, sorted by name
    pub categories: Vec<(String, u64)>,

    /// Sum of all category counts
    pub total_sentences: u64,
}

impl CorpusStatistics {
    /// Returns the category with the most sentences, if any
    pub fn largest_category(&self) -> Option<&(String, u64)> {
        self.categories.iter().max_by_key(|(_, count)| *count)
    }
}

/// Loads statistics from the store
///
/// Counts come from [`CategoryStore::file_count`], so categories not yet
/// scanned are scanned once here.
pub fn load_statistics(store: &CategoryStore) -> CorpusStatistics {
    let categories: Vec<(String, u64)> = store
        .categories()
        .into_iter()
        .map(|name| {
            let count = store.file_count(&name);
            (name, count)
        })
        .collect();
    let total_sentences = categories.iter().map(|(_, count)| count).sum();

    CorpusStatistics {
        root: store.root().display().to_string(),
        categories,
        total_sentences,
    }
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &CorpusStatistics) {
    println!("=== Corpus Statistics ===\n");
    println!("Storage root: {}", stats.root);
    println!("Categories: {}", stats.categories.len());
    println!("Total sentences: {}", stats.total_sentences);
    if let Some((name, count)) = stats.largest_category() {
        println!("Largest category: {} ({} sentences)", name, count);
    }

    if stats.categories.is_empty() {
        return;
    }

    let width = stats
        .categories
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);

    println!("\nSentences by category:");
    for (name, count) in &stats.categories {
        println!("  {:<width$}  {:>8}", name, count, width = width);
    }
}

/// Prints the totals of an ingest run to stdout
pub fn print_ingest_summary(summary: &IngestSummary) {
    println!("=== Ingest Summary ===\n");
    println!("Pages seen: {}", summary.pages_seen);
    println!("  Saved: {}", summary.pages_saved);
    println!("  Skipped (no tag or content): {}", summary.pages_skipped);
    println!("  Failed (rejected by store): {}", summary.pages_failed);
    println!("  Unreadable: {}", summary.pages_unreadable);
    println!("Sentences written: {}", summary.sentences_written);
    if summary.sentences_failed > 0 {
        println!("Sentences failed: {}", summary.sentences_failed);
    }
}
