//! Output module for reporting corpus contents
//!
//! This module handles:
//! - Per-category sentence statistics
//! - Printing ingest run totals

pub mod stats;

pub use stats::{load_statistics, print_ingest_summary, print_statistics, CorpusStatistics};
