//! Configuration module for Tagged-Corpus
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use tagged_corpus::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("corpus.toml")).unwrap();
//! println!("Corpus root: {}", config.storage.root);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    default_denied_extensions, Config, ExtractorConfig, ScopeConfig, SegmenterConfig,
    StorageConfig, WorkerConfig, DEFAULT_DENIED_EXTENSIONS,
};

pub use parser::{load_config, parse_config};
pub use validation::validate;
