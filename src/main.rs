//! Tagged-Corpus main entry point
//!
//! This is the command-line interface for the tagged sentence corpus builder.

use clap::Parser;
use std::path::PathBuf;
use tagged_corpus::config::{load_config, Config};
use tagged_corpus::crawler::ingest;
use tagged_corpus::output::{load_statistics, print_ingest_summary, print_statistics};
use tagged_corpus::storage::open_store;
use tagged_corpus::url::ScopeFilter;
use tracing_subscriber::EnvFilter;

/// Tagged-Corpus: a categorized sentence corpus builder
///
/// Tagged-Corpus reads fetched HTML pages, extracts each page's topic tag and
/// article body, and stores every sentence as a numbered file under a
/// directory named after the tag.
#[derive(Parser, Debug)]
#[command(name = "tagged-corpus")]
#[command(version = "1.0.0")]
#[command(about = "A categorized sentence corpus builder", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// HTML page files or directories of pages to ingest
    #[arg(value_name = "PAGES")]
    pages: Vec<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show it without touching the corpus
    #[arg(long, conflicts_with_all = ["stats", "check_url"])]
    dry_run: bool,

    /// Show per-category sentence counts and exit
    #[arg(long, conflicts_with_all = ["dry_run", "check_url"])]
    stats: bool,

    /// Print the scope decision for a URL and exit (repeatable)
    #[arg(long, value_name = "URL", conflicts_with_all = ["dry_run", "stats"])]
    check_url: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(cfg) => {
            tracing::info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if !cli.check_url.is_empty() {
        handle_check_urls(&config, &cli.check_url);
    } else {
        handle_ingest(&config, &cli.pages)?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tagged_corpus=info,warn"),
            1 => EnvFilter::new("tagged_corpus=debug,info"),
            2 => EnvFilter::new("tagged_corpus=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(verbose > 0)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &Config) {
    println!("=== Tagged-Corpus Dry Run ===\n");

    println!("Storage:");
    println!("  Root: {}", config.storage.root);

    println!("\nScope:");
    println!("  Site prefix: {}", config.scope.site_prefix);
    println!(
        "  Denied extensions: {}",
        config.scope.denied_extensions.join(", ")
    );

    println!("\nExtractor:");
    println!("  Tag selector: {}", config.extractor.tag_selector);
    println!("  Content selector: {}", config.extractor.content_selector);

    println!("\nSegmenter:");
    println!("  Minimum sentence length: {}", config.segmenter.min_length);

    println!("\nWorkers: {}", config.workers.count);

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows sentence counts per category
fn handle_stats(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let stats = load_statistics(&store);
    print_statistics(&stats);
    Ok(())
}

/// Handles the --check-url mode: prints scope decisions
fn handle_check_urls(config: &Config, urls: &[String]) {
    let filter = ScopeFilter::from_config(&config.scope);
    for url in urls {
        let verdict = if filter.should_visit(url) {
            "visit"
        } else {
            "skip"
        };
        println!("{:<5} {}", verdict, url);
    }
}

/// Handles the main ingest operation
fn handle_ingest(config: &Config, pages: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    if pages.is_empty() {
        tracing::warn!("No pages given; nothing to ingest");
    }

    match ingest(config, pages) {
        Ok(run) => {
            tracing::info!("Ingest completed");
            print_ingest_summary(&run.summary);
            println!();
            print_statistics(&load_statistics(&run.store));
            Ok(())
        }
        Err(e) => {
            tracing::error!("Ingest failed: {}", e);
            Err(e.into())
        }
    }
}
