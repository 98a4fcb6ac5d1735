//! Page handler - per-page orchestration
//!
//! The fetcher talks to this module through [`CrawlVisitor`]: it asks whether
//! each discovered link should be followed, and hands over every fetched page.
//! A page goes through extraction, then the sentence sink. Nothing here fails
//! the caller; problems become a logged [`VisitOutcome`].

use crate::config::Config;
use crate::crawler::parser::{extract_links, extract_title, ContentExtractor, SkipReason};
use crate::storage::{SaveReport, SentenceSink};
use crate::url::ScopeFilter;
use crate::CorpusError;
use scraper::Html;
use url::Url;

/// A page delivered by the fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub html: String,
}

impl FetchedPage {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

/// What happened to one visited page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitOutcome {
    /// Content was handed to the sink
    Saved(SaveReport),
    /// Tag or content missing; nothing written
    Skipped(SkipReason),
    /// The sink refused the page (invalid tag, category or store failure)
    Failed(String),
}

/// Callbacks a fetcher drives, one call per link and per page
pub trait CrawlVisitor: Send + Sync {
    /// Decides whether a discovered link should be fetched
    fn should_visit(&self, url: &str) -> bool;

    /// Processes one fetched page
    fn visit(&self, page: &FetchedPage);
}

/// Extracts tagged content from pages and saves it through a sink
pub struct PageHandler<S> {
    scope: ScopeFilter,
    extractor: ContentExtractor,
    sink: S,
}

impl<S: SentenceSink> PageHandler<S> {
    pub fn new(scope: ScopeFilter, extractor: ContentExtractor, sink: S) -> Self {
        Self {
            scope,
            extractor,
            sink,
        }
    }

    /// Builds a handler from the scope and extractor sections of the config
    pub fn from_config(config: &Config, sink: S) -> Result<Self, CorpusError> {
        Ok(Self::new(
            ScopeFilter::from_config(&config.scope),
            ContentExtractor::from_config(&config.extractor)?,
            sink,
        ))
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Extracts and saves one page, reporting the outcome
    pub fn handle(&self, page: &FetchedPage) -> VisitOutcome {
        let document = Html::parse_document(&page.html);
        tracing::debug!(
            "URL: {} ({})",
            page.url,
            extract_title(&document).as_deref().unwrap_or("untitled")
        );
        self.log_outgoing_links(&document, &page.url);

        let record = match self.extractor.extract(&document) {
            Ok(record) => record,
            Err(reason) => {
                tracing::debug!("Skipping {}: {}", page.url, reason);
                return VisitOutcome::Skipped(reason);
            }
        };

        match self.sink.save(&record.content, &record.tag) {
            Ok(report) => {
                tracing::info!(
                    "Saved {} sentences from {} to '{}'",
                    report.written,
                    page.url,
                    report.category
                );
                VisitOutcome::Saved(report)
            }
            Err(e) => {
                tracing::warn!("Failed to save {}: {}", page.url, e);
                VisitOutcome::Failed(e.to_string())
            }
        }
    }

    fn log_outgoing_links(&self, document: &Html, page_url: &str) {
        let Ok(base_url) = Url::parse(page_url) else {
            return;
        };
        let links = extract_links(document, &base_url);
        let in_scope = links
            .iter()
            .filter(|link| self.scope.should_visit(link))
            .count();
        tracing::debug!(
            "{} outgoing links on {}, {} in scope",
            links.len(),
            page_url,
            in_scope
        );
    }
}

impl<S: SentenceSink> CrawlVisitor for PageHandler<S> {
    fn should_visit(&self, url: &str) -> bool {
        self.scope.should_visit(url)
    }

    fn visit(&self, page: &FetchedPage) {
        self.handle(page);
    }
}
