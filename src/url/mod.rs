//! URL scope filtering for Tagged-Corpus
//!
//! Decides whether a link discovered by the fetcher should be queued. The
//! filter is immutable after construction and safe to share across threads.

mod matcher;

pub use matcher::matches_denied_extension;

use crate::config::ScopeConfig;

/// Scope predicate over candidate URLs
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    site_prefix: String,
    denied_extensions: Vec<String>,
}

impl ScopeFilter {
    /// Creates a filter from a site prefix and a denied extension list
    ///
    /// Both are lower-cased so matching is case-insensitive on the URL side.
    pub fn new(site_prefix: &str, denied_extensions: &[String]) -> Self {
        Self {
            site_prefix: site_prefix.to_lowercase(),
            denied_extensions: denied_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// Creates a filter from the scope section of the configuration
    pub fn from_config(config: &ScopeConfig) -> Self {
        Self::new(&config.site_prefix, &config.denied_extensions)
    }

    /// Returns the lower-cased site prefix
    pub fn site_prefix(&self) -> &str {
        &self.site_prefix
    }

    /// Decides whether a candidate URL should be fetched
    ///
    /// Returns `true` only if the lower-cased URL starts with the site prefix
    /// and does not end with a denied extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_corpus::config::default_denied_extensions;
    /// use tagged_corpus::url::ScopeFilter;
    ///
    /// let filter = ScopeFilter::new("https://www.example.com/", &default_denied_extensions());
    /// assert!(filter.should_visit("https://www.example.com/articles/a1"));
    /// assert!(!filter.should_visit("https://www.example.com/video/x.mp4"));
    /// assert!(!filter.should_visit("https://other.com/articles/a1"));
    /// ```
    pub fn should_visit(&self, url: &str) -> bool {
        let href = url.to_lowercase();
        !matches_denied_extension(&href, &self.denied_extensions)
            && href.starts_with(&self.site_prefix)
    }
}
