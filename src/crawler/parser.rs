//! HTML parser for extracting tagged content and links
//!
//! This module handles parsing HTML content to extract:
//! - The topic tag label (first element matching the tag selector)
//! - The article body (text of all elements matching the content selector)
//! - Outgoing links and the canonical URL, used for logging and page URLs

use crate::config::ExtractorConfig;
use crate::CorpusError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Tag and content extracted from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub tag: String,
    pub content: String,
}

/// Why a page produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No element matched the tag selector
    MissingTag,
    /// The first tag element has no text
    EmptyTag,
    /// No element matched the content selector
    MissingContent,
    /// The content elements have no text
    EmptyContent,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::MissingTag => "no tag element",
            Self::EmptyTag => "empty tag",
            Self::MissingContent => "no content element",
            Self::EmptyContent => "empty content",
        };
        f.write_str(text)
    }
}

/// Locates the tag label and article body with fixed CSS selectors
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    tag_selector: Selector,
    content_selector: Selector,
}

impl ContentExtractor {
    /// Compiles the two selectors
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::Selector`] if either selector is not valid CSS.
    pub fn new(tag_selector: &str, content_selector: &str) -> Result<Self, CorpusError> {
        Ok(Self {
            tag_selector: compile_selector(tag_selector)?,
            content_selector: compile_selector(content_selector)?,
        })
    }

    pub fn from_config(config: &ExtractorConfig) -> Result<Self, CorpusError> {
        Self::new(&config.tag_selector, &config.content_selector)
    }

    /// Extracts the tag and content from a parsed document
    ///
    /// The tag is the normalized text of the first tag element. The content is
    /// the normalized text of every content element joined by single spaces.
    ///
    /// # Example
    ///
    /// ```
    /// use scraper::Html;
    /// use tagged_corpus::crawler::ContentExtractor;
    ///
    /// let extractor = ContentExtractor::new(".th-topic", ".article-text").unwrap();
    /// let html = r#"<a class="th-topic">Gaming</a><div class="article-text">Hello there.</div>"#;
    /// let record = extractor.extract(&Html::parse_document(html)).unwrap();
    /// assert_eq!(record.tag, "Gaming");
    /// assert_eq!(record.content, "Hello there.");
    /// ```
    pub fn extract(&self, document: &Html) -> Result<PageRecord, SkipReason> {
        let tag_element = document
            .select(&self.tag_selector)
            .next()
            .ok_or(SkipReason::MissingTag)?;
        let tag = element_text(tag_element);
        if tag.is_empty() {
            return Err(SkipReason::EmptyTag);
        }

        let mut matched = false;
        let mut parts = Vec::new();
        for element in document.select(&self.content_selector) {
            matched = true;
            let text = element_text(element);
            if !text.is_empty() {
                parts.push(text);
            }
        }
        if !matched {
            return Err(SkipReason::MissingContent);
        }
        if parts.is_empty() {
            return Err(SkipReason::EmptyContent);
        }

        Ok(PageRecord {
            tag,
            content: parts.join(" "),
        })
    }

    /// Parses raw HTML and extracts from it
    pub fn extract_html(&self, html: &str) -> Result<PageRecord, SkipReason> {
        self.extract(&Html::parse_document(html))
    }
}

fn compile_selector(selector: &str) -> Result<Selector, CorpusError> {
    Selector::parse(selector).map_err(|e| CorpusError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Returns the element's text with whitespace runs collapsed and ends trimmed
fn element_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    for word in element.text().flat_map(str::split_whitespace) {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(word);
    }
    text
}

/// Extracts the page title from the HTML document
pub fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty())
}

/// Extracts the canonical URL, resolved against `base_url` when given
pub fn extract_canonical(document: &Html, base_url: Option<&Url>) -> Option<String> {
    let selector = Selector::parse("link[rel='canonical'][href]").ok()?;
    let href = document.select(&selector).next()?.value().attr("href")?;

    match base_url {
        Some(base) => resolve_link(href, base),
        None => Url::parse(href.trim())
            .ok()
            .filter(|url| url.scheme() == "http" || url.scheme() == "https")
            .map(|url| url.to_string()),
    }
}

/// Extracts all followable links from `<a href>` tags as absolute URLs
///
/// Links with a `download` attribute are skipped, as are the schemes and
/// fragments rejected by [`resolve_link`].
pub fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url.to_string())
    } else {
        None
    }
}
