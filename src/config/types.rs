use serde::Deserialize;

/// Main configuration structure for Tagged-Corpus
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub scope: ScopeConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub segmenter: SegmenterConfig,
    #[serde(default)]
    pub workers: WorkerConfig,
}

/// Where the corpus lives on disk
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage root; must already exist and be a directory
    pub root: String,
}

/// Link scope configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScopeConfig {
    /// Only URLs whose lower-cased form starts with this prefix are followed
    #[serde(rename = "site-prefix")]
    pub site_prefix: String,

    /// File extensions (without the dot) that are never followed
    #[serde(rename = "denied-extensions", default = "default_denied_extensions")]
    pub denied_extensions: Vec<String>,
}

/// CSS selectors locating the tag label and the article body
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorConfig {
    #[serde(rename = "tag-selector", default = "default_tag_selector")]
    pub tag_selector: String,

    #[serde(rename = "content-selector", default = "default_content_selector")]
    pub content_selector: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            tag_selector: default_tag_selector(),
            content_selector: default_content_selector(),
        }
    }
}

/// Sentence segmentation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SegmenterConfig {
    /// Sentences shorter than this many characters are dropped
    #[serde(rename = "min-length", default = "default_min_length")]
    pub min_length: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
        }
    }
}

/// Page worker pool configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    #[serde(default = "default_worker_count")]
    pub count: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            count: default_worker_count(),
        }
    }
}

pub const DEFAULT_DENIED_EXTENSIONS: &[&str] = &[
    "css", "js", "gif", "jpg", "png", "mp3", "mp4", "zip", "gz", "about",
];

pub fn default_denied_extensions() -> Vec<String> {
    DEFAULT_DENIED_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_tag_selector() -> String {
    ".th-topic".to_string()
}

fn default_content_selector() -> String {
    ".article-text".to_string()
}

fn default_min_length() -> usize {
    crate::text::DEFAULT_MIN_LENGTH
}

fn default_worker_count() -> usize {
    4
}
