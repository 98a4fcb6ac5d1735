//! Page pipeline: extraction, segmentation and storage together

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tagged_corpus::config::parse_config;
use tagged_corpus::crawler::{ingest, CrawlVisitor, FetchedPage, PageHandler, VisitOutcome};
use tagged_corpus::output::load_statistics;
use tagged_corpus::storage::CategoryStore;
use tagged_corpus::Config;
use tempfile::TempDir;

fn config_for(root: &Path, workers: usize) -> Config {
    parse_config(&format!(
        r#"
[storage]
root = "{}"

[scope]
site-prefix = "https://www.example.com/"

[workers]
count = {}
"#,
        root.display(),
        workers
    ))
    .unwrap()
}

fn article(tag: &str, canonical: &str, paragraphs: &[&str]) -> String {
    let body: String = paragraphs
        .iter()
        .map(|p| format!(r#"<div class="article-text"><p>{}</p></div>"#, p))
        .collect();
    format!(
        r#"<html><head><title>{tag}</title><link rel="canonical" href="{canonical}"></head>
<body>
  <nav><a href="/video/clip.mp4">Clip</a><a href="/articles/next">Next</a></nav>
  <a class="th-topic">{tag}</a>
  {body}
</body></html>"#
    )
}

fn write_page(dir: &Path, name: &str, html: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, html).unwrap();
    path
}

fn count_files(dir: &Path) -> usize {
    fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

#[test]
fn test_handler_writes_sentences_for_complete_page() {
    let root = TempDir::new().unwrap();
    let store = Arc::new(CategoryStore::open(root.path()).unwrap());
    let config = config_for(root.path(), 1);
    let handler = PageHandler::from_config(&config, Arc::clone(&store)).unwrap();

    let html = article(
        "Gaming",
        "https://www.example.com/articles/a1",
        &[
            "The new console launches next spring. It is pricey.",
            "Developers have already shipped several titles for it.",
        ],
    );
    let outcome = handler.handle(&FetchedPage::new("https://www.example.com/articles/a1", html));

    let report = match outcome {
        VisitOutcome::Saved(report) => report,
        other => panic!("expected page to be saved, got {:?}", other),
    };
    assert_eq!(report.category, "Gaming");
    assert_eq!(report.written, 2);

    let gaming = root.path().join("Gaming");
    assert_eq!(
        fs::read_to_string(gaming.join("file_0.txt")).unwrap(),
        "The new console launches next spring. "
    );
    assert_eq!(
        fs::read_to_string(gaming.join("file_1.txt")).unwrap(),
        "Developers have already shipped several titles for it."
    );
}

#[test]
fn test_incomplete_pages_leave_no_trace() {
    let root = TempDir::new().unwrap();
    let store = Arc::new(CategoryStore::open(root.path()).unwrap());
    let handler = PageHandler::from_config(&config_for(root.path(), 1), Arc::clone(&store)).unwrap();

    let no_tag = r#"<div class="article-text">A body without any topic label at all.</div>"#;
    let no_body = r#"<a class="th-topic">Gaming</a><p>Text outside the article body.</p>"#;
    let bad_tag = r#"<a class="th-topic">../../etc</a><div class="article-text">Body text that is long.</div>"#;

    for html in [no_tag, no_body, bad_tag] {
        handler.visit(&FetchedPage::new("https://www.example.com/x", html));
    }

    assert_eq!(count_files(root.path()), 0);
    assert!(store.categories().is_empty());
}

#[test]
fn test_handler_scope_decisions() {
    let root = TempDir::new().unwrap();
    let store = CategoryStore::open(root.path()).unwrap();
    let handler = PageHandler::from_config(&config_for(root.path(), 1), store).unwrap();

    assert!(handler.should_visit("https://www.example.com/articles/a1"));
    assert!(!handler.should_visit("https://www.example.com/video/x.mp4"));
    assert!(!handler.should_visit("https://cdn.example.com/articles/a1"));
}

#[test]
fn test_ingest_directory_with_workers() {
    let root = TempDir::new().unwrap();
    let pages = TempDir::new().unwrap();

    for i in 0..12 {
        let tag = if i % 2 == 0 { "Gaming" } else { "Science" };
        let html = article(
            tag,
            &format!("https://www.example.com/articles/{}", i),
            &["This article sentence is long enough. Tiny. Another long sentence follows here."],
        );
        write_page(pages.path(), &format!("page_{:02}.html", i), &html);
    }
    write_page(pages.path(), "broken.html", "<p>No tag, no body.</p>");
    write_page(pages.path(), "readme.txt", "not a page");

    let config = config_for(root.path(), 4);
    let summary = ingest(&config, &[pages.path().to_path_buf()]).unwrap().summary;

    assert_eq!(summary.pages_seen, 13);
    assert_eq!(summary.pages_saved, 12);
    assert_eq!(summary.pages_skipped, 1);
    assert_eq!(summary.pages_failed, 0);
    assert_eq!(summary.sentences_written, 24);

    assert_eq!(count_files(&root.path().join("Gaming")), 12);
    assert_eq!(count_files(&root.path().join("Science")), 12);
    for i in 0..12 {
        assert!(root.path().join("Gaming").join(format!("file_{}.txt", i)).is_file());
    }
}

#[test]
fn test_second_ingest_resumes_numbering() {
    let root = TempDir::new().unwrap();
    let pages = TempDir::new().unwrap();
    let page = write_page(
        pages.path(),
        "one.html",
        &article(
            "tech",
            "https://www.example.com/articles/one",
            &["The only sentence on this page is long enough."],
        ),
    );

    let config = config_for(root.path(), 2);
    ingest(&config, &[page.clone()]).unwrap();
    let summary = ingest(&config, &[page]).unwrap().summary;

    assert_eq!(summary.sentences_written, 1);
    let tech = root.path().join("tech");
    assert!(tech.join("file_0.txt").is_file());
    assert!(tech.join("file_1.txt").is_file());
    assert_eq!(count_files(&tech), 2);
}

#[test]
fn test_ingest_counts_unreadable_pages() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("absent.html");

    let summary = ingest(&config_for(root.path(), 1), &[missing]).unwrap().summary;
    assert_eq!(summary.pages_seen, 1);
    assert_eq!(summary.pages_unreadable, 1);
}

#[test]
fn test_ingest_fails_without_storage_root() {
    let parent = TempDir::new().unwrap();
    let config = config_for(&parent.path().join("missing"), 1);
    assert!(ingest(&config, &[]).is_err());
}

#[test]
fn test_statistics_after_ingest_match_disk() {
    let root = TempDir::new().unwrap();
    let pages = TempDir::new().unwrap();
    fs::create_dir(root.path().join("Audio")).unwrap();

    for (i, tag) in ["Gaming", "Gaming", "Science"].iter().enumerate() {
        let html = article(
            tag,
            &format!("https://www.example.com/articles/{}", i),
            &["This article sentence is long enough. Another long sentence follows here."],
        );
        write_page(pages.path(), &format!("page_{}.html", i), &html);
    }

    let run = ingest(&config_for(root.path(), 3), &[pages.path().to_path_buf()]).unwrap();
    let stats = load_statistics(&run.store);

    assert_eq!(
        stats.categories,
        vec![
            ("Audio".to_string(), 0),
            ("Gaming".to_string(), 4),
            ("Science".to_string(), 2),
        ]
    );
    assert_eq!(stats.total_sentences, run.summary.sentences_written);
    for (name, count) in &stats.categories {
        assert_eq!(count_files(&root.path().join(name)) as u64, *count);
    }
}
