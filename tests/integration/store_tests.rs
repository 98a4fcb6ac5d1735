//! Category store behavior across threads and restarts

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tagged_corpus::storage::{sentence_file_name, CategoryStore, LazyStore, SentenceSink};
use tempfile::TempDir;

/// Three sentences long enough to keep, one too short to keep
const PAGE: &str = "The first sentence of the page is here. Short one. \
                    The second sentence of the page is here. \
                    The third sentence of the page is here.";

/// Returns the indices of all sentence files in a category directory
fn indices(dir: &Path) -> Vec<u64> {
    let mut found: Vec<u64> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .filter_map(|name| {
            name.strip_prefix("file_")
                .and_then(|rest| rest.strip_suffix(".txt"))
                .and_then(|index| index.parse().ok())
        })
        .collect();
    found.sort_unstable();
    found
}

#[test]
fn test_concurrent_saves_assign_unique_contiguous_indices() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(CategoryStore::open(dir.path()).unwrap());
    let threads = 8;
    let saves_per_thread = 5;

    std::thread::scope(|scope| {
        for _ in 0..threads {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for _ in 0..saves_per_thread {
                    let report = store.save(PAGE, "tech").unwrap();
                    assert_eq!(report.written, 3);
                    assert_eq!(report.failed, 0);
                }
            });
        }
    });

    let expected: Vec<u64> = (0..(threads * saves_per_thread * 3) as u64).collect();
    assert_eq!(indices(&dir.path().join("tech")), expected);
    assert_eq!(store.file_count("tech"), expected.len() as u64);
}

#[test]
fn test_each_save_gets_a_contiguous_block() {
    let dir = TempDir::new().unwrap();
    let store = CategoryStore::open(dir.path()).unwrap();

    let reports: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..6)
            .map(|_| scope.spawn(|| store.save(PAGE, "gear").unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut starts: Vec<u64> = reports
        .iter()
        .map(|report| report.first_index.unwrap())
        .collect();
    starts.sort_unstable();
    assert_eq!(starts, vec![0, 3, 6, 9, 12, 15]);
}

#[test]
fn test_concurrent_saves_across_categories() {
    let dir = TempDir::new().unwrap();
    let store = CategoryStore::open(dir.path()).unwrap();
    let tags = ["tech", "gaming", "science", "audio"];

    std::thread::scope(|scope| {
        for tag in tags {
            for _ in 0..3 {
                let store = &store;
                scope.spawn(move || store.save(PAGE, tag).unwrap());
            }
        }
    });

    for tag in tags {
        assert!(store.category_exists(tag));
        assert_eq!(indices(&dir.path().join(tag)), (0..9).collect::<Vec<u64>>());
    }
}

#[test]
fn test_restart_resumes_numbering() {
    let dir = TempDir::new().unwrap();
    let tech = dir.path().join("tech");
    fs::create_dir(&tech).unwrap();
    for i in 0..5 {
        fs::write(tech.join(sentence_file_name(i)), "existing sentence").unwrap();
    }

    let store = CategoryStore::open(dir.path()).unwrap();
    let report = store
        .save("A brand new sentence that is long enough.", "tech")
        .unwrap();

    assert_eq!(report.first_index, Some(5));
    assert_eq!(
        fs::read_to_string(tech.join("file_5.txt")).unwrap(),
        "A brand new sentence that is long enough."
    );
    assert_eq!(
        fs::read_to_string(tech.join("file_0.txt")).unwrap(),
        "existing sentence"
    );
}

#[test]
fn test_restart_after_writes() {
    let dir = TempDir::new().unwrap();
    {
        let store = CategoryStore::open(dir.path()).unwrap();
        store.save(PAGE, "tech").unwrap();
    }

    let reopened = CategoryStore::open(dir.path()).unwrap();
    assert!(reopened.category_exists("tech"));
    assert_eq!(reopened.file_count("tech"), 3);
    let report = reopened.save(PAGE, "tech").unwrap();
    assert_eq!(report.first_index, Some(3));
    assert_eq!(indices(&dir.path().join("tech")), (0..6).collect::<Vec<u64>>());
}

#[test]
fn test_new_category_created_on_save() {
    let dir = TempDir::new().unwrap();
    let store = CategoryStore::open(dir.path()).unwrap();
    assert!(!dir.path().join("newtag").exists());

    store
        .save("some long enough sentence text here.", "newtag")
        .unwrap();

    let newtag = dir.path().join("newtag");
    assert!(newtag.is_dir());
    assert_eq!(
        fs::read_to_string(newtag.join("file_0.txt")).unwrap(),
        "some long enough sentence text here."
    );
}

#[test]
fn test_filesystem_failure_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("tech")).unwrap();
    fs::write(dir.path().join("blocked"), "a file where a category would go").unwrap();

    let store = CategoryStore::open(dir.path()).unwrap();
    assert!(!store.ensure_category("blocked"));
    assert!(store.save(PAGE, "blocked").is_err());

    let report = store.save(PAGE, "tech").unwrap();
    assert_eq!(report.written, 3);
    assert_eq!(indices(&dir.path().join("tech")), vec![0, 1, 2]);
}

#[test]
fn test_hidden_entries_ignored() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".cache")).unwrap();
    let tech = dir.path().join("tech");
    fs::create_dir(&tech).unwrap();
    fs::write(tech.join(".file_0.txt"), "hidden").unwrap();

    let store = CategoryStore::open(dir.path()).unwrap();
    assert_eq!(store.categories(), vec!["tech"]);
    assert_eq!(store.file_count("tech"), 0);
}

#[test]
fn test_lazy_store_shared_by_workers() {
    let dir = TempDir::new().unwrap();
    let lazy = LazyStore::new(dir.path());

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..2 {
                    lazy.save(PAGE, "tech").unwrap();
                }
            });
        }
    });

    let written: HashSet<u64> = indices(&dir.path().join("tech")).into_iter().collect();
    assert_eq!(written, (0..24).collect::<HashSet<u64>>());
}

#[test]
fn test_lazy_store_unusable_root() {
    let dir = TempDir::new().unwrap();
    let lazy = LazyStore::new(dir.path().join("missing"));

    for _ in 0..3 {
        assert!(lazy.get().is_err());
        assert!(lazy.save(PAGE, "tech").is_err());
    }
}
