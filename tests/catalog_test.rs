use std::sync::Arc;

use coursebook::course::{CatalogError, CollectionState, Course, CourseCatalog};
use coursebook::storage::{MemoryStorage, SqliteStorage, Storage};

const SAMPLE: &str = r#"[{"id":"1","name":"Algebra"},{"id":"2","name":"Biology"}]"#;

fn catalog_with(raw: &str) -> CourseCatalog {
    let storage = MemoryStorage::new().with_entry("courses", raw);
    CourseCatalog::with_default_key(Arc::new(storage))
}

// ── Lookup ────────────────────────────────────────────────────────

#[tokio::test]
async fn find_returns_stored_course() {
    let catalog = catalog_with(SAMPLE);
    let course = catalog.find("2").await.unwrap();
    assert_eq!(course, Some(Course::new("2", "Biology")));
}

#[tokio::test]
async fn find_unknown_id_is_absent() {
    let catalog = catalog_with(SAMPLE);
    assert!(catalog.find("9").await.unwrap().is_none());
}

#[tokio::test]
async fn find_in_empty_collection_is_absent() {
    let catalog = catalog_with("[]");
    assert!(catalog.find("1").await.unwrap().is_none());
}

#[tokio::test]
async fn find_with_nothing_stored_is_absent() {
    let catalog = CourseCatalog::with_default_key(Arc::new(MemoryStorage::new()));
    assert!(catalog.find("1").await.unwrap().is_none());
}

#[tokio::test]
async fn find_in_corrupt_collection_is_absent() {
    let catalog = catalog_with("not json");
    assert!(catalog.find("1").await.unwrap().is_none());
}

#[tokio::test]
async fn find_first_duplicate_wins() {
    let catalog = catalog_with(r#"[{"id":"1","name":"First"},{"id":"1","name":"Second"}]"#);
    assert_eq!(catalog.find("1").await.unwrap().unwrap().name, "First");
}

#[tokio::test]
async fn find_skips_malformed_sibling() {
    let catalog = catalog_with(r#"[{"id":"1","name":"Algebra"},{"id":"2"}]"#);
    assert_eq!(
        catalog.find("1").await.unwrap(),
        Some(Course::new("1", "Algebra"))
    );
    assert!(catalog.find("2").await.unwrap().is_none());
    assert_eq!(catalog.courses().await.unwrap().len(), 1);
}

// ── Collection state ──────────────────────────────────────────────

#[tokio::test]
async fn state_distinguishes_missing_corrupt_and_loaded() {
    let missing = CourseCatalog::with_default_key(Arc::new(MemoryStorage::new()));
    assert_eq!(missing.state().await.unwrap(), CollectionState::Missing);

    let corrupt = catalog_with("{}");
    assert!(matches!(
        corrupt.state().await.unwrap(),
        CollectionState::Corrupt(_)
    ));

    let loaded = catalog_with(SAMPLE);
    match loaded.state().await.unwrap() {
        CollectionState::Loaded(courses) => assert_eq!(courses.len(), 2),
        other => panic!("expected Loaded, got {other:?}"),
    }
}

#[tokio::test]
async fn courses_surfaces_corruption() {
    let catalog = catalog_with("not json");
    let err = catalog.courses().await.unwrap_err();
    assert!(matches!(err, CatalogError::Corrupt { ref key, .. } if key == "courses"));
}

#[tokio::test]
async fn courses_missing_is_empty() {
    let catalog = CourseCatalog::with_default_key(Arc::new(MemoryStorage::new()));
    assert!(catalog.courses().await.unwrap().is_empty());
}

#[tokio::test]
async fn custom_key_is_respected() {
    let storage = MemoryStorage::new()
        .with_entry("courses", SAMPLE)
        .with_entry("archived", r#"[{"id":"5","name":"Latin"}]"#);
    let catalog = CourseCatalog::new(Arc::new(storage), "archived");

    assert!(catalog.find("1").await.unwrap().is_none());
    assert_eq!(catalog.find("5").await.unwrap().unwrap().name, "Latin");
}

// ── Replace ───────────────────────────────────────────────────────

#[tokio::test]
async fn replace_then_find() {
    let catalog = CourseCatalog::with_default_key(Arc::new(MemoryStorage::new()));
    catalog
        .replace(&[Course::new("3", "Chemistry")])
        .await
        .unwrap();
    assert_eq!(
        catalog.find("3").await.unwrap(),
        Some(Course::new("3", "Chemistry"))
    );
}

#[tokio::test]
async fn replace_overwrites_whole_collection() {
    let catalog = catalog_with(SAMPLE);
    catalog.replace(&[Course::new("4", "Drama")]).await.unwrap();

    assert!(catalog.find("1").await.unwrap().is_none());
    assert_eq!(catalog.courses().await.unwrap().len(), 1);
}

#[tokio::test]
async fn replace_repairs_corrupt_collection() {
    let catalog = catalog_with("not json");
    catalog.replace(&[]).await.unwrap();
    assert_eq!(
        catalog.state().await.unwrap(),
        CollectionState::Loaded(Vec::new())
    );
}

// ── SQLite persistence ────────────────────────────────────────────

#[tokio::test]
async fn collection_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("courses-test.db");
    let path_str = path.to_str().unwrap();

    {
        let storage: Arc<dyn Storage> = Arc::new(SqliteStorage::open(path_str).unwrap());
        let catalog = CourseCatalog::with_default_key(storage);
        catalog
            .replace(&[Course::new("1", "Algebra")])
            .await
            .unwrap();
    }

    {
        let storage: Arc<dyn Storage> = Arc::new(SqliteStorage::open(path_str).unwrap());
        let catalog = CourseCatalog::with_default_key(storage);
        assert_eq!(
            catalog.find("1").await.unwrap(),
            Some(Course::new("1", "Algebra"))
        );
    }
}
