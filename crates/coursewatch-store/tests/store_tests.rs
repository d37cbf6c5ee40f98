use coursewatch_model::{Offering, Snapshot, SnapshotError};
use coursewatch_store::{SnapshotStore, StoreError};
use tempfile::tempdir;

fn make_offering(number: &str, section: &str, name: &str, crn: &str) -> Offering {
    Offering {
        id: format!("{crn}-id"),
        number: number.to_string(),
        section: section.to_string(),
        name: name.to_string(),
        crn: crn.to_string(),
    }
}

fn sample_snapshot() -> Snapshot {
    vec![
        make_offering("4001", "01", "AI", "111"),
        make_offering("6001", "01", "Seminar", "333"),
    ]
    .into_iter()
    .collect()
}

// ── Round-trip ───────────────────────────────────────────────────

#[tokio::test]
async fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("courses.list"));

    let snapshot = sample_snapshot();
    store.save(&snapshot).await.unwrap();

    assert_eq!(store.load().await.unwrap(), snapshot);
}

#[tokio::test]
async fn save_replaces_previous_snapshot() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("courses.list"));

    store.save(&sample_snapshot()).await.unwrap();
    let replacement: Snapshot =
        vec![make_offering("3001", "01", "Intro", "555")].into_iter().collect();
    store.save(&replacement).await.unwrap();

    assert_eq!(store.load().await.unwrap(), replacement);
}

#[tokio::test]
async fn save_leaves_no_staging_file() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("courses.list"));

    store.save(&sample_snapshot()).await.unwrap();

    assert!(!dir.path().join("courses.tmp").exists());
}

// ── exists ───────────────────────────────────────────────────────

#[tokio::test]
async fn exists_reflects_file_presence() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("courses.list"));

    assert!(!store.exists().await);
    store.save(&Snapshot::new()).await.unwrap();
    assert!(store.exists().await);
}

// ── Failures ─────────────────────────────────────────────────────

#[tokio::test]
async fn load_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("absent.list"));

    match store.load().await {
        Err(StoreError::Io(err)) => {
            assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[tokio::test]
async fn load_corrupt_file_is_snapshot_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("courses.list");
    tokio::fs::write(&path, "{definitely not a snapshot").await.unwrap();

    let store = SnapshotStore::new(&path);
    match store.load().await {
        Err(StoreError::Snapshot(SnapshotError::Parse(_))) => {}
        other => panic!("expected Snapshot(Parse), got {other:?}"),
    }
}

#[tokio::test]
async fn load_incomplete_record_is_missing_field() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("courses.list");
    tokio::fs::write(&path, r#"[{"id": "1", "number": "4001"}]"#).await.unwrap();

    let store = SnapshotStore::new(&path);
    match store.load().await {
        Err(StoreError::Snapshot(SnapshotError::MissingField(_))) => {}
        other => panic!("expected Snapshot(MissingField), got {other:?}"),
    }
}
