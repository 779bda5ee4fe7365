use std::path::PathBuf;

use regform::store::{MemoryBackend, SqliteBackend, StoreError};
use regform::{FormSnapshot, SnapshotValue, Store};

fn temp_db(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("regform-{}-{}.db", name, std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

fn sample() -> FormSnapshot {
    let mut snapshot = FormSnapshot::new();
    snapshot.insert("firstName", SnapshotValue::Single("Ana".into()));
    snapshot.insert("activities", SnapshotValue::Many(vec!["art".into()]));
    snapshot
}

// ============================================================================
// Memory backend
// ============================================================================

#[tokio::test]
async fn test_memory_set_get_delete() {
    let store = Store::new(MemoryBackend::new());

    assert_eq!(store.get::<FormSnapshot>("registrationData").await.unwrap(), None);

    store.set("registrationData", &sample()).await.unwrap();
    assert_eq!(
        store.get::<FormSnapshot>("registrationData").await.unwrap(),
        Some(sample())
    );
    assert_eq!(
        store.get_raw("registrationData").await.unwrap().as_deref(),
        Some(r#"{"firstName":"Ana","activities":["art"]}"#)
    );

    store.delete("registrationData").await.unwrap();
    assert!(store.keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_memory_keys_with_prefix() {
    let store = Store::in_memory();
    store.set("a:formDraft", &1).await.unwrap();
    store.set("a:registrationData", &2).await.unwrap();
    store.set("b:formDraft", &3).await.unwrap();

    assert_eq!(
        store.keys_with_prefix("a:").await.unwrap(),
        ["a:formDraft", "a:registrationData"]
    );
}

#[tokio::test]
async fn test_type_mismatch_is_deserialization_error() {
    let store = Store::in_memory();
    store
        .set("submissionTimestamp", &"2024-01-15T00:00:00.000Z")
        .await
        .unwrap();

    let err = store.get::<FormSnapshot>("submissionTimestamp").await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Deserialization { ref key, .. } if key == "submissionTimestamp"
    ));
    assert!(err.to_string().contains("submissionTimestamp"));
}

// ============================================================================
// SQLite backend
// ============================================================================

#[tokio::test]
async fn test_sqlite_persists_across_reopen() {
    let path = temp_db("reopen");

    {
        let store = Store::new(SqliteBackend::new(&path).await.unwrap());
        store.set("registrationData", &sample()).await.unwrap();
        store.set("registrationData", &sample()).await.unwrap();
    }

    let store = Store::new(SqliteBackend::new(&path).await.unwrap());
    assert_eq!(
        store.get::<FormSnapshot>("registrationData").await.unwrap(),
        Some(sample())
    );
    assert_eq!(store.keys().await.unwrap(), ["registrationData"]);

    store.delete("registrationData").await.unwrap();
    assert_eq!(store.get_raw("registrationData").await.unwrap(), None);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_sqlite_prefix_is_literal_and_case_sensitive() {
    let path = temp_db("prefix");
    let store = Store::new(SqliteBackend::new(&path).await.unwrap());
    for key in ["a_formDraft", "abformDraft", "A_formDraft", "a%formDraft"] {
        store.set(key, &1).await.unwrap();
    }

    assert_eq!(store.keys_with_prefix("a_").await.unwrap(), ["a_formDraft"]);
    assert_eq!(store.keys_with_prefix("a%").await.unwrap(), ["a%formDraft"]);
    assert_eq!(store.keys().await.unwrap().len(), 4);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_backends_list_the_same_keys() {
    let path = temp_db("agree");
    let sqlite = Store::new(SqliteBackend::new(&path).await.unwrap());
    let memory = Store::in_memory();
    for store in [&sqlite, &memory] {
        store.set("b:formDraft", &1).await.unwrap();
        store.set("a_formDraft", &2).await.unwrap();
        store.set("a:registrationData", &3).await.unwrap();
        store.delete("b:formDraft").await.unwrap();
    }

    for prefix in ["", "a", "a_", "a:", "A"] {
        assert_eq!(
            sqlite.keys_with_prefix(prefix).await.unwrap(),
            memory.keys_with_prefix(prefix).await.unwrap(),
            "prefix {:?}",
            prefix
        );
    }

    let _ = std::fs::remove_file(&path);
}
