use super::*;
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Create an in-memory store for testing.
async fn test_store() -> SqliteAppointmentLog {
    let opts = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await
        .unwrap();
    SqliteAppointmentLog::run_migrations(&pool).await.unwrap();
    SqliteAppointmentLog { pool }
}

/// Unique on-disk database path (per call).
fn temp_db_path() -> std::path::PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!(
        "__crewbot_store_test_{}_{}__",
        std::process::id(),
        id
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir.join("nested").join("appointments.db")
}

#[tokio::test]
async fn test_append_and_latest() {
    let store = test_store().await;
    let id = ConversationId::from(42);
    let record = AppointmentRecord::new(id.clone(), "Kyiv\n+380\n15/05/2025\n14:00");

    store.append(&record).await.unwrap();

    let loaded = store.latest(&id).await.unwrap().unwrap();
    assert_eq!(loaded.id, record.id);
    assert_eq!(loaded.details, record.details);
    assert_eq!(loaded.conversation_id, id);
    assert_eq!(
        loaded.submitted_at.timestamp_micros(),
        record.submitted_at.timestamp_micros()
    );
}

#[tokio::test]
async fn test_latest_unknown_conversation() {
    let store = test_store().await;
    assert!(store
        .latest(&ConversationId::from(1))
        .await
        .unwrap()
        .is_none());
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_append_upserts_per_conversation() {
    let store = test_store().await;
    let a = ConversationId::from(1);
    let b = ConversationId::from(2);

    store.append(&AppointmentRecord::new(a.clone(), "first")).await.unwrap();
    store.append(&AppointmentRecord::new(a.clone(), "second")).await.unwrap();
    store.append(&AppointmentRecord::new(b.clone(), "other")).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 2);
    assert_eq!(store.latest(&a).await.unwrap().unwrap().details, "second");
    assert_eq!(store.latest(&b).await.unwrap().unwrap().details, "other");
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let store = test_store().await;
    SqliteAppointmentLog::run_migrations(store.pool()).await.unwrap();

    let (applied,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM _migrations")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(applied, 1);
}

#[tokio::test]
async fn test_on_disk_store_survives_reopen() {
    let path = temp_db_path();
    let path_str = path.to_string_lossy().to_string();
    let id = ConversationId::from(-100);

    {
        let store = SqliteAppointmentLog::new(&path_str).await.unwrap();
        store
            .append(&AppointmentRecord::new(id.clone(), "persisted"))
            .await
            .unwrap();
        store.pool().close().await;
    }

    let reopened = SqliteAppointmentLog::new(&path_str).await.unwrap();
    assert_eq!(
        reopened.latest(&id).await.unwrap().unwrap().details,
        "persisted"
    );

    if let Some(dir) = path.parent().and_then(|p| p.parent()) {
        let _ = std::fs::remove_dir_all(dir);
    }
}
