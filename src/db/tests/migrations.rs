use crate::db::*;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_database_creation() {
    let temp_file = NamedTempFile::new().unwrap();
    let db_path = temp_file.path();

    let db = Database::new(db_path).await.unwrap();

    // Verify tables exist
    let mut conn = db.pool.acquire().await.unwrap();

    let tables: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .fetch_all(&mut *conn)
            .await
            .unwrap();

    assert!(tables.contains(&"link_check_tasks".to_string()));
    assert!(tables.contains(&"link_statuses".to_string()));
    assert!(tables.contains(&"schema_version".to_string()));

    drop(conn);
    db.close().await;
}

#[tokio::test]
async fn test_reopen_keeps_data_and_skips_applied_migrations() {
    let temp_file = NamedTempFile::new().unwrap();
    let db_path = temp_file.path();

    let db = Database::new(db_path).await.unwrap();
    let created = db
        .create_task(&["a.com".to_string(), "b.com".to_string()])
        .await
        .unwrap();
    db.close().await;

    // Opening again must not try to recreate the tables
    let db = Database::new(db_path).await.unwrap();
    let task = db.get_task(created.id).await.unwrap();
    assert_eq!(task.links.len(), 2);

    let versions: Vec<i64> = sqlx::query_scalar("SELECT version FROM schema_version")
        .fetch_all(db.pool())
        .await
        .unwrap();
    assert_eq!(versions, vec![1]);

    db.close().await;
}

#[tokio::test]
async fn test_database_creates_missing_parent_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("nested").join("links.db");

    let db = Database::new(&db_path).await.unwrap();
    assert!(db_path.exists());

    db.close().await;
}
