use crate::db::*;
use crate::types::{LinkStatus, TaskId};
use tempfile::NamedTempFile;

/// Querying after the pool is closed returns an error rather than hanging or panicking.
#[tokio::test]
async fn test_get_task_after_pool_close_returns_error() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    let created = db.create_task(&["a.com".to_string()]).await.unwrap();
    assert!(db.get_task(created.id).await.is_ok());

    db.pool().close().await;

    let result = db.get_task(created.id).await;
    assert!(
        result.is_err(),
        "get_task after pool close should return an error, got: {:?}",
        result
    );
}

#[tokio::test]
async fn test_create_task_after_pool_close_returns_error() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    db.pool().close().await;

    let result = db.create_task(&["a.com".to_string()]).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_update_after_pool_close_is_a_database_error() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    db.pool().close().await;

    let result = db
        .update_link_status(TaskId(1), "a.com", LinkStatus::Available)
        .await;
    assert!(matches!(result, Err(crate::Error::Database(_))));
}
