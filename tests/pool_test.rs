// Opening the climate database

mod common;

use surfs_up_api::db;

#[tokio::test]
async fn test_connect_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("missing.sqlite").display());

    let result = db::connect(&url, 1).await;

    assert!(result.is_err(), "missing database must not be created");
    assert!(!dir.path().join("missing.sqlite").exists());
}

#[tokio::test]
async fn test_pool_is_read_only() {
    let db = common::seeded_db(&common::hawaii_sample(), &["Waikiki"]).await;

    let result = sqlx::query("DELETE FROM measurement")
        .execute(&db.pool)
        .await;
    assert!(result.is_err(), "write through read-only pool succeeded");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM measurement")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(count, 7);
}

#[tokio::test]
async fn test_reconnect_by_url() {
    let db = common::seeded_db(&[], &["Waikiki"]).await;

    let second = db::connect(&db.url, 1).await.unwrap();
    let (name,): (String,) = sqlx::query_as("SELECT name FROM station")
        .fetch_one(&second)
        .await
        .unwrap();

    assert_eq!(name, "Waikiki");
}
