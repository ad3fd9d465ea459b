//! Unit tests for database initialization
//!
//! Covers automatic creation on first run, idempotent reopen, default
//! settings, the seeded administrator, and the schema constraints the
//! list/rating logic relies on.

use cinelog_common::db::init::init_database;
use tempfile::tempdir;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("cinelog.db");

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());

    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("cinelog.db");

    let pool1 = init_database(&db_path).await;
    assert!(pool1.is_ok());
    drop(pool1);

    // Second init must succeed against the already-populated schema
    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());
}

#[tokio::test]
async fn test_default_settings_initialized() {
    let dir = tempdir().unwrap();
    let pool = init_database(&dir.path().join("cinelog.db")).await.unwrap();

    let ttl: Option<i64> = cinelog_common::db::get_setting(&pool, "session_ttl_minutes")
        .await
        .unwrap();
    assert_eq!(ttl, Some(10080));
}

#[tokio::test]
async fn test_default_admin_seeded_once() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("cinelog.db");

    let pool = init_database(&db_path).await.unwrap();
    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_admin = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(admins, 1);
    drop(pool);

    // Re-init must not create a second administrator
    let pool = init_database(&db_path).await.unwrap();
    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_admin = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(admins, 1);
}

#[tokio::test]
async fn test_username_uniqueness_enforced() {
    let dir = tempdir().unwrap();
    let pool = init_database(&dir.path().join("cinelog.db")).await.unwrap();

    let insert = "INSERT INTO users (guid, username, password_hash, password_salt) VALUES (?, ?, 'h', 's')";
    sqlx::query(insert)
        .bind("u-1")
        .bind("alice")
        .execute(&pool)
        .await
        .unwrap();

    let duplicate = sqlx::query(insert).bind("u-2").bind("alice").execute(&pool).await;
    assert!(duplicate.is_err(), "Duplicate username should violate uniqueness");
}

#[tokio::test]
async fn test_list_entry_pair_uniqueness_enforced() {
    let dir = tempdir().unwrap();
    let pool = init_database(&dir.path().join("cinelog.db")).await.unwrap();

    seed_user(&pool, "u-1", "alice").await;
    seed_movie(&pool, "m-1", "The Matrix").await;

    let insert = "INSERT INTO list_entries (user_guid, movie_guid) VALUES (?, ?)";
    sqlx::query(insert).bind("u-1").bind("m-1").execute(&pool).await.unwrap();

    let duplicate = sqlx::query(insert).bind("u-1").bind("m-1").execute(&pool).await;
    assert!(duplicate.is_err(), "Duplicate (user, movie) pair should violate primary key");
}

#[tokio::test]
async fn test_rating_range_enforced() {
    let dir = tempdir().unwrap();
    let pool = init_database(&dir.path().join("cinelog.db")).await.unwrap();

    seed_user(&pool, "u-1", "alice").await;
    seed_movie(&pool, "m-1", "The Matrix").await;

    let result = sqlx::query("INSERT INTO list_entries (user_guid, movie_guid, rating) VALUES ('u-1', 'm-1', 6)")
        .execute(&pool)
        .await;
    assert!(result.is_err(), "Rating outside [1,5] should violate the check constraint");
}

#[tokio::test]
async fn test_movie_delete_cascades_entries() {
    let dir = tempdir().unwrap();
    let pool = init_database(&dir.path().join("cinelog.db")).await.unwrap();

    seed_user(&pool, "u-1", "alice").await;
    seed_movie(&pool, "m-1", "The Matrix").await;
    sqlx::query("INSERT INTO list_entries (user_guid, movie_guid, rating) VALUES ('u-1', 'm-1', 4)")
        .execute(&pool)
        .await
        .unwrap();

    sqlx::query("DELETE FROM movies WHERE guid = 'm-1'")
        .execute(&pool)
        .await
        .unwrap();

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM list_entries")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0, "Deleting a movie must cascade its list entries");
}

async fn seed_user(pool: &sqlx::SqlitePool, guid: &str, username: &str) {
    sqlx::query("INSERT INTO users (guid, username, password_hash, password_salt) VALUES (?, ?, 'h', 's')")
        .bind(guid)
        .bind(username)
        .execute(pool)
        .await
        .unwrap();
}

async fn seed_movie(pool: &sqlx::SqlitePool, guid: &str, title: &str) {
    sqlx::query(
        "INSERT INTO movies (guid, title, description, director, genre, image_url, trailer_url)
         VALUES (?, ?, 'd', 'dir', 'g', 'http://img', 'http://trailer')",
    )
    .bind(guid)
    .bind(title)
    .execute(pool)
    .await
    .unwrap();
}
