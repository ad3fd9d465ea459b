//! Database initialization
//!
//! Creates the database on first run and brings the schema up idempotently,
//! then seeds default settings and the bootstrap administrator account.

use crate::db::settings::ensure_setting;
use crate::{auth, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Connect options apply per pooled connection:
    // - foreign_keys: cascade from movies/users into list_entries and sessions
    // - WAL: concurrent readers with one writer, which serializes each
    //   membership mutation together with its rating recompute
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    init_schema(&pool).await?;
    init_default_settings(&pool).await?;
    init_default_admin(&pool).await?;

    Ok(pool)
}

/// Create all tables (idempotent - safe to call multiple times)
///
/// Exposed separately so tests can prepare in-memory pools.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    create_users_table(pool).await?;
    create_sessions_table(pool).await?;
    create_movies_table(pool).await?;
    create_list_entries_table(pool).await?;
    create_settings_table(pool).await?;

    Ok(())
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            guid TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            password_salt TEXT NOT NULL,
            is_admin INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_sessions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token TEXT PRIMARY KEY,
            user_guid TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            expires_at TIMESTAMP NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_movies_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS movies (
            guid TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            director TEXT NOT NULL,
            release_year INTEGER,
            duration_minutes INTEGER,
            age_rating TEXT NOT NULL DEFAULT '',
            genre TEXT NOT NULL,
            image_url TEXT NOT NULL,
            trailer_url TEXT NOT NULL,
            average_rating REAL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_list_entries_table(pool: &SqlitePool) -> Result<()> {
    // Unique on (user_guid, movie_guid): the pair is a set, not a multiset.
    // Concurrent identical adds race on this constraint instead of creating
    // a second edge.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS list_entries (
            user_guid TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            movie_guid TEXT NOT NULL REFERENCES movies(guid) ON DELETE CASCADE,
            rating INTEGER CHECK (rating BETWEEN 1 AND 5),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (user_guid, movie_guid)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the settings table
///
/// Stores application configuration key-value pairs.
pub async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Initialize default settings
async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    // Session lifetime: 7 days
    ensure_setting(pool, "session_ttl_minutes", "10080").await?;

    Ok(())
}

/// Seed the bootstrap administrator on first run
///
/// There is no out-of-band account creation, so a database with no
/// administrator gets the default 'admin' account.
async fn init_default_admin(pool: &SqlitePool) -> Result<()> {
    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_admin = 1")
        .fetch_one(pool)
        .await?;

    if admins > 0 {
        return Ok(());
    }

    let salt = auth::generate_salt();
    let hash = auth::hash_password("admin", &salt);

    sqlx::query(
        r#"
        INSERT OR IGNORE INTO users (guid, username, password_hash, password_salt, is_admin)
        VALUES (?, 'admin', ?, ?, 1)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(hash)
    .bind(salt)
    .execute(pool)
    .await?;

    warn!("Created default administrator account 'admin' with default password - change it");

    Ok(())
}
