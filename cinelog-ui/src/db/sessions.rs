//! Session storage
//!
//! Database-backed tokens with a lifetime taken from the
//! `session_ttl_minutes` setting. Expired rows never authenticate and are
//! purged whenever a new session is issued.

use chrono::{Duration, Utc};
use cinelog_common::db::get_setting;
use cinelog_common::{auth, Result};
use serde::Serialize;
use sqlx::SqlitePool;

const DEFAULT_TTL_MINUTES: i64 = 10080;

/// The authenticated caller, as resolved from a session token
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SessionUser {
    pub guid: String,
    pub username: String,
    pub is_admin: bool,
}

/// Issue a session for a user, returning the token
pub async fn create_session(pool: &SqlitePool, user_guid: &str) -> Result<String> {
    // Opportunistic cleanup; expired rows are dead weight either way
    sqlx::query("DELETE FROM sessions WHERE expires_at <= datetime('now')")
        .execute(pool)
        .await?;

    let ttl_minutes: i64 = get_setting(pool, "session_ttl_minutes")
        .await?
        .unwrap_or(DEFAULT_TTL_MINUTES);

    let token = auth::generate_session_token();
    let expires_at = (Utc::now() + Duration::minutes(ttl_minutes))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    sqlx::query("INSERT INTO sessions (token, user_guid, expires_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_guid)
        .bind(expires_at)
        .execute(pool)
        .await?;

    Ok(token)
}

/// Resolve a token to its user, ignoring expired sessions
pub async fn lookup(pool: &SqlitePool, token: &str) -> Result<Option<SessionUser>> {
    let user = sqlx::query_as(
        r#"
        SELECT u.guid, u.username, u.is_admin
        FROM sessions s
        JOIN users u ON u.guid = s.user_guid
        WHERE s.token = ? AND s.expires_at > datetime('now')
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Delete a session (sign-out)
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}
