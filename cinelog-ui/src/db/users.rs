//! User account storage

use cinelog_common::auth;
use cinelog_common::db::models::User;
use cinelog_common::{Error, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Create a non-administrator account
///
/// The unique constraint on username is the arbiter: a duplicate - taken
/// name or the losing side of a concurrent race - comes back as a
/// conflict, never a raw database error.
pub async fn create_user(pool: &SqlitePool, username: &str, password: &str) -> Result<User> {
    let salt = auth::generate_salt();
    let hash = auth::hash_password(password, &salt);
    let guid = Uuid::new_v4().to_string();

    let result = sqlx::query(
        r#"
        INSERT INTO users (guid, username, password_hash, password_salt, is_admin)
        VALUES (?, ?, ?, ?, 0)
        "#,
    )
    .bind(&guid)
    .bind(username)
    .bind(&hash)
    .bind(&salt)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(User {
            guid,
            username: username.to_string(),
            password_hash: hash,
            password_salt: salt,
            is_admin: false,
        }),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            Err(Error::Conflict("Username already exists.".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Look an account up by username
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as(
        "SELECT guid, username, password_hash, password_salt, is_admin FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
