//! Database models

use serde::{Deserialize, Serialize};

/// A catalog movie
///
/// `average_rating` is derived: the mean of all non-null ratings recorded
/// against this movie in `list_entries`, or NULL when none exist. Only the
/// rating aggregator writes it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movie {
    pub guid: String,
    pub title: String,
    pub description: String,
    pub director: String,
    pub release_year: Option<i64>,
    pub duration_minutes: Option<i64>,
    pub age_rating: String,
    pub genre: String,
    pub image_url: String,
    pub trailer_url: String,
    pub average_rating: Option<f64>,
}

/// A (user, movie) list entry, optionally rated
///
/// At most one entry exists per pair. A NULL rating means "added but not
/// yet rated" and does not contribute to the movie's average.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ListEntry {
    pub user_guid: String,
    pub movie_guid: String,
    pub rating: Option<i64>,
}

/// A registered account
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub guid: String,
    pub username: String,
    pub password_hash: String,
    pub password_salt: String,
    pub is_admin: bool,
}
