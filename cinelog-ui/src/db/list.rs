//! Membership store and rating aggregator
//!
//! A list entry is the (user, movie) edge, optionally rated 1-5. Every
//! mutation runs in a transaction that also recomputes the movie's
//! average, so the catalog never exposes a stale or partially-updated
//! rating: concurrent raters of the same movie serialize on the write.

use std::collections::HashSet;

use cinelog_common::db::models::{ListEntry, Movie};
use cinelog_common::{Error, Result};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::db::catalog;

/// Recompute a movie's displayed rating from its list entries
///
/// The mean of all non-null ratings, or NULL when no rated entries remain.
/// SQL AVG ignores NULL ratings and yields NULL over the empty set, so
/// deleting the last rated entry nulls the average rather than leaving a
/// stale value. Must run inside the transaction of the triggering mutation.
pub async fn recompute_average(
    tx: &mut Transaction<'_, Sqlite>,
    movie_guid: &str,
) -> Result<Option<f64>> {
    let average: Option<f64> =
        sqlx::query_scalar("SELECT AVG(rating) FROM list_entries WHERE movie_guid = ?")
            .bind(movie_guid)
            .fetch_one(&mut **tx)
            .await?;

    sqlx::query(
        "UPDATE movies SET average_rating = ?, updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
    )
    .bind(average)
    .bind(movie_guid)
    .execute(&mut **tx)
    .await?;

    Ok(average)
}

/// Add a movie to a user's list
///
/// Get-or-create on the (user, movie) pair: a conditional insert against
/// the pair's unique constraint, not a read followed by a write, so
/// concurrent identical adds cannot create a second edge. Returns whether
/// a new entry was created; `false` means the movie was already listed.
pub async fn add_to_list(pool: &SqlitePool, user_guid: &str, movie_guid: &str) -> Result<bool> {
    let mut tx = pool.begin().await?;

    ensure_movie_exists(&mut tx, movie_guid).await?;

    let result = sqlx::query(
        r#"
        INSERT INTO list_entries (user_guid, movie_guid, rating)
        VALUES (?, ?, NULL)
        ON CONFLICT(user_guid, movie_guid) DO NOTHING
        "#,
    )
    .bind(user_guid)
    .bind(movie_guid)
    .execute(&mut *tx)
    .await?;

    let created = result.rows_affected() > 0;
    if created {
        recompute_average(&mut tx, movie_guid).await?;
    }
    tx.commit().await?;

    Ok(created)
}

/// Rate a movie, adding it to the user's list first when absent
///
/// Rejects ratings outside [1,5] before touching storage. The upsert and
/// the recompute commit as one unit.
pub async fn rate(
    pool: &SqlitePool,
    user_guid: &str,
    movie_guid: &str,
    rating: i64,
) -> Result<()> {
    if !(1..=5).contains(&rating) {
        return Err(Error::InvalidInput(
            "Rating must be between 1 and 5.".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    ensure_movie_exists(&mut tx, movie_guid).await?;

    sqlx::query(
        r#"
        INSERT INTO list_entries (user_guid, movie_guid, rating)
        VALUES (?, ?, ?)
        ON CONFLICT(user_guid, movie_guid)
        DO UPDATE SET rating = excluded.rating, updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(user_guid)
    .bind(movie_guid)
    .bind(rating)
    .execute(&mut *tx)
    .await?;

    recompute_average(&mut tx, movie_guid).await?;
    tx.commit().await?;

    Ok(())
}

/// Remove a movie from a user's list
///
/// Absent entries are a not-found signal; the movie's average is left
/// untouched in that case (the transaction never commits).
pub async fn remove(pool: &SqlitePool, user_guid: &str, movie_guid: &str) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM list_entries WHERE user_guid = ? AND movie_guid = ?")
        .bind(user_guid)
        .bind(movie_guid)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(
            "This movie is not on your list.".to_string(),
        ));
    }

    recompute_average(&mut tx, movie_guid).await?;
    tx.commit().await?;

    Ok(())
}

/// All movies on a user's list
///
/// Title order (case-insensitive) is applied here in application code,
/// not assumed from storage order.
pub async fn list_for_user(pool: &SqlitePool, user_guid: &str) -> Result<Vec<Movie>> {
    let mut movies: Vec<Movie> = sqlx::query_as(
        r#"
        SELECT m.guid, m.title, m.description, m.director, m.release_year,
               m.duration_minutes, m.age_rating, m.genre, m.image_url,
               m.trailer_url, m.average_rating
        FROM movies m
        JOIN list_entries e ON e.movie_guid = m.guid
        WHERE e.user_guid = ?
        "#,
    )
    .bind(user_guid)
    .fetch_all(pool)
    .await?;

    movies.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));

    Ok(movies)
}

/// A user's raw list entries
pub async fn entries_for_user(pool: &SqlitePool, user_guid: &str) -> Result<Vec<ListEntry>> {
    let entries = sqlx::query_as(
        "SELECT user_guid, movie_guid, rating FROM list_entries WHERE user_guid = ?",
    )
    .bind(user_guid)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// Search a user's list by title substring
///
/// Catalog matches first, then the user's entry set filtered down to the
/// matching ids - the result is always a subset of both the user's list
/// and the catalog search, in catalog (title) order.
pub async fn search_within_user_list(
    pool: &SqlitePool,
    user_guid: &str,
    term: &str,
) -> Result<Vec<Movie>> {
    let catalog_matches = catalog::search_catalog(pool, term).await?;

    let member_ids: HashSet<String> = entries_for_user(pool, user_guid)
        .await?
        .into_iter()
        .map(|entry| entry.movie_guid)
        .collect();

    Ok(catalog_matches
        .into_iter()
        .filter(|movie| member_ids.contains(&movie.guid))
        .collect())
}

async fn ensure_movie_exists(tx: &mut Transaction<'_, Sqlite>, movie_guid: &str) -> Result<()> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM movies WHERE guid = ?")
        .bind(movie_guid)
        .fetch_optional(&mut **tx)
        .await?;

    if exists.is_none() {
        return Err(Error::NotFound(format!("No movie with id {}", movie_guid)));
    }

    Ok(())
}
