//! Catalog store: movie CRUD and substring search

use cinelog_common::db::models::Movie;
use cinelog_common::{Error, Result};
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Administrator-supplied movie fields
///
/// Everything except the derived `average_rating`, which only the rating
/// aggregator writes.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieFields {
    pub title: String,
    pub description: String,
    pub director: String,
    pub release_year: Option<i64>,
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub age_rating: String,
    pub genre: String,
    pub image_url: String,
    pub trailer_url: String,
}

impl MovieFields {
    /// Validate form input before any write
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty()
            || self.director.trim().is_empty()
            || self.genre.trim().is_empty()
        {
            return Err(Error::InvalidInput("Please provide valid data.".to_string()));
        }

        if let Some(year) = self.release_year {
            // First films date to 1888
            if !(1888..=2100).contains(&year) {
                return Err(Error::InvalidInput(
                    "Release year is out of range.".to_string(),
                ));
            }
        }

        if let Some(minutes) = self.duration_minutes {
            if minutes <= 0 {
                return Err(Error::InvalidInput(
                    "Duration must be a positive number of minutes.".to_string(),
                ));
            }
        }

        for url in [&self.image_url, &self.trailer_url] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::InvalidInput(
                    "Image and trailer must be http(s) URLs.".to_string(),
                ));
            }
        }

        Ok(())
    }
}

const MOVIE_COLUMNS: &str = "guid, title, description, director, release_year, \
     duration_minutes, age_rating, genre, image_url, trailer_url, average_rating";

/// Create a movie (administrator operation)
pub async fn create_movie(pool: &SqlitePool, fields: &MovieFields) -> Result<Movie> {
    fields.validate()?;

    let guid = Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO movies (guid, title, description, director, release_year,
                            duration_minutes, age_rating, genre, image_url, trailer_url)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&guid)
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(&fields.director)
    .bind(fields.release_year)
    .bind(fields.duration_minutes)
    .bind(&fields.age_rating)
    .bind(&fields.genre)
    .bind(&fields.image_url)
    .bind(&fields.trailer_url)
    .execute(pool)
    .await?;

    get_movie(pool, &guid).await
}

/// Update a movie's catalog fields (administrator operation)
pub async fn update_movie(pool: &SqlitePool, guid: &str, fields: &MovieFields) -> Result<Movie> {
    fields.validate()?;

    let result = sqlx::query(
        r#"
        UPDATE movies
        SET title = ?, description = ?, director = ?, release_year = ?,
            duration_minutes = ?, age_rating = ?, genre = ?, image_url = ?,
            trailer_url = ?, updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(&fields.director)
    .bind(fields.release_year)
    .bind(fields.duration_minutes)
    .bind(&fields.age_rating)
    .bind(&fields.genre)
    .bind(&fields.image_url)
    .bind(&fields.trailer_url)
    .bind(guid)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("No movie with id {}", guid)));
    }

    get_movie(pool, guid).await
}

/// Delete a movie (administrator operation)
///
/// List entries referencing the movie go with it via the foreign-key
/// cascade.
pub async fn delete_movie(pool: &SqlitePool, guid: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM movies WHERE guid = ?")
        .bind(guid)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("No movie with id {}", guid)));
    }

    Ok(())
}

/// Fetch a single movie
pub async fn get_movie(pool: &SqlitePool, guid: &str) -> Result<Movie> {
    let movie: Option<Movie> =
        sqlx::query_as(&format!("SELECT {} FROM movies WHERE guid = ?", MOVIE_COLUMNS))
            .bind(guid)
            .fetch_optional(pool)
            .await?;

    movie.ok_or_else(|| Error::NotFound(format!("No movie with id {}", guid)))
}

/// Full catalog, title order
pub async fn list_catalog(pool: &SqlitePool) -> Result<Vec<Movie>> {
    let movies = sqlx::query_as(&format!(
        "SELECT {} FROM movies ORDER BY title COLLATE NOCASE ASC",
        MOVIE_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(movies)
}

/// Movies whose title contains `term`, case-insensitively, title order
///
/// The term is matched as a literal substring: LIKE wildcards in user
/// input are escaped. An empty term yields the empty result.
pub async fn search_catalog(pool: &SqlitePool, term: &str) -> Result<Vec<Movie>> {
    if term.trim().is_empty() {
        return Ok(Vec::new());
    }

    let movies = sqlx::query_as(&format!(
        r#"SELECT {} FROM movies WHERE title LIKE ? ESCAPE '\' ORDER BY title COLLATE NOCASE ASC"#,
        MOVIE_COLUMNS
    ))
    .bind(like_pattern(term))
    .fetch_all(pool)
    .await?;

    Ok(movies)
}

fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
