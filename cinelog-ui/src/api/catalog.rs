//! Catalog handlers
//!
//! Reads are open to any authenticated user; create/edit/delete are
//! reached only through the administrator guard.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use cinelog_common::db::models::Movie;

use crate::api::ApiError;
use crate::db::catalog::{self, MovieFields};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub movies: Vec<Movie>,
}

#[derive(Debug, Serialize)]
pub struct MovieMutationResponse {
    pub confirmation: String,
    pub movie: Movie,
}

#[derive(Debug, Serialize)]
pub struct ConfirmationResponse {
    pub confirmation: String,
}

/// GET /api/movies
///
/// Full catalog, title order.
pub async fn list_movies(
    State(state): State<AppState>,
) -> Result<Json<MoviesResponse>, ApiError> {
    let movies = catalog::list_catalog(&state.db).await?;
    Ok(Json(MoviesResponse { movies }))
}

/// GET /api/movies/:movie_id
pub async fn movie_detail(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let movie = catalog::get_movie(&state.db, &movie_id).await?;
    Ok(Json(movie))
}

/// POST /api/movies (administrator)
pub async fn create_movie(
    State(state): State<AppState>,
    Json(fields): Json<MovieFields>,
) -> Result<(StatusCode, Json<MovieMutationResponse>), ApiError> {
    let movie = catalog::create_movie(&state.db, &fields).await?;
    info!("Created movie '{}' ({})", movie.title, movie.guid);

    Ok((
        StatusCode::CREATED,
        Json(MovieMutationResponse {
            confirmation: "Successfully created movie.".to_string(),
            movie,
        }),
    ))
}

/// PUT /api/movies/:movie_id (administrator)
///
/// Edits catalog fields only; the derived average is never written here.
pub async fn update_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
    Json(fields): Json<MovieFields>,
) -> Result<Json<MovieMutationResponse>, ApiError> {
    let movie = catalog::update_movie(&state.db, &movie_id, &fields).await?;
    info!("Updated movie '{}' ({})", movie.title, movie.guid);

    Ok(Json(MovieMutationResponse {
        confirmation: "Successfully modified movie.".to_string(),
        movie,
    }))
}

/// DELETE /api/movies/:movie_id (administrator)
///
/// Cascades every list entry referencing the movie.
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<ConfirmationResponse>, ApiError> {
    catalog::delete_movie(&state.db, &movie_id).await?;
    info!("Deleted movie {}", movie_id);

    Ok(Json(ConfirmationResponse {
        confirmation: "Movie successfully removed.".to_string(),
    }))
}
