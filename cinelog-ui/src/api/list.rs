//! Personal list handlers: add, remove, rate, list
//!
//! Every mutation here commits together with the movie's recomputed
//! average, so reads never observe a stale rating.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use cinelog_common::db::models::Movie;

use crate::api::ApiError;
use crate::db::list;
use crate::db::sessions::SessionUser;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub rating: i64,
}

#[derive(Debug, Serialize)]
pub struct AddToListResponse {
    pub created: bool,
    pub confirmation: String,
}

#[derive(Debug, Serialize)]
pub struct ListConfirmation {
    pub confirmation: String,
}

#[derive(Debug, Serialize)]
pub struct MyMoviesResponse {
    pub movies: Vec<Movie>,
}

/// POST /api/my-list/:movie_id
///
/// Get-or-create on the (user, movie) pair. An entry that already exists
/// is a conflict the caller renders as "already in your list" - never a
/// second edge, and the stored rating is left alone.
pub async fn add_to_list(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(movie_id): Path<String>,
) -> Result<Json<AddToListResponse>, ApiError> {
    let created = list::add_to_list(&state.db, &user.guid, &movie_id).await?;

    if !created {
        return Err(ApiError::Conflict(
            "This movie is already in your list.".to_string(),
        ));
    }

    Ok(Json(AddToListResponse {
        created,
        confirmation: "Movie successfully added.".to_string(),
    }))
}

/// DELETE /api/my-list/:movie_id
pub async fn remove_from_list(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(movie_id): Path<String>,
) -> Result<Json<ListConfirmation>, ApiError> {
    list::remove(&state.db, &user.guid, &movie_id).await?;

    Ok(Json(ListConfirmation {
        confirmation: "Movie successfully removed from your list.".to_string(),
    }))
}

/// PUT /api/my-list/:movie_id/rating
///
/// Rates the movie, adding it to the list first when absent.
pub async fn rate_movie(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(movie_id): Path<String>,
    Json(request): Json<RateRequest>,
) -> Result<Json<ListConfirmation>, ApiError> {
    list::rate(&state.db, &user.guid, &movie_id, request.rating).await?;

    Ok(Json(ListConfirmation {
        confirmation: "Movie rated with success.".to_string(),
    }))
}

/// GET /api/my-list
///
/// The caller's movies, title order.
pub async fn my_movies(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<MyMoviesResponse>, ApiError> {
    let movies = list::list_for_user(&state.db, &user.guid).await?;
    Ok(Json(MyMoviesResponse { movies }))
}
