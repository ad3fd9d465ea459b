//! Substring search over the catalog and over the caller's list
//!
//! An empty result is a success with an informational message, not an
//! error.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use cinelog_common::db::models::Movie;

use crate::api::ApiError;
use crate::db::sessions::SessionUser;
use crate::db::{catalog, list};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Title substring, matched case-insensitively
    #[serde(default)]
    pub term: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub term: String,
    pub total_results: usize,
    pub movies: Vec<Movie>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// GET /api/movies/search?term=
pub async fn search_catalog(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let movies = catalog::search_catalog(&state.db, &query.term).await?;
    Ok(Json(search_response(query.term, movies)))
}

/// GET /api/my-list/search?term=
pub async fn search_my_movies(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let movies = list::search_within_user_list(&state.db, &user.guid, &query.term).await?;
    Ok(Json(search_response(query.term, movies)))
}

fn search_response(term: String, movies: Vec<Movie>) -> SearchResponse {
    let message = if movies.is_empty() {
        Some("No results found.".to_string())
    } else {
        None
    };

    SearchResponse {
        term,
        total_results: movies.len(),
        movies,
        message,
    }
}
