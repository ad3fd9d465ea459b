//! cinelog-ui library - catalog web service
//!
//! HTTP surface for the cinelog movie catalog: sign-up/sign-in, the
//! administrator catalog CRUD, per-user lists with ratings, and search.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod db;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
///
/// Three layers of access: public (pages, health, sign-up/sign-in),
/// authenticated-user routes, and administrator-only catalog mutations.
/// Guarded routes redirect anonymous callers to /signin.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{delete, get, post, put};

    // Catalog mutations (administrator only)
    let admin = Router::new()
        .route("/api/movies", post(api::create_movie))
        .route("/api/movies/:movie_id", put(api::update_movie))
        .route("/api/movies/:movie_id", delete(api::delete_movie))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::require_admin,
        ));

    // Catalog reads, personal list and ratings (any authenticated user)
    let user = Router::new()
        .route("/api/auth/signout", post(api::signout))
        .route("/api/movies", get(api::list_movies))
        .route("/api/movies/search", get(api::search_catalog))
        .route("/api/movies/:movie_id", get(api::movie_detail))
        .route("/api/my-list", get(api::my_movies))
        .route("/api/my-list/search", get(api::search_my_movies))
        .route("/api/my-list/:movie_id", post(api::add_to_list))
        .route("/api/my-list/:movie_id", delete(api::remove_from_list))
        .route("/api/my-list/:movie_id/rating", put(api::rate_movie))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::require_user,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/signin", get(api::serve_signin))
        .route("/signup", get(api::serve_signup))
        .route("/api/auth/signup", post(api::signup))
        .route("/api/auth/signin", post(api::signin))
        .merge(api::health_routes());

    Router::new()
        .merge(admin)
        .merge(user)
        .merge(public)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
