//! HTTP API handlers for cinelog-ui

pub mod account;
pub mod auth;
pub mod catalog;
pub mod error;
pub mod health;
pub mod list;
pub mod search;
pub mod ui;

pub use account::{signin, signout, signup};
pub use auth::{require_admin, require_user};
pub use catalog::{create_movie, delete_movie, list_movies, movie_detail, update_movie};
pub use error::ApiError;
pub use health::health_routes;
pub use list::{add_to_list, my_movies, rate_movie, remove_from_list};
pub use search::{search_catalog, search_my_movies};
pub use ui::{serve_index, serve_signin, serve_signup};
