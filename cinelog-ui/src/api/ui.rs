//! Static page serving
//!
//! Minimal embedded pages; all state lives behind the JSON API.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../ui/index.html");
const SIGNIN_HTML: &str = include_str!("../ui/signin.html");
const SIGNUP_HTML: &str = include_str!("../ui/signup.html");

/// GET /
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /signin
///
/// Target of the guard's redirect for anonymous callers.
pub async fn serve_signin() -> Html<&'static str> {
    Html(SIGNIN_HTML)
}

/// GET /signup
pub async fn serve_signup() -> Html<&'static str> {
    Html(SIGNUP_HTML)
}
