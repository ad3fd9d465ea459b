//! Access guard middleware
//!
//! Classifies the caller from the session token (Authorization bearer or
//! cookie) into anonymous, authenticated user, or administrator, and gates
//! routes accordingly. Anonymous callers are redirected to /signin; so are
//! non-administrators on administrator routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::api::ApiError;
use crate::db::sessions::{self, SessionUser};
use crate::AppState;

/// Name of the session cookie issued on sign-in
pub const SESSION_COOKIE: &str = "cinelog_session";

/// Raw session token of the authenticated caller, for sign-out
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Require an authenticated user
///
/// On success the handler finds a [`SessionUser`] and [`SessionToken`] in
/// the request extensions.
pub async fn require_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (user, token) = authenticate(&state, request.headers()).await?;

    request.extensions_mut().insert(user);
    request.extensions_mut().insert(SessionToken(token));

    Ok(next.run(request).await)
}

/// Require an authenticated administrator
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (user, token) = authenticate(&state, request.headers()).await?;

    if !user.is_admin {
        warn!("User '{}' attempted an administrator operation", user.username);
        return Err(ApiError::SignInRequired);
    }

    request.extensions_mut().insert(user);
    request.extensions_mut().insert(SessionToken(token));

    Ok(next.run(request).await)
}

/// Resolve the request's session token to a live session
async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(SessionUser, String), ApiError> {
    let token = extract_token(headers).ok_or(ApiError::SignInRequired)?;

    let user = sessions::lookup(&state.db, &token)
        .await?
        .ok_or(ApiError::SignInRequired)?;

    Ok((user, token))
}

/// Pull the session token from `Authorization: Bearer` or the session cookie
fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(token) = auth.strip_prefix("Bearer ") {
            return Some(token.trim().to_string());
        }
    }

    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .map(|token| token.to_string())
}
