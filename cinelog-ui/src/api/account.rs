//! Account handlers: sign-up, sign-in, sign-out

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use cinelog_common::auth::verify_password;

use crate::api::auth::{SessionToken, SESSION_COOKIE};
use crate::api::ApiError;
use crate::db::{sessions, users};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

/// Session established by sign-up or sign-in
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub username: String,
    pub is_admin: bool,
}

#[derive(Debug, Serialize)]
pub struct SignoutResponse {
    pub confirmation: String,
}

/// POST /api/auth/signup
///
/// Creates an account iff the passwords match and the username is free,
/// then signs the new user in. Mismatch and taken-username are distinct,
/// user-visible failures; neither creates a row.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = request.username.trim();
    if username.is_empty() || request.password.is_empty() {
        return Err(ApiError::Validation(
            "Please provide a username and password.".to_string(),
        ));
    }
    if request.password != request.confirm_password {
        return Err(ApiError::Validation("Password did not match.".to_string()));
    }

    // The unique constraint on username decides the race between identical
    // concurrent sign-ups; the loser surfaces as a conflict, never a 500.
    let user = users::create_user(&state.db, username, &request.password).await?;
    info!("Created user '{}'", user.username);

    let token = sessions::create_session(&state.db, &user.guid).await?;

    Ok(session_created(token, user.username, user.is_admin))
}

/// POST /api/auth/signin
///
/// The failure message never discloses whether the username or the
/// password was wrong.
pub async fn signin(
    State(state): State<AppState>,
    Json(request): Json<SigninRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = users::find_by_username(&state.db, request.username.trim())
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&request.password, &user.password_salt, &user.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let token = sessions::create_session(&state.db, &user.guid).await?;
    info!("User '{}' signed in", user.username);

    Ok(session_created(token, user.username, user.is_admin))
}

/// POST /api/auth/signout
///
/// Deletes the session and expires the cookie; the caller is anonymous
/// afterwards.
pub async fn signout(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> Result<impl IntoResponse, ApiError> {
    sessions::delete_session(&state.db, &token.0).await?;

    let headers = [(
        header::SET_COOKIE,
        format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE),
    )];

    Ok((
        headers,
        Json(SignoutResponse {
            confirmation: "Signed out.".to_string(),
        }),
    ))
}

fn session_created(token: String, username: String, is_admin: bool) -> impl IntoResponse {
    let headers = [(
        header::SET_COOKIE,
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, token
        ),
    )];

    (
        StatusCode::OK,
        headers,
        Json(SessionResponse {
            token,
            username,
            is_admin,
        }),
    )
}
