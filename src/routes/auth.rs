//! Auth routes — session cookie plumbing and the login gate.
//!
//! The gate is deliberately shallow: any non-empty username/password pair
//! passes, nothing is verified, and the only durable effect is a username on
//! the session. It exists to model the original storefront's login screen,
//! not to be an auth boundary.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::services::session;
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    env_bool("COOKIE_SECURE").unwrap_or(false)
}

pub(crate) fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

// =============================================================================
// SESSION EXTRACTOR
// =============================================================================

/// Live session extracted from the session cookie.
/// Use as a handler parameter to require a session.
pub struct SessionAuth {
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for SessionAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        if !session::validate_session(&app_state, token).await {
            return Err(StatusCode::UNAUTHORIZED);
        }

        Ok(Self { token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/session` — start an anonymous session and set the cookie.
pub async fn start_session(State(state): State<AppState>) -> impl IntoResponse {
    let token = session::create_session(&state).await;
    let jar = CookieJar::new().add(session_cookie(token, cookie_secure()));
    (jar, StatusCode::CREATED)
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Both fields must be non-empty; nothing is verified beyond that.
pub(crate) fn login_fields_present(req: &LoginRequest) -> bool {
    !req.username.trim().is_empty() && !req.password.trim().is_empty()
}

/// `POST /api/auth/login` — mark the session authenticated, creating one if
/// the request carried no valid cookie.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Json(req): Json<LoginRequest>) -> Response {
    if !login_fields_present(&req) {
        return (StatusCode::UNPROCESSABLE_ENTITY, "username and password required").into_response();
    }

    // Reuse a live session when the cookie names one, otherwise start fresh.
    let existing = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
    let token = if !existing.is_empty() && session::validate_session(&state, existing).await {
        existing.to_owned()
    } else {
        session::create_session(&state).await
    };

    {
        let mut sessions = state.sessions.write().await;
        if let Some(session) = sessions.get_mut(&token) {
            session.user = Some(req.username.clone());
        }
    }

    tracing::info!(user = %req.username, "login");
    let jar = CookieJar::new().add(session_cookie(token, cookie_secure()));
    (jar, StatusCode::NO_CONTENT).into_response()
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    pub username: Option<String>,
}

/// `GET /api/auth/me` — whether this session has passed the login gate.
pub async fn me(State(state): State<AppState>, auth: SessionAuth) -> Result<Json<MeResponse>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&auth.token).ok_or(StatusCode::UNAUTHORIZED)?;
    Ok(Json(MeResponse { authenticated: session.user.is_some(), username: session.user.clone() }))
}

/// `POST /api/auth/logout` — end the session; the cart goes with it.
pub async fn logout(State(state): State<AppState>, auth: SessionAuth) -> impl IntoResponse {
    session::delete_session(&state, &auth.token).await;

    let cookie = Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO)
        .build();
    (CookieJar::new().add(cookie), StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
