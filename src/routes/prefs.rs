//! Display preference routes.
//!
//! The stored value is validated against the known `light`/`dark`
//! enumeration on the way in; arbitrary text is rejected, never coerced.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use super::auth::SessionAuth;
use crate::state::{AppState, Theme};

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeBody {
    pub theme: String,
}

/// `GET /api/prefs/theme` — the session's display preference.
pub async fn get_theme(State(state): State<AppState>, auth: SessionAuth) -> Result<Json<ThemeBody>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&auth.token).ok_or(StatusCode::UNAUTHORIZED)?;
    Ok(Json(ThemeBody { theme: session.theme.as_str().to_owned() }))
}

/// `PUT /api/prefs/theme` — set the preference.
pub async fn set_theme(
    State(state): State<AppState>,
    auth: SessionAuth,
    Json(body): Json<ThemeBody>,
) -> Response {
    let Some(theme) = Theme::from_stored(&body.theme) else {
        return (StatusCode::UNPROCESSABLE_ENTITY, "theme must be \"light\" or \"dark\"").into_response();
    };

    let mut sessions = state.sessions.write().await;
    let Some(session) = sessions.get_mut(&auth.token) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    session.theme = theme;
    Json(ThemeBody { theme: theme.as_str().to_owned() }).into_response()
}
