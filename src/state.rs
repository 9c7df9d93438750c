//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the catalog client and a map of live sessions. Each session owns
//! its own cart store and display preference. There is no database: a
//! session's state is discarded when the session ends, and the cart goes
//! with it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, mpsc};

use crate::cart::CartStore;
use crate::services::activity::ActivityEvent;
use crate::services::catalog::CatalogClient;
use crate::services::session::{DEFAULT_SESSION_TTL_SECS, env_parse};

// =============================================================================
// THEME
// =============================================================================

/// Display preference. Stored values are validated against this enumeration;
/// anything else is rejected rather than coerced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Parse stored text against the known values. `None` for anything else.
    #[must_use]
    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

fn default_theme_from_env() -> Theme {
    std::env::var("DEFAULT_THEME")
        .ok()
        .and_then(|raw| Theme::from_stored(raw.trim()))
        .unwrap_or_default()
}

// =============================================================================
// SESSION STATE
// =============================================================================

/// Per-session live state. Created empty at session start; nothing here
/// survives logout or TTL expiry.
pub struct SessionState {
    pub cart: CartStore,
    pub theme: Theme,
    /// Username recorded by the login gate. `None` until login.
    pub user: Option<String>,
    /// Checked lazily on access and swept by the background task.
    pub expires_at: Instant,
}

impl SessionState {
    #[must_use]
    pub fn new(ttl: Duration, theme: Theme) -> Self {
        Self { cart: CartStore::new(), theme, user: None, expires_at: Instant::now() + ttl }
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogClient,
    pub sessions: Arc<RwLock<HashMap<String, SessionState>>>,
    /// Global sink for cart mutation events; drained by the activity task.
    pub activity: mpsc::UnboundedSender<ActivityEvent>,
    pub session_ttl: Duration,
    pub default_theme: Theme,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: CatalogClient, activity: mpsc::UnboundedSender<ActivityEvent>) -> Self {
        let ttl_secs = env_parse("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS);
        Self {
            catalog,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            activity,
            session_ttl: Duration::from_secs(ttl_secs),
            default_theme: default_theme_from_env(),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_from_stored_accepts_known_values() {
        assert_eq!(Theme::from_stored("light"), Some(Theme::Light));
        assert_eq!(Theme::from_stored("dark"), Some(Theme::Dark));
    }

    #[test]
    fn theme_from_stored_rejects_anything_else() {
        assert_eq!(Theme::from_stored("blue"), None);
        assert_eq!(Theme::from_stored("Dark"), None);
        assert_eq!(Theme::from_stored(""), None);
    }

    #[test]
    fn theme_default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn theme_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        let restored: Theme = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(restored, Theme::Dark);
    }

    #[test]
    fn session_state_starts_empty_and_anonymous() {
        let session = SessionState::new(Duration::from_secs(60), Theme::Dark);
        assert!(session.cart.lines().is_empty());
        assert_eq!(session.cart.total_price(), 0);
        assert!(session.user.is_none());
        assert!(session.expires_at > Instant::now());
    }

    #[tokio::test]
    async fn app_state_starts_with_no_sessions() {
        let state = test_helpers::test_app_state();
        assert!(state.sessions.read().await.is_empty());
    }
}
