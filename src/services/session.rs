//! Session bookkeeping — token generation, create/validate/delete, sweeping.
//!
//! ARCHITECTURE
//! ============
//! Sessions are held in memory only. A session starts anonymous, may be
//! marked authenticated by the login route, and disappears at logout or TTL
//! expiry — its cart goes with it. The login gate records a username but
//! verifies nothing; it is a gate, not an auth boundary.
//!
//! Each new session's cart is wired to the global activity channel through a
//! per-session forwarder task, so cart mutations show up in the structured
//! log tagged with the owning session.

use std::fmt::Write;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::services::activity::ActivityEvent;
use crate::state::{AppState, SessionState};

pub(crate) const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;
const DEFAULT_SESSION_SWEEP_INTERVAL_SECS: u64 = 60;

/// Length of the token prefix used to tag activity log entries.
const SESSION_TAG_LEN: usize = 8;

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex session token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// Start a session: fresh empty cart, default theme, anonymous. The cart is
/// subscribed to the activity log before the session becomes visible.
/// Returns the token.
pub async fn create_session(state: &AppState) -> String {
    let token = generate_token();
    let mut session = SessionState::new(state.session_ttl, state.default_theme);

    // Forward this cart's events into the global activity channel, tagged
    // with a short session prefix.
    let (tx, mut rx) = mpsc::unbounded_channel();
    session.cart.subscribe(tx);
    let activity = state.activity.clone();
    let tag = token[..SESSION_TAG_LEN].to_owned();
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if activity.send(ActivityEvent { session: tag.clone(), event }).is_err() {
                break;
            }
        }
    });

    let mut sessions = state.sessions.write().await;
    sessions.insert(token.clone(), session);
    debug!("session created");
    token
}

/// Check whether `token` names a live session. Expired sessions are removed
/// on the spot and reported as absent.
pub async fn validate_session(state: &AppState, token: &str) -> bool {
    let mut sessions = state.sessions.write().await;
    match sessions.get(token) {
        Some(s) if s.expires_at > Instant::now() => true,
        Some(_) => {
            sessions.remove(token);
            false
        }
        None => false,
    }
}

/// End a session, discarding its cart. No-op if absent.
pub async fn delete_session(state: &AppState, token: &str) {
    if state.sessions.write().await.remove(token).is_some() {
        debug!("session deleted");
    }
}

// =============================================================================
// SWEEPING
// =============================================================================

/// Spawn the background task that prunes expired sessions.
pub fn spawn_session_sweeper(state: AppState) -> JoinHandle<()> {
    let interval_secs = env_parse("SESSION_SWEEP_INTERVAL_SECS", DEFAULT_SESSION_SWEEP_INTERVAL_SECS);
    info!(interval_secs, "session sweep configured");
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(interval_secs)).await;
            sweep_expired(&state).await;
        }
    })
}

pub(crate) async fn sweep_expired(state: &AppState) {
    let now = Instant::now();
    let mut sessions = state.sessions.write().await;
    let before = sessions.len();
    sessions.retain(|_, s| s.expires_at > now);
    let removed = before - sessions.len();
    if removed > 0 {
        info!(removed, "expired sessions swept");
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
