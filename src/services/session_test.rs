use super::*;
use crate::state::test_helpers;

// =============================================================================
// bytes_to_hex / generate_token
// =============================================================================

#[test]
fn bytes_to_hex_empty() {
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a]), "0a");
}

#[test]
fn bytes_to_hex_multi_byte() {
    assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_unset_returns_default() {
    assert_eq!(env_parse("__TEST_MB_EP_UNSET_41__", 7_u64), 7);
}

#[test]
fn env_parse_reads_valid_value() {
    let key = "__TEST_MB_EP_VALID_42__";
    unsafe { std::env::set_var(key, "120") };
    assert_eq!(env_parse(key, 7_u64), 120);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_invalid_value_returns_default() {
    let key = "__TEST_MB_EP_INVALID_43__";
    unsafe { std::env::set_var(key, "soon") };
    assert_eq!(env_parse(key, 7_u64), 7);
    unsafe { std::env::remove_var(key) };
}

// =============================================================================
// lifecycle
// =============================================================================

#[tokio::test]
async fn create_session_then_validate() {
    let state = test_helpers::test_app_state();
    let token = create_session(&state).await;
    assert!(validate_session(&state, &token).await);
}

#[tokio::test]
async fn create_session_starts_empty_and_anonymous() {
    let state = test_helpers::test_app_state();
    let token = create_session(&state).await;

    let sessions = state.sessions.read().await;
    let session = sessions.get(&token).unwrap();
    assert!(session.cart.lines().is_empty());
    assert!(session.user.is_none());
    assert_eq!(session.theme, state.default_theme);
}

#[tokio::test]
async fn validate_unknown_token_is_false() {
    let state = test_helpers::test_app_state();
    assert!(!validate_session(&state, "nope").await);
}

#[tokio::test]
async fn validate_expired_session_removes_it() {
    let state = test_helpers::test_app_state();
    let token = create_session(&state).await;
    {
        let mut sessions = state.sessions.write().await;
        sessions.get_mut(&token).unwrap().expires_at = Instant::now() - Duration::from_secs(1);
    }

    assert!(!validate_session(&state, &token).await);
    assert!(state.sessions.read().await.is_empty());
}

#[tokio::test]
async fn delete_session_removes_and_is_idempotent() {
    let state = test_helpers::test_app_state();
    let token = create_session(&state).await;

    delete_session(&state, &token).await;
    assert!(state.sessions.read().await.is_empty());

    // Second delete of the same token is a no-op.
    delete_session(&state, &token).await;
}

#[tokio::test]
async fn sweep_expired_prunes_only_expired_sessions() {
    let state = test_helpers::test_app_state();
    let live = create_session(&state).await;
    let stale = create_session(&state).await;
    {
        let mut sessions = state.sessions.write().await;
        sessions.get_mut(&stale).unwrap().expires_at = Instant::now() - Duration::from_secs(1);
    }

    sweep_expired(&state).await;

    let sessions = state.sessions.read().await;
    assert!(sessions.contains_key(&live));
    assert!(!sessions.contains_key(&stale));
}

// =============================================================================
// activity wiring
// =============================================================================

#[tokio::test]
async fn cart_mutations_reach_the_activity_channel() {
    let (state, mut rx) = test_helpers::test_app_state_with_activity();
    let token = create_session(&state).await;

    {
        let mut sessions = state.sessions.write().await;
        let session = sessions.get_mut(&token).unwrap();
        session.cart.add(test_helpers::dummy_line("7", 499, 1));
    }

    let activity = rx.recv().await.unwrap();
    assert_eq!(activity.session, &token[..8]);
    assert_eq!(
        activity.event,
        crate::cart::CartEvent::Added { id: "7".into(), quantity: 1 }
    );
}

#[tokio::test]
async fn noop_cart_mutations_produce_no_activity() {
    let (state, mut rx) = test_helpers::test_app_state_with_activity();
    let token = create_session(&state).await;

    {
        let mut sessions = state.sessions.write().await;
        let session = sessions.get_mut(&token).unwrap();
        session.cart.remove("ghost");
    }

    // Give the forwarder task a chance to run before checking.
    tokio::task::yield_now().await;
    assert!(rx.try_recv().is_err());
}
