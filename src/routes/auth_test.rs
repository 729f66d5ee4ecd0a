use super::*;

// =============================================================================
// env_bool — uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on"].iter().enumerate() {
        let key = format!("__TEST_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__TEST_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_case_insensitive() {
    for (i, val) in ["TRUE", "True", "YES", "On"].iter().enumerate() {
        let key = format!("__TEST_EB_CI_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_invalid_returns_none() {
    let key = "__TEST_EB_INVALID_314__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_unset_returns_none() {
    assert_eq!(env_bool("__TEST_EB_SURELY_UNSET_271__"), None);
}

#[test]
fn env_bool_whitespace_trimmed() {
    let key = "__TEST_EB_WS_161__";
    unsafe { std::env::set_var(key, "  true  ") };
    assert_eq!(env_bool(key), Some(true));
    unsafe { std::env::remove_var(key) };
}

// =============================================================================
// cookie_secure — COOKIE_SECURE and GOOGLE_REDIRECT_URI are shared globals,
// so the https inference is tested on the expression rather than by mutating
// the real vars under parallel tests.
// =============================================================================

#[test]
fn cookie_secure_https_inference_logic() {
    assert!("https://notes.example.com/auth/google/callback".starts_with("https://"));
    assert!(!"http://localhost:3000/auth/google/callback".starts_with("https://"));
}

// =============================================================================
// constants
// =============================================================================

#[test]
fn post_login_redirect_is_dashboard() {
    assert_eq!(POST_LOGIN_REDIRECT, "/dashboard");
}

#[test]
fn cookie_names_are_stable() {
    // The SPA and any deployed sessions depend on these names.
    assert_eq!(COOKIE_NAME, "session_token");
    assert_eq!(OAUTH_STATE_COOKIE_NAME, "oauth_state");
}
