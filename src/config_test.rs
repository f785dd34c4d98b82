use super::*;

#[test]
fn defaults_apply_when_env_is_absent() {
    let cfg = ClientConfig::from_raw(None, None);
    assert_eq!(cfg.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.timeout, Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS));
    assert_eq!(cfg.content_type, JSON_CONTENT_TYPE);
    assert_eq!(ClientConfig::default(), cfg);
}

#[test]
fn base_url_trailing_slashes_are_trimmed() {
    let cfg = ClientConfig::from_raw(Some("https://sched.example.test/api/v1//"), None);
    assert_eq!(cfg.base_url, "https://sched.example.test/api/v1");
}

#[test]
fn blank_base_url_falls_back_to_default() {
    let cfg = ClientConfig::from_raw(Some("   "), None);
    assert_eq!(cfg.base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn timeout_override_is_parsed() {
    let cfg = ClientConfig::from_raw(None, Some("1500"));
    assert_eq!(cfg.timeout, Duration::from_millis(1500));
}

#[test]
fn invalid_or_zero_timeout_falls_back_to_default() {
    let default = Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS);
    assert_eq!(ClientConfig::from_raw(None, Some("soon")).timeout, default);
    assert_eq!(ClientConfig::from_raw(None, Some("0")).timeout, default);
}

#[test]
fn endpoint_joins_with_single_slash() {
    let cfg = ClientConfig::from_raw(Some("/api/v1/"), None);
    assert_eq!(cfg.endpoint("/auth/login"), "/api/v1/auth/login");
    assert_eq!(cfg.endpoint("task/7"), "/api/v1/task/7");
}
