//! API client configuration baked in at build time.
//!
//! The console ships as a static WASM bundle, so settings come from the
//! build environment (`option_env!`) rather than from the runtime.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Fixed settings shared by every request the [`ApiClient`](crate::net::client::ApiClient) sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix joined in front of every endpoint path, without a trailing slash.
    pub base_url: String,
    /// Upper bound for a single request, enforced by the transport.
    pub timeout: Duration,
    /// `Content-Type` attached to every outbound request.
    pub content_type: &'static str,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_raw(None, None)
    }
}

impl ClientConfig {
    /// Build config from build-time environment variables.
    ///
    /// Optional:
    /// - `API_BASE_URL`: default `/api/v1`
    /// - `API_REQUEST_TIMEOUT_MS`: default 30000
    pub fn from_build_env() -> Self {
        Self::from_raw(option_env!("API_BASE_URL"), option_env!("API_REQUEST_TIMEOUT_MS"))
    }

    pub(crate) fn from_raw(base_url: Option<&str>, timeout_ms: Option<&str>) -> Self {
        let base_url = base_url
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();
        let timeout = Duration::from_millis(parse_u64(timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS));
        Self { base_url, timeout, content_type: JSON_CONTENT_TYPE }
    }

    /// Join `path` onto the base address.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

fn parse_u64(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}
