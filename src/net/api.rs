//! Auth and account endpoints used by the session store.
//!
//! Each wrapper is a fixed path around [`ApiClient`]; classification and
//! notices happen in the client, not here.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::client::ApiClient;
use super::envelope::Envelope;
use super::error::ApiError;
use super::transport::HttpMethod;
use super::types::{ChangePasswordRequest, LoginRequest, LoginResult, UserProfile};

pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const LOGOUT_ENDPOINT: &str = "/auth/logout";
pub const CURRENT_USER_ENDPOINT: &str = "/user/current";
pub const CHANGE_PASSWORD_ENDPOINT: &str = "/user/password";

/// `POST /auth/login`.
///
/// # Errors
///
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<Envelope<LoginResult>, ApiError> {
    client.post(LOGIN_ENDPOINT, &LoginRequest { username, password }).await
}

/// `POST /auth/logout`, best-effort: no notices, no forced-logout reaction.
///
/// # Errors
///
/// Returns the unreacted classification so callers can log it.
pub async fn logout(client: &ApiClient) -> Result<(), ApiError> {
    client.send_quiet(HttpMethod::Post, LOGOUT_ENDPOINT).await
}

/// `GET /user/current`.
///
/// # Errors
///
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn current_user(client: &ApiClient) -> Result<Envelope<UserProfile>, ApiError> {
    client.get(CURRENT_USER_ENDPOINT).await
}

/// `POST /user/password`.
///
/// # Errors
///
/// Returns the client's [`ApiError`] for any non-success classification.
pub async fn change_password(client: &ApiClient, old_password: &str, new_password: &str) -> Result<(), ApiError> {
    client
        .post::<(), _>(CHANGE_PASSWORD_ENDPOINT, &ChangePasswordRequest { old_password, new_password })
        .await
        .map(|_| ())
}
