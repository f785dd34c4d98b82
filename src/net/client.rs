//! Authenticated request pipeline shared by every endpoint wrapper.
//!
//! ARCHITECTURE
//! ============
//! `ApiClient` wraps a [`Transport`] with two stages:
//!
//! - outbound: snapshot the session token and attach it as a bearer header.
//!   Runs synchronously before the request leaves; never mutates the session.
//! - inbound: classify the result exactly once (see [`classify`]) and react:
//!   notices for business and transport errors, a spawned re-auth prompt for
//!   auth-invalid envelopes, and an immediate forced logout for HTTP 401.
//!   Neither reaction holds up the failing call: the prompt and the server
//!   logout run as spawned tasks.
//!
//! The two auth-failure paths differ: an auth-invalid envelope asks before
//! logging out, an HTTP 401 does not. Keep them as separate branches until
//! product review settles which one is intended.
//!
//! ERROR HANDLING
//! ==============
//! Callers always get `Err` for anything but business success. Presentation
//! is done here, so callers only handle flow ("did this action succeed").

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::rc::Rc;

use futures::task::{LocalSpawn, LocalSpawnExt};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api;
use super::envelope::Envelope;
use super::error::{ApiError, MSG_MALFORMED, TransportError};
use super::inbound::{Outcome, classify};
use super::transport::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::config::ClientConfig;
use crate::routes::LOGIN_PATH;
use crate::state::session::SessionStore;
use crate::util::feedback::{ConfirmPrompt, NoticeLevel, Notifier, Prompter};
use crate::util::navigation::Navigator;

/// Presentation and scheduling capabilities the inbound stage reacts through.
#[derive(Clone)]
pub struct UiHooks {
    pub notifier: Rc<dyn Notifier>,
    pub prompter: Rc<dyn Prompter>,
    pub navigator: Rc<dyn Navigator>,
    /// Runs the re-auth prompt without holding up the failing call.
    pub spawner: Rc<dyn LocalSpawn>,
}

/// Configured request sender. Cheap to clone; clones share all state.
#[derive(Clone)]
pub struct ApiClient {
    config: Rc<ClientConfig>,
    session: SessionStore,
    transport: Rc<dyn Transport>,
    hooks: UiHooks,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: SessionStore, transport: Rc<dyn Transport>, hooks: UiHooks) -> Self {
        Self { config: Rc::new(config), session, transport, hooks }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] for any non-success classification.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ApiError> {
        self.execute(HttpMethod::Get, path, Vec::new(), None).await
    }

    /// `GET` with `query` flattened into `key=value` pairs; `None` fields are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `query` is not a flat object, otherwise
    /// any non-success classification.
    pub async fn get_with<T, Q>(&self, path: &str, query: &Q) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let query = query_pairs(query)?;
        self.execute(HttpMethod::Get, path, query, None).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized, otherwise
    /// any non-success classification.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        self.execute(HttpMethod::Post, path, Vec::new(), Some(body)).await
    }

    /// `POST` without a body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for any non-success classification.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ApiError> {
        self.execute(HttpMethod::Post, path, Vec::new(), None).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized, otherwise
    /// any non-success classification.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        self.execute(HttpMethod::Put, path, Vec::new(), Some(body)).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] for any non-success classification.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ApiError> {
        self.execute(HttpMethod::Delete, path, Vec::new(), None).await
    }

    /// Send through the outbound stage but skip inbound reactions: no
    /// notices, no prompts, no forced logout. Used for best-effort calls
    /// that must not re-enter the session lifecycle.
    ///
    /// # Errors
    ///
    /// Returns the classification as an [`ApiError`] without reacting to it.
    pub async fn send_quiet(&self, method: HttpMethod, path: &str) -> Result<(), ApiError> {
        let request = self.outbound(method, path, Vec::new(), None);
        let result = self.transport.send(request).await;
        classify(result).into_result().map(|_| ())
    }

    /// Outbound stage: build the request around the current token snapshot.
    pub fn outbound(
        &self,
        method: HttpMethod,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<String>,
    ) -> HttpRequest {
        let session = self.session.snapshot();
        let mut headers = vec![("Content-Type".to_owned(), self.config.content_type.to_owned())];
        if let Some(token) = session.token() {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        HttpRequest { method, url: self.config.endpoint(path), query, headers, body }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<String>,
    ) -> Result<Envelope<T>, ApiError> {
        let request = self.outbound(method, path, query, body);
        log::debug!("{} {}", method.as_str(), request.url);
        let result = self.transport.send(request).await;
        self.inbound(result).await
    }

    /// Inbound stage: classify once, react once, return the caller's result.
    async fn inbound<T: DeserializeOwned>(
        &self,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<Envelope<T>, ApiError> {
        let outcome = classify(result);
        match &outcome {
            Outcome::Success(_) => {}
            Outcome::AuthInvalid { code, .. } => {
                log::warn!("auth-invalid business code {code}");
                self.prompt_reauth();
            }
            Outcome::Business { code, message } => {
                log::warn!("business error {code}: {message}");
                self.hooks.notifier.notify(NoticeLevel::Error, message);
            }
            Outcome::Transport(err) => {
                log::warn!("transport failure: {err}");
                self.hooks.notifier.notify(NoticeLevel::Error, &err.notice());
                if err.status() == Some(401) {
                    self.force_logout();
                }
            }
            Outcome::Malformed(detail) => {
                log::error!("{detail}");
                self.hooks.notifier.notify(NoticeLevel::Error, MSG_MALFORMED);
            }
        }

        outcome.into_result()?.into_typed().map_err(|detail| {
            log::error!("response data did not match the expected shape: {detail}");
            self.hooks.notifier.notify(NoticeLevel::Error, MSG_MALFORMED);
            ApiError::Decode(detail)
        })
    }

    /// Auth-invalid envelope: ask, and only on confirmation log out and go
    /// to login. Spawned so the failing call returns without waiting.
    fn prompt_reauth(&self) {
        let client = self.clone();
        let task = async move {
            if client.hooks.prompter.confirm(&ConfirmPrompt::session_expired()).await {
                client.session.logout(&client).await;
                client.hooks.navigator.navigate(LOGIN_PATH);
            } else {
                log::info!("re-authentication declined; session kept");
            }
        };
        if let Err(err) = self.hooks.spawner.spawn_local(task) {
            log::error!("could not schedule re-auth prompt: {err}");
        }
    }

    /// HTTP 401: clear the session and go to login without asking. The
    /// server logout is spawned afterwards and carries the token it ends.
    fn force_logout(&self) {
        let ending = self.session.snapshot();
        let request = self.outbound(HttpMethod::Post, api::LOGOUT_ENDPOINT, Vec::new(), None);
        self.session.clear();
        self.hooks.navigator.navigate(LOGIN_PATH);
        if !ending.is_authenticated() {
            return;
        }

        let transport = Rc::clone(&self.transport);
        let task = async move {
            if let Err(err) = classify(transport.send(request).await).into_result() {
                log::debug!("server logout after 401 failed: {err}");
            }
        };
        if let Err(err) = self.hooks.spawner.spawn_local(task) {
            log::error!("could not schedule server logout: {err}");
        }
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| {
        log::error!("request body could not be encoded: {e}");
        ApiError::Encode(e.to_string())
    })
}

/// Flatten a serializable query object into `key=value` pairs.
///
/// # Errors
///
/// Returns [`ApiError::Encode`] when `query` is not an object (or unit).
pub fn query_pairs<Q: Serialize + ?Sized>(query: &Q) -> Result<Vec<(String, String)>, ApiError> {
    use serde_json::Value;

    let value = serde_json::to_value(query).map_err(|e| ApiError::Encode(e.to_string()))?;
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => Ok(map
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(s) => Some((key, s)),
                other => Some((key, other.to_string())),
            })
            .collect()),
        other => Err(ApiError::Encode(format!("query must be an object, got {other}"))),
    }
}
