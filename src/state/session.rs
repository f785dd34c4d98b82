//! Session store: the bearer token, the cached profile, and their lifecycle.
//!
//! SYSTEM CONTEXT
//! ==============
//! Built once in `App` from the persisted token and handed to the API client
//! and the route guard. It is the only writer of the session and of the
//! persisted token; everyone else reads [`SessionStore::snapshot`].
//!
//! DESIGN
//! ======
//! A [`Session`] is an immutable value. Every transition (login, profile
//! refresh, logout) builds the next value, persists its token, and swaps it
//! in as one step, so readers never observe a token from one session paired
//! with the profile of another.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::net::api;
use crate::net::client::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{LoginResult, UserProfile};
use crate::util::token_storage::TokenStorage;

/// The client-held token plus cached profile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    token: String,
    profile: Option<UserProfile>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session restored from storage: token known, profile not yet fetched.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: token.into(), profile: None }
    }

    pub fn authenticated(token: impl Into<String>, profile: UserProfile) -> Self {
        Self { token: token.into(), profile: Some(profile) }
    }

    /// Bearer token, or `None` when unauthenticated.
    pub fn token(&self) -> Option<&str> {
        if self.token.is_empty() { None } else { Some(&self.token) }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    fn with_profile(&self, profile: UserProfile) -> Self {
        Self { token: self.token.clone(), profile: Some(profile) }
    }
}

type Listener = Rc<dyn Fn(&Session)>;

struct StoreInner {
    current: RefCell<Rc<Session>>,
    storage: Rc<dyn TokenStorage>,
    listeners: RefCell<Vec<Listener>>,
}

/// Shared handle to the session. Clones refer to the same store.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<StoreInner>,
}

impl SessionStore {
    /// Build the store from whatever token `storage` holds.
    pub fn restore(storage: Rc<dyn TokenStorage>) -> Self {
        let session = storage.load().map(Session::with_token).unwrap_or_default();
        log::debug!("session restored (authenticated: {})", session.is_authenticated());
        Self {
            inner: Rc::new(StoreInner {
                current: RefCell::new(Rc::new(session)),
                storage,
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// The current session value. Later transitions do not affect it.
    pub fn snapshot(&self) -> Rc<Session> {
        Rc::clone(&self.inner.current.borrow())
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.current.borrow().is_authenticated()
    }

    /// Call `listener` after every transition that changes the session.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&Session) + 'static,
    {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Authenticate and, on success, replace the session with the returned
    /// token and profile.
    ///
    /// # Errors
    ///
    /// Propagates the client's [`ApiError`]; the session is left unchanged.
    pub async fn login(&self, client: &ApiClient, username: &str, password: &str) -> Result<Rc<Session>, ApiError> {
        let envelope = api::login(client, username, password).await?;
        let LoginResult { token, user } = envelope.data;
        log::info!("signed in as {}", user.username);
        self.transition(Session::authenticated(token, user));
        Ok(self.snapshot())
    }

    /// Refresh the cached profile for the current token.
    ///
    /// # Errors
    ///
    /// On failure the client's error is returned. The session is logged out
    /// only if it is still the one the request was sent for.
    pub async fn fetch_profile(&self, client: &ApiClient) -> Result<UserProfile, ApiError> {
        let dispatched = self.snapshot();
        match api::current_user(client).await {
            Ok(envelope) => {
                let current = self.snapshot();
                if current.token == dispatched.token {
                    self.transition(current.with_profile(envelope.data.clone()));
                } else {
                    log::debug!("discarding profile fetched for a replaced session");
                }
                Ok(envelope.data)
            }
            Err(err) => {
                let current = self.snapshot();
                if current.is_authenticated() && current.token == dispatched.token {
                    log::warn!("profile refresh failed, logging out: {err}");
                    self.logout(client).await;
                } else {
                    log::debug!("profile refresh failed for a session that already ended: {err}");
                }
                Err(err)
            }
        }
    }

    /// Best-effort server logout, then clear local state.
    ///
    /// Local state is cleared even if the server call fails or this future
    /// is dropped before it completes. Safe to call repeatedly.
    pub async fn logout(&self, client: &ApiClient) {
        let _clear = ClearOnDrop(self);
        if let Err(err) = api::logout(client).await {
            log::debug!("server logout failed, clearing locally anyway: {err}");
        }
    }

    /// Reset to an anonymous session without contacting the server.
    pub fn clear(&self) {
        self.transition(Session::anonymous());
    }

    /// Persist the next session's token and swap the value in as one step.
    fn transition(&self, next: Session) {
        let persisted = match next.token() {
            Some(token) => self.inner.storage.save(token),
            None => self.inner.storage.remove(),
        };
        if let Err(err) = persisted {
            log::warn!("token persistence failed: {err}");
        }

        let next = Rc::new(next);
        let changed = {
            let mut current = self.inner.current.borrow_mut();
            let changed = **current != *next;
            *current = Rc::clone(&next);
            changed
        };
        if !changed {
            return;
        }

        // Clone the list so listeners may subscribe or read the store.
        let listeners = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(&next);
        }
    }
}

struct ClearOnDrop<'a>(&'a SessionStore);

impl Drop for ClearOnDrop<'_> {
    fn drop(&mut self) {
        self.0.clear();
    }
}
