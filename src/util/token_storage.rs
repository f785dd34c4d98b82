//! Durable slot holding the bearer token between page loads.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only the session store reads or writes this slot. The browser build keeps
//! it in `localStorage`; other builds (SSR, tests) use an in-memory slot.

#[cfg(test)]
#[path = "token_storage_test.rs"]
mod token_storage_test;

use std::cell::RefCell;

/// localStorage key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage write failed: {0}")]
    Write(String),
}

/// One durable key-value slot for the token.
pub trait TokenStorage {
    /// Stored token; empty strings read as absent.
    fn load(&self) -> Option<String>;

    /// # Errors
    ///
    /// Returns a [`StorageError`] if the slot cannot be written.
    fn save(&self, token: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns a [`StorageError`] if the slot cannot be cleared.
    fn remove(&self) -> Result<(), StorageError>;
}

/// In-memory slot for non-browser builds and tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    slot: RefCell<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn with_token(token: &str) -> Self {
        Self { slot: RefCell::new(Some(token.to_owned())) }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<String> {
        self.slot.borrow().clone().filter(|t| !t.is_empty())
    }

    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    fn save(&self, token: &str) -> Result<(), StorageError> {
        *self.slot.borrow_mut() = Some(token.to_owned());
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

/// `window.localStorage` slot under [`TOKEN_STORAGE_KEY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTokenStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().unwrap_or(None))
        .ok_or(StorageError::Unavailable)
}

impl TokenStorage for BrowserTokenStorage {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage().ok()?;
            storage.get_item(TOKEN_STORAGE_KEY).unwrap_or(None).filter(|t| !t.is_empty())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    fn save(&self, token: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .set_item(TOKEN_STORAGE_KEY, token)
                .map_err(|e| StorageError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(StorageError::Unavailable)
        }
    }

    fn remove(&self) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .remove_item(TOKEN_STORAGE_KEY)
                .map_err(|e| StorageError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(StorageError::Unavailable)
        }
    }
}
