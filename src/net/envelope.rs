//! The uniform `{code, message, data}` wrapper around every server response.
//!
//! DESIGN
//! ======
//! Classification runs on [`RawEnvelope`] (untyped `data`) so a response can
//! be judged before the caller's payload type is known. Only business success
//! is converted into a typed [`Envelope`].

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::{Deserialize, Deserializer, Serialize};

/// Business success.
pub const SUCCESS_CODE: i64 = 0;

/// Business codes meaning the caller's credentials are no longer valid:
/// unauthorized, token expired, token invalid.
pub const AUTH_INVALID_CODES: [i64; 3] = [401, 10005, 10006];

/// Whether `code` is one of the reserved auth-invalid business codes.
pub fn is_auth_invalid_code(code: i64) -> bool {
    AUTH_INVALID_CODES.contains(&code)
}

/// A response envelope whose `data` has been decoded into `T`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    pub message: String,
    pub data: T,
}

/// A response envelope with `data` left as raw JSON.
///
/// Error envelopes omit `data`, and some servers omit `message` on success,
/// so both default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEnvelope {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl RawEnvelope {
    /// Parse a response body, returning `None` when it is not an envelope.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Decode `data` into the caller's payload type.
    ///
    /// # Errors
    ///
    /// Returns the serde error text when `data` does not match `T`.
    pub fn into_typed<T: serde::de::DeserializeOwned>(self) -> Result<Envelope<T>, String> {
        let data = serde_json::from_value(self.data).map_err(|e| e.to_string())?;
        Ok(Envelope { code: self.code, message: self.message, data })
    }
}

/// A paginated collection nested in `data`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PageResult<T> {
    #[serde(deserialize_with = "null_as_empty")]
    pub list: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
