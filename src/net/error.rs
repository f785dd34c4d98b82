//! Error taxonomy for the request pipeline.
//!
//! ERROR HANDLING
//! ==============
//! Every non-success classification ends as an [`ApiError`] returned to the
//! caller. User-facing notices are produced centrally by the inbound stage,
//! so callers only branch on these for flow decisions.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

pub const MSG_SESSION_EXPIRED: &str = "Session expired, please sign in again";
pub const MSG_REQUEST_FAILED: &str = "Request failed";
pub const MSG_UNAUTHORIZED: &str = "Unauthorized, please sign in again";
pub const MSG_ACCESS_DENIED: &str = "Access denied";
pub const MSG_NOT_FOUND: &str = "Request address not found";
pub const MSG_SERVER_ERROR: &str = "Internal server error";
pub const MSG_TIMEOUT: &str = "Request timed out";
pub const MSG_UNREACHABLE: &str = "Network connection failed";
pub const MSG_NETWORK_ERROR: &str = "Network error";
pub const MSG_MALFORMED: &str = "Malformed server response";

/// A request that produced no envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("http status {status}")]
    Status {
        status: u16,
        /// Envelope message carried by the error body, if it parsed.
        message: Option<String>,
    },
    /// No response within the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// The browser could not reach the server at all.
    #[error("network unreachable: {0}")]
    Unreachable(String),
    /// Any other failure below the HTTP layer.
    #[error("network error: {0}")]
    Other(String),
}

impl TransportError {
    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text shown to the user for this failure.
    pub fn notice(&self) -> String {
        match self {
            Self::Status { status: 401, .. } => MSG_UNAUTHORIZED.to_owned(),
            Self::Status { status: 403, .. } => MSG_ACCESS_DENIED.to_owned(),
            Self::Status { status: 404, .. } => MSG_NOT_FOUND.to_owned(),
            Self::Status { status: 500, .. } => MSG_SERVER_ERROR.to_owned(),
            Self::Status { message, .. } => message
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(MSG_REQUEST_FAILED)
                .to_owned(),
            Self::Timeout => MSG_TIMEOUT.to_owned(),
            Self::Unreachable(_) => MSG_UNREACHABLE.to_owned(),
            Self::Other(_) => MSG_NETWORK_ERROR.to_owned(),
        }
    }
}

/// Errors returned by [`ApiClient`](super::client::ApiClient) calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Envelope received with a nonzero, non-auth code.
    #[error("{message}")]
    Business { code: i64, message: String },
    /// Envelope received with one of the reserved auth-invalid codes.
    #[error("{message}")]
    AuthInvalid { code: i64, message: String },
    /// No envelope was received.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The outbound stage could not build the request; nothing was sent.
    #[error("request could not be prepared: {0}")]
    Encode(String),
    /// A 2xx body that is not an envelope or whose data has the wrong shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Business code carried by the envelope, if one was received.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Business { code, .. } | Self::AuthInvalid { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether this error means the session is no longer valid.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthInvalid { .. } | Self::Transport(TransportError::Status { status: 401, .. }))
    }
}
