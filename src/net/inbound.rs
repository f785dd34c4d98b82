//! Classification of completed requests.
//!
//! DESIGN
//! ======
//! `classify` is pure: it maps one transport result to exactly one
//! [`Outcome`]. Reactions (notices, logout, navigation) live in the client so
//! this ordering can be tested without any collaborators.
//!
//! Priority: an envelope on a 2xx response always wins; a non-2xx status is
//! a transport failure even when its body parses as an envelope.

#[cfg(test)]
#[path = "inbound_test.rs"]
mod inbound_test;

use super::envelope::{RawEnvelope, SUCCESS_CODE, is_auth_invalid_code};
use super::error::{ApiError, MSG_REQUEST_FAILED, TransportError};
use super::transport::HttpResponse;

/// Fallback message for auth-invalid envelopes without one.
pub const MSG_LOGIN_EXPIRED: &str = "Session expired";

/// How a response is classified. The first four variants are the console's
/// response contract; `Malformed` is an extra fifth outcome for 2xx bodies
/// that are not envelopes, reported as "malformed" rather than folded into
/// the business-error branch.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Envelope with `code == 0`.
    Success(RawEnvelope),
    /// Envelope with a reserved auth-invalid code.
    AuthInvalid { code: i64, message: String },
    /// Envelope with any other nonzero code.
    Business { code: i64, message: String },
    /// No envelope was received.
    Transport(TransportError),
    /// 2xx response whose body is not an envelope.
    Malformed(String),
}

pub fn classify(result: Result<HttpResponse, TransportError>) -> Outcome {
    let response = match result {
        Ok(response) => response,
        Err(err) => return Outcome::Transport(err),
    };

    if !response.is_success() {
        let message = RawEnvelope::parse(&response.body).map(|env| env.message);
        return Outcome::Transport(TransportError::Status { status: response.status, message });
    }

    let Some(envelope) = RawEnvelope::parse(&response.body) else {
        return Outcome::Malformed(format!("status {} body is not an envelope", response.status));
    };

    if envelope.code == SUCCESS_CODE {
        return Outcome::Success(envelope);
    }
    if is_auth_invalid_code(envelope.code) {
        return Outcome::AuthInvalid {
            code: envelope.code,
            message: message_or(envelope.message, MSG_LOGIN_EXPIRED),
        };
    }
    Outcome::Business { code: envelope.code, message: message_or(envelope.message, MSG_REQUEST_FAILED) }
}

fn message_or(message: String, fallback: &str) -> String {
    if message.is_empty() { fallback.to_owned() } else { message }
}

impl Outcome {
    /// Collapse into the caller-facing result, without any side effects.
    ///
    /// # Errors
    ///
    /// Every outcome other than [`Outcome::Success`] becomes an [`ApiError`].
    pub fn into_result(self) -> Result<RawEnvelope, ApiError> {
        match self {
            Self::Success(envelope) => Ok(envelope),
            Self::AuthInvalid { code, message } => Err(ApiError::AuthInvalid { code, message }),
            Self::Business { code, message } => Err(ApiError::Business { code, message }),
            Self::Transport(err) => Err(ApiError::Transport(err)),
            Self::Malformed(detail) => Err(ApiError::Decode(detail)),
        }
    }
}
