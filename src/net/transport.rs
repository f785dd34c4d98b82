//! Raw HTTP exchange beneath the [`ApiClient`](super::client::ApiClient).
//!
//! Client-side (hydrate): real fetch calls via `gloo-net`, raced against a
//! `gloo-timers` timeout.
//! Elsewhere: [`OfflineTransport`]; tests inject their own.
//!
//! A [`Transport`] reports every HTTP response as `Ok`, whatever its status.
//! Only failures below HTTP (timeout, unreachable host) are `Err`.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use async_trait::async_trait;

use super::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully prepared request, as produced by the outbound stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute or base-relative URL, without query string.
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body text of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one prepared request.
#[async_trait(?Send)]
pub trait Transport {
    /// # Errors
    ///
    /// Returns a [`TransportError`] only when no HTTP response was obtained.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Browser `fetch` transport with a fixed per-request timeout.
#[cfg(feature = "hydrate")]
pub struct BrowserTransport {
    timeout_ms: u32,
}

#[cfg(feature = "hydrate")]
impl BrowserTransport {
    pub fn new(timeout: std::time::Duration) -> Self {
        let timeout_ms = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        Self { timeout_ms }
    }
}

#[cfg(feature = "hydrate")]
#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        use futures::future::{Either, select};
        use gloo_net::http::Request;

        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Put => Request::put(&request.url),
            HttpMethod::Delete => Request::delete(&request.url),
        };
        if !request.query.is_empty() {
            builder = builder.query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(map_gloo_error)?;

        let fetch = Box::pin(prepared.send());
        let timer = gloo_timers::future::TimeoutFuture::new(self.timeout_ms);
        let response = match select(fetch, timer).await {
            Either::Left((result, _)) => result.map_err(map_gloo_error)?,
            Either::Right(((), _)) => {
                log::warn!("{} {} timed out after {}ms", request.method.as_str(), request.url, self.timeout_ms);
                return Err(TransportError::Timeout);
            }
        };
        let status = response.status();
        let body = response.text().await.map_err(map_gloo_error)?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(feature = "hydrate")]
fn map_gloo_error(err: gloo_net::Error) -> TransportError {
    match err {
        // `fetch` rejects with a TypeError when the host cannot be reached.
        gloo_net::Error::JsError(js) => TransportError::Unreachable(js.to_string()),
        other => TransportError::Other(other.to_string()),
    }
}

/// Stand-in used when rendering outside the browser: every request fails
/// as unreachable.
#[cfg(not(feature = "hydrate"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineTransport;

#[cfg(not(feature = "hydrate"))]
#[async_trait(?Send)]
impl Transport for OfflineTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::Unreachable(format!("no network outside the browser: {}", request.url)))
    }
}

/// Transport for the current build target.
pub fn default_transport(config: &crate::config::ClientConfig) -> std::rc::Rc<dyn Transport> {
    #[cfg(feature = "hydrate")]
    {
        std::rc::Rc::new(BrowserTransport::new(config.timeout))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        log::debug!("using offline transport (timeout {:?} unused)", config.timeout);
        std::rc::Rc::new(OfflineTransport)
    }
}
