//! Transport abstraction layer for Courtside.
//!
//! Provides the [`Transport`] trait that abstracts over "something that
//! can send an [`HttpRequest`] and hand back an [`HttpResponse`]", and the
//! [`AuthorizedTransport`] wrapper that attaches the session's bearer
//! token to every outgoing request.
//!
//! ```text
//! API surface → AuthorizedTransport (adds Authorization) → ReqwestTransport → backend
//!                      ↑
//!                 TokenSource (the session controller)
//! ```
//!
//! # Feature Flags
//!
//! - `reqwest` (default): HTTP transport via `reqwest`

#![allow(async_fn_in_trait)]

mod authorizer;
mod error;
mod message;
#[cfg(feature = "reqwest")]
mod http;

pub use authorizer::{authorize, AuthorizedTransport};
pub use error::TransportError;
pub use message::{Body, Headers, HttpRequest, HttpResponse, Method};
#[cfg(feature = "reqwest")]
pub use http::ReqwestTransport;

use std::sync::Arc;

/// Sends requests to the backend.
///
/// Implementations resolve `request.path` against their own base URL.
/// A transport returns `Ok` for every response it receives, whatever the
/// status; `Err` means no response arrived at all.
pub trait Transport: Send + Sync + 'static {
    /// Sends the request and reads the whole response body.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, TransportError>>
           + Send;
}

/// Supplies the current bearer token.
///
/// The authorizer asks for the token on every request instead of caching
/// it, so a login or logout takes effect on the very next call. The
/// session controller implements this; tests can use a plain
/// `Option<String>`.
pub trait TokenSource: Send + Sync + 'static {
    /// Returns the token to send, or `None` to send the request
    /// without credentials.
    fn bearer_token(&self) -> Option<String>;
}

impl<S: TokenSource + ?Sized> TokenSource for Arc<S> {
    fn bearer_token(&self) -> Option<String> {
        (**self).bearer_token()
    }
}

impl TokenSource for Option<String> {
    fn bearer_token(&self) -> Option<String> {
        self.clone()
    }
}

impl<T: Transport> Transport for Arc<T> {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}
