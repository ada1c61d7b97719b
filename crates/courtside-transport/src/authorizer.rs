//! Request authorization: attaching the bearer token.
//!
//! Every outgoing request passes through [`AuthorizedTransport`]. It asks
//! its [`TokenSource`] for the current token and, if there is one, sets
//! `Authorization: Bearer <token>`. Without a token the request goes out
//! untouched and the backend decides what to do with it.
//!
//! There is no retry and no token refresh. A 401/403 coming back is
//! logged and handed to the caller as-is.

use crate::{HttpRequest, HttpResponse, TokenSource, Transport, TransportError};

/// Header the backend reads credentials from.
const AUTHORIZATION: &str = "Authorization";

/// Longest slice of a rejected response body that goes into the log.
const MAX_LOGGED_BODY: usize = 200;

/// Applies `token` to `request`.
///
/// With a token, sets (or replaces) the `Authorization` header and leaves
/// every other header alone. Without one, returns the request unchanged,
/// including any `Authorization` header the caller set explicitly.
pub fn authorize(mut request: HttpRequest, token: Option<&str>) -> HttpRequest {
    if let Some(token) = token {
        request.headers.set(AUTHORIZATION, format!("Bearer {token}"));
    }
    request
}

/// A [`Transport`] wrapper that authorizes every request.
///
/// `S` is usually `Arc<SessionController>`, so the wrapper always sees the
/// controller's current token without ever touching storage itself.
pub struct AuthorizedTransport<T: Transport, S: TokenSource> {
    inner: T,
    tokens: S,
}

impl<T: Transport, S: TokenSource> AuthorizedTransport<T, S> {
    pub fn new(inner: T, tokens: S) -> Self {
        Self { inner, tokens }
    }
}

impl<T: Transport, S: TokenSource> Transport for AuthorizedTransport<T, S> {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let token = self.tokens.bearer_token().filter(|t| !t.trim().is_empty());
        let method = request.method;
        let path = request.path.clone();

        tracing::debug!(
            %method,
            %path,
            authorized = token.is_some(),
            "sending request"
        );

        let response = self.inner.send(authorize(request, token.as_deref())).await?;

        if response.is_auth_failure() {
            tracing::warn!(
                %method,
                %path,
                status = response.status,
                authorized = token.is_some(),
                body = %body_excerpt(&response),
                "backend rejected credentials"
            );
        }

        Ok(response)
    }
}

/// The response body cut to [`MAX_LOGGED_BODY`] characters.
fn body_excerpt(response: &HttpResponse) -> String {
    let text = response.text();
    match text.char_indices().nth(MAX_LOGGED_BODY) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text,
    }
}
