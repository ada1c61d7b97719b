//! `ApiClient` builder and request execution.
//!
//! This is the entry point for talking to the backend. It ties the layers
//! together: session controller → authorizer → transport.

use std::future::Future;
use std::sync::Arc;

use courtside_protocol::{Codec, JsonCodec};
use courtside_session::{
    CredentialStore, FileStorage, KeyValueStorage, MemoryStorage, Session,
    SessionController,
};
use courtside_transport::{
    AuthorizedTransport, HttpRequest, HttpResponse, Method, ReqwestTransport,
    Transport,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{
    AdminGames, AdminPlayers, AdminStaff, AdminTeams, AuthApi, PublicApi,
};
use crate::{ClientConfig, CourtsideError};

/// Longest backend error message carried into a [`CourtsideError::Status`].
const MAX_ERROR_MESSAGE: usize = 200;

/// Builder for configuring an [`ApiClient`].
///
/// # Example
///
/// ```rust,no_run
/// use courtside::prelude::*;
///
/// # fn run() -> Result<(), CourtsideError> {
/// let client = ApiClient::builder()
///     .config(ClientConfig::from_env()?)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ApiClientBuilder {
    config: ClientConfig,
    storage: Option<Arc<dyn KeyValueStorage>>,
}

impl ApiClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            storage: None,
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the backend base URL.
    pub fn base_url(mut self, url: &str) -> Self {
        self.config.base_url = url.to_string();
        self
    }

    /// Sets a whole-request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Uses an explicit storage backend, overriding `session_file`.
    pub fn storage(mut self, storage: impl KeyValueStorage) -> Self {
        self.storage = Some(Arc::new(storage));
        self
    }

    /// Builds a client over HTTP.
    pub fn build(self) -> Result<ApiClient<ReqwestTransport>, CourtsideError> {
        let transport = ReqwestTransport::with_timeout(
            &self.config.base_url,
            self.config.timeout,
        )?;
        Ok(self.build_with_transport(transport))
    }

    /// Builds a client over any transport (tests, offline fixtures).
    pub fn build_with_transport<T: Transport>(self, transport: T) -> ApiClient<T> {
        let storage: Arc<dyn KeyValueStorage> = match (self.storage, &self.config.session_file) {
            (Some(storage), _) => storage,
            (None, Some(path)) => Arc::new(FileStorage::new(path)),
            (None, None) => Arc::new(MemoryStorage::new()),
        };
        let store = CredentialStore::from_shared(
            storage,
            self.config.session.storage_key.clone(),
        );
        let session = Arc::new(SessionController::new(store, &self.config.session));
        ApiClient::new(transport, session)
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A client for the athletics backend.
///
/// Every request goes through an [`AuthorizedTransport`] reading from the
/// shared [`SessionController`], so logging in or out takes effect on the
/// very next call.
pub struct ApiClient<T: Transport = ReqwestTransport> {
    transport: AuthorizedTransport<T, Arc<SessionController>>,
    session: Arc<SessionController>,
    codec: JsonCodec,
}

impl ApiClient<ReqwestTransport> {
    /// Creates a new builder.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }
}

impl<T: Transport> ApiClient<T> {
    /// Wires a transport to an existing session controller.
    pub fn new(transport: T, session: Arc<SessionController>) -> Self {
        Self {
            transport: AuthorizedTransport::new(transport, Arc::clone(&session)),
            session,
            codec: JsonCodec,
        }
    }

    /// The session controller this client authorizes from.
    pub fn session(&self) -> &Arc<SessionController> {
        &self.session
    }

    pub fn auth(&self) -> AuthApi<'_, T> {
        AuthApi::new(self)
    }

    pub fn public(&self) -> PublicApi<'_, T> {
        PublicApi::new(self)
    }

    pub fn admin_teams(&self) -> AdminTeams<'_, T> {
        AdminTeams::new(self)
    }

    pub fn admin_players(&self) -> AdminPlayers<'_, T> {
        AdminPlayers::new(self)
    }

    pub fn admin_staff(&self) -> AdminStaff<'_, T> {
        AdminStaff::new(self)
    }

    pub fn admin_games(&self) -> AdminGames<'_, T> {
        AdminGames::new(self)
    }

    /// Logs in and records the session.
    ///
    /// A rejected login (401/403) leaves any existing session untouched.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, CourtsideError> {
        let response = self.auth().login(email, password).await?;
        Ok(self.session.login(response)?)
    }

    /// Logs out: clears the in-memory session and storage.
    pub fn logout(&self) -> Result<(), CourtsideError> {
        Ok(self.session.logout()?)
    }

    /// Runs `request` and drops its result if the session changed while
    /// it was in flight.
    ///
    /// The epoch is captured when `guarded` starts polling, which is when
    /// an `async fn` request actually starts, so a future created earlier
    /// and awaited here is still judged from the right point.
    pub async fn guarded<R>(
        &self,
        request: impl Future<Output = Result<R, CourtsideError>>,
    ) -> Result<R, CourtsideError> {
        let epoch = self.session.epoch();
        let result = request.await;
        if !self.session.is_current(epoch) {
            tracing::debug!(%epoch, "discarding response from a previous session");
            return Err(CourtsideError::Stale);
        }
        result
    }

    // -- request plumbing used by the api modules --

    /// Builds a request with a JSON body.
    pub(crate) fn json_request<B: Serialize>(
        &self,
        method: Method,
        path: String,
        body: &B,
    ) -> Result<HttpRequest, CourtsideError> {
        let data = self.codec.encode(body)?;
        Ok(HttpRequest::new(method, path)
            .header("Accept", self.codec.content_type())
            .body(self.codec.content_type(), data))
    }

    /// Sends a request and turns non-2xx statuses into errors.
    pub(crate) async fn execute(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, CourtsideError> {
        let method = request.method;
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        if response.is_success() {
            return Ok(response);
        }
        let status = response.status;
        let message = error_message(&response);
        tracing::debug!(%method, %path, status, %message, "request failed");
        Err(CourtsideError::Status {
            method,
            path,
            status,
            message,
        })
    }

    /// Sends a request and decodes the JSON response body.
    pub(crate) async fn fetch<R: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<R, CourtsideError> {
        let request = if request.headers.contains("Accept") {
            request
        } else {
            request.header("Accept", self.codec.content_type())
        };
        let response = self.execute(request).await?;
        Ok(self.codec.decode(&response.body)?)
    }
}

/// Extracts a human-readable message from an error response.
///
/// Prefers the backend's JSON `message` (then `error`) field; falls back
/// to the raw body, truncated.
fn error_message(response: &HttpResponse) -> String {
    let from_json = serde_json::from_slice::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|v| {
            ["message", "error"]
                .iter()
                .find_map(|k| v.get(*k).and_then(|m| m.as_str()).map(str::to_owned))
        })
        .filter(|m| !m.is_empty());

    let message = from_json.unwrap_or_else(|| response.text().trim().to_string());
    if message.is_empty() {
        return "no response body".to_string();
    }
    match message.char_indices().nth(MAX_ERROR_MESSAGE) {
        Some((cut, _)) => format!("{}…", &message[..cut]),
        None => message,
    }
}

// =========================================================================
// Tests
// =========================================================================
