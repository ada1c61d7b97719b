use courtside_protocol::{AuthResponse, LoginRequest};
use courtside_transport::{Method, Transport};

use crate::{ApiClient, CourtsideError};

/// `/auth` endpoints.
pub struct AuthApi<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AuthApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// `POST /auth/login`.
    ///
    /// Only exchanges credentials; it does not touch the session. Use
    /// [`ApiClient::login`] to log in and remember the result.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, CourtsideError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        tracing::debug!(%email, "logging in");
        let request =
            self.client
                .json_request(Method::Post, "/auth/login".into(), &body)?;
        self.client.fetch(request).await
    }
}
