use courtside_protocol::{Team, TeamId, TeamInput};
use courtside_transport::{HttpRequest, Method, Transport};

use crate::{ApiClient, CourtsideError};

const BASE: &str = "/admin/teams";

/// `/admin/teams` CRUD. Requires a login.
pub struct AdminTeams<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AdminTeams<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Team>, CourtsideError> {
        self.client.fetch(HttpRequest::get(BASE)).await
    }

    pub async fn get(&self, id: TeamId) -> Result<Team, CourtsideError> {
        self.client
            .fetch(HttpRequest::get(format!("{BASE}/{id}")))
            .await
    }

    pub async fn create(&self, input: &TeamInput) -> Result<Team, CourtsideError> {
        let request = self.client.json_request(Method::Post, BASE.into(), input)?;
        self.client.fetch(request).await
    }

    pub async fn update(
        &self,
        id: TeamId,
        input: &TeamInput,
    ) -> Result<Team, CourtsideError> {
        let request =
            self.client
                .json_request(Method::Put, format!("{BASE}/{id}"), input)?;
        self.client.fetch(request).await
    }

    /// Deleting a team the backend no longer has is an error (404).
    pub async fn delete(&self, id: TeamId) -> Result<(), CourtsideError> {
        self.client
            .execute(HttpRequest::delete(format!("{BASE}/{id}")))
            .await?;
        Ok(())
    }
}
