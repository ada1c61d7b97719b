use courtside_protocol::{PhotoUpload, Player, PlayerId, PlayerInput, TeamId};
use courtside_transport::{HttpRequest, Method, Transport};

use super::PHOTO_FIELD;
use crate::{ApiClient, CourtsideError};

const BASE: &str = "/admin/players";

/// `/admin/players` CRUD and photo upload. Requires a login.
///
/// There is no "list all players" endpoint; rosters are per team.
pub struct AdminPlayers<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AdminPlayers<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// `GET /admin/players/team/{teamId}`.
    pub async fn list_by_team(
        &self,
        team: TeamId,
    ) -> Result<Vec<Player>, CourtsideError> {
        self.client
            .fetch(HttpRequest::get(format!("{BASE}/team/{team}")))
            .await
    }

    pub async fn create(
        &self,
        input: &PlayerInput,
    ) -> Result<Player, CourtsideError> {
        let request = self.client.json_request(Method::Post, BASE.into(), input)?;
        self.client.fetch(request).await
    }

    pub async fn update(
        &self,
        id: PlayerId,
        input: &PlayerInput,
    ) -> Result<Player, CourtsideError> {
        let request =
            self.client
                .json_request(Method::Put, format!("{BASE}/{id}"), input)?;
        self.client.fetch(request).await
    }

    pub async fn delete(&self, id: PlayerId) -> Result<(), CourtsideError> {
        self.client
            .execute(HttpRequest::delete(format!("{BASE}/{id}")))
            .await?;
        Ok(())
    }

    /// `POST /admin/players/photo` (multipart). Returns the URL to store in
    /// [`PlayerInput::photo_url`].
    pub async fn upload_photo(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, CourtsideError> {
        let request = HttpRequest::post(format!("{BASE}/photo")).file(
            PHOTO_FIELD,
            file_name,
            content_type,
            data,
        );
        let upload: PhotoUpload = self.client.fetch(request).await?;
        Ok(upload.url)
    }
}
