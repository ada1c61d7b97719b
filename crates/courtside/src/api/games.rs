use courtside_protocol::{Game, GameId, GameInput};
use courtside_transport::{HttpRequest, Method, Transport};

use crate::{ApiClient, CourtsideError};

const BASE: &str = "/admin/games";

/// `/admin/games` CRUD. Requires a login.
///
/// The backend derives `win` from the two scores, so [`GameInput`] has no
/// such field.
pub struct AdminGames<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AdminGames<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Game>, CourtsideError> {
        self.client.fetch(HttpRequest::get(BASE)).await
    }

    pub async fn create(&self, input: &GameInput) -> Result<Game, CourtsideError> {
        let request = self.client.json_request(Method::Post, BASE.into(), input)?;
        self.client.fetch(request).await
    }

    pub async fn update(
        &self,
        id: GameId,
        input: &GameInput,
    ) -> Result<Game, CourtsideError> {
        let request =
            self.client
                .json_request(Method::Put, format!("{BASE}/{id}"), input)?;
        self.client.fetch(request).await
    }

    pub async fn delete(&self, id: GameId) -> Result<(), CourtsideError> {
        self.client
            .execute(HttpRequest::delete(format!("{BASE}/{id}")))
            .await?;
        Ok(())
    }
}
