//! Endpoints that need no login.

use courtside_protocol::{Game, Player, StaffId, StaffMember, Team, TeamId, TeamLevel};
use courtside_transport::{HttpRequest, Transport};

use crate::{ApiClient, CourtsideError};

/// `/public` endpoints.
///
/// These go through the same authorizer as everything else, so a logged-in
/// client still sends its token here. The backend ignores it.
pub struct PublicApi<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> PublicApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// `GET /public/teams`.
    pub async fn teams(&self) -> Result<Vec<Team>, CourtsideError> {
        self.client.fetch(HttpRequest::get("/public/teams")).await
    }

    /// `GET /public/teams/{teamId}/players`.
    pub async fn players_by_team(
        &self,
        team: TeamId,
    ) -> Result<Vec<Player>, CourtsideError> {
        self.client
            .fetch(HttpRequest::get(format!("/public/teams/{team}/players")))
            .await
    }

    /// `GET /public/games`: the full schedule.
    pub async fn schedule(&self) -> Result<Vec<Game>, CourtsideError> {
        self.client.fetch(HttpRequest::get("/public/games")).await
    }

    /// `GET /public/games/upcoming?limit=N`.
    ///
    /// See [`DEFAULT_UPCOMING_LIMIT`](crate::DEFAULT_UPCOMING_LIMIT).
    pub async fn upcoming_games(
        &self,
        limit: u32,
    ) -> Result<Vec<Game>, CourtsideError> {
        self.client
            .fetch(HttpRequest::get("/public/games/upcoming").query("limit", limit))
            .await
    }

    /// `GET /public/games/recent?limit=N`.
    ///
    /// See [`DEFAULT_RECENT_LIMIT`](crate::DEFAULT_RECENT_LIMIT).
    pub async fn recent_games(
        &self,
        limit: u32,
    ) -> Result<Vec<Game>, CourtsideError> {
        self.client
            .fetch(HttpRequest::get("/public/games/recent").query("limit", limit))
            .await
    }

    /// `GET /public/staff`, optionally filtered by `?teamLevel=`.
    pub async fn staff(
        &self,
        level: Option<TeamLevel>,
    ) -> Result<Vec<StaffMember>, CourtsideError> {
        let mut request = HttpRequest::get("/public/staff");
        if let Some(level) = level {
            request = request.query("teamLevel", level);
        }
        self.client.fetch(request).await
    }

    /// `GET /public/staff/{id}`.
    pub async fn staff_member(
        &self,
        id: StaffId,
    ) -> Result<StaffMember, CourtsideError> {
        self.client
            .fetch(HttpRequest::get(format!("/public/staff/{id}")))
            .await
    }
}
