//! # Courtside
//!
//! Typed client for a school athletics program's REST backend.
//!
//! Courtside ties together the layers below it: the session controller
//! decides who is logged in, the authorizer stamps the bearer token on
//! every request, and [`ApiClient`] exposes one method per backend
//! operation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use courtside::prelude::*;
//!
//! # async fn run() -> Result<(), CourtsideError> {
//! let client = ApiClient::builder()
//!     .base_url("http://localhost:8080")
//!     .build()?;
//!
//! // Public pages need no login.
//! let teams = client.public().teams().await?;
//!
//! // Admin pages do.
//! client.login("coach@x.org", "secret").await?;
//! let games = client.admin_games().list().await?;
//! client.logout()?;
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod config;
mod error;

pub use api::{
    AdminGames, AdminPlayers, AdminStaff, AdminTeams, AuthApi, PublicApi,
    DEFAULT_RECENT_LIMIT, DEFAULT_UPCOMING_LIMIT,
};
pub use client::{ApiClient, ApiClientBuilder};
pub use config::ClientConfig;
pub use error::{CourtsideError, ErrorKind};

pub use courtside_protocol as protocol;
pub use courtside_session as session;
pub use courtside_transport as transport;

/// Everything an application built on Courtside usually needs.
pub mod prelude {
    pub use crate::{
        ApiClient, ApiClientBuilder, ClientConfig, CourtsideError, ErrorKind,
    };
    pub use courtside_protocol::{
        AuthResponse, Game, GameId, GameInput, HomeAway, Player, PlayerId,
        PlayerInput, StaffId, StaffMember, StaffMemberInput, Team, TeamId,
        TeamInput, TeamLevel,
    };
    pub use courtside_session::{
        FileStorage, KeyValueStorage, MemoryStorage, Session, SessionConfig,
        SessionController, SessionEpoch,
    };
    pub use courtside_transport::{ReqwestTransport, Transport};
}
