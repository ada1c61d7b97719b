//! One handle per backend resource.
//!
//! Handles borrow the [`ApiClient`](crate::ApiClient) and are cheap to
//! create; get a fresh one per call site with `client.admin_teams()` and
//! friends.

mod auth;
mod games;
mod players;
mod public;
mod staff;
mod teams;

pub use auth::AuthApi;
pub use games::AdminGames;
pub use players::AdminPlayers;
pub use public::PublicApi;
pub use staff::AdminStaff;
pub use teams::AdminTeams;

/// Number of games [`PublicApi::upcoming_games`] asks for when the caller
/// has no preference.
pub const DEFAULT_UPCOMING_LIMIT: u32 = 3;

/// Number of games [`PublicApi::recent_games`] asks for when the caller
/// has no preference.
pub const DEFAULT_RECENT_LIMIT: u32 = 5;

/// Multipart field name the backend reads uploaded photos from.
const PHOTO_FIELD: &str = "file";
