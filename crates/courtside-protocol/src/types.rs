//! Records exchanged with the athletics backend.
//!
//! Every type here mirrors a backend DTO. Field names are camelCase on the
//! wire (`#[serde(rename_all = "camelCase")]`) and optional fields are
//! `null` when absent, never omitted.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Declares a `u64` newtype ID that serializes as a plain number.
///
/// `#[serde(transparent)]` means `TeamId(42)` becomes `42` in JSON, not
/// `{ "0": 42 }`. `Display` prints the bare number so IDs can be dropped
/// straight into request paths.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Backend identifier of a team.
    TeamId
);
id_type!(
    /// Backend identifier of a player.
    PlayerId
);
id_type!(
    /// Backend identifier of a scheduled game.
    GameId
);
id_type!(
    /// Backend identifier of a staff member.
    StaffId
);

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// The competition level a team (or staff member) belongs to.
///
/// Serialized in SCREAMING_SNAKE_CASE (`"REGIONAL"`, `"NATIONAL"`), the
/// backend's enum names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamLevel {
    Regional,
    National,
}

impl TeamLevel {
    /// The wire name, as used in the `?teamLevel=` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regional => "REGIONAL",
            Self::National => "NATIONAL",
        }
    }
}

impl fmt::Display for TeamLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TeamLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "REGIONAL" => Ok(Self::Regional),
            "NATIONAL" => Ok(Self::National),
            other => Err(format!("unknown team level: {other}")),
        }
    }
}

/// Whether a game is played at home or away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HomeAway {
    Home,
    Away,
}

// ---------------------------------------------------------------------------
// Resource DTOs
// ---------------------------------------------------------------------------

/// A team as returned by `/public/teams` and `/admin/teams`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub level: TeamLevel,
    pub season: Option<String>,
    pub description: Option<String>,
}

/// A rostered player.
///
/// `team_name` is denormalized by the backend so roster pages don't need
/// a second lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub jersey_number: Option<u32>,
    pub position: Option<String>,
    pub height: Option<String>,
    pub grad_year: Option<i32>,
    pub country: Option<String>,
    pub photo_url: Option<String>,
    pub team_id: TeamId,
    pub team_name: String,
}

impl Player {
    /// "First Last", as shown on roster cards.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A scheduled (or played) game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    pub team_id: TeamId,
    pub team_name: String,
    pub opponent: String,
    /// Local wall-clock time of tip-off, no zone attached.
    #[serde(with = "local_date_time")]
    pub game_date_time: NaiveDateTime,
    pub home_away: HomeAway,
    pub location: String,
    pub score_us: Option<u32>,
    pub score_them: Option<u32>,
    /// `None` until a score has been recorded.
    pub win: Option<bool>,
    pub conference_game: bool,
    pub notes: Option<String>,
}

impl Game {
    /// Returns `true` once both scores are in.
    pub fn is_final(&self) -> bool {
        self.score_us.is_some() && self.score_them.is_some()
    }
}

/// A coach or staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: StaffId,
    pub full_name: String,
    pub team_level: TeamLevel,
    pub position: String,
    pub display_order: u32,
    pub primary_photo_url: Option<String>,
    pub secondary_photo_url: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Inputs (create/update bodies)
// ---------------------------------------------------------------------------

/// Body of `POST /admin/teams` and `PUT /admin/teams/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInput {
    pub name: String,
    pub level: TeamLevel,
}

/// Body of `POST /admin/players` and `PUT /admin/players/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInput {
    pub team_id: TeamId,
    pub first_name: String,
    pub last_name: String,
    pub jersey_number: Option<u32>,
    pub position: Option<String>,
    pub height: Option<String>,
    pub grad_year: Option<i32>,
    pub country: Option<String>,
    pub photo_url: Option<String>,
}

/// Body of `POST /admin/games` and `PUT /admin/games/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInput {
    pub team_id: TeamId,
    pub opponent: String,
    #[serde(with = "local_date_time")]
    pub game_date_time: NaiveDateTime,
    pub home_away: HomeAway,
    pub location: String,
    pub score_us: Option<u32>,
    pub score_them: Option<u32>,
    pub conference_game: bool,
    pub notes: Option<String>,
}

/// Body of `POST /admin/staff` and `PUT /admin/staff/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMemberInput {
    pub full_name: String,
    pub team_level: TeamLevel,
    pub position: String,
    pub display_order: u32,
    pub primary_photo_url: Option<String>,
    pub secondary_photo_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub active: bool,
}

/// Response of the photo upload endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUpload {
    pub url: String,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Body of `POST /auth/login`.
///
/// `Debug` is implemented by hand so the password never ends up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What the backend returns from a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer token (a JWT, but the client treats it as opaque).
    pub token: String,
    pub full_name: String,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Date-time wire format
// ---------------------------------------------------------------------------

/// `YYYY-MM-DDTHH:mm:ss` without a zone, as the backend's local date-times
/// are written. Parsing also accepts fractional seconds and the short
/// `YYYY-MM-DDTHH:mm` form.
mod local_date_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
    const ACCEPTED: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ACCEPTED
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&raw, fmt).ok())
            .ok_or_else(|| {
                serde::de::Error::custom(format!(
                    "invalid local date-time: {raw}"
                ))
            })
    }
}

// =========================================================================
// Tests
// =========================================================================
