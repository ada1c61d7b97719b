//! Session types: the data that says who is logged in.
//!
//! A "session" here is the client's record of a successful login:
//! - the bearer token the backend issued
//! - the identity fields shown in the admin header (name, email)

use std::fmt;

use courtside_protocol::AuthResponse;
use serde::{Deserialize, Serialize};

use crate::store::DEFAULT_SESSION_KEY;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for session persistence.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Storage key the session JSON lives under.
    ///
    /// Default: `busche_bb_auth`, the key earlier clients wrote, so an
    /// existing login survives the upgrade.
    pub storage_key: String,

    /// Whether a stored session that fails to parse is deleted when it's
    /// detected at startup.
    ///
    /// Default: `true`. With `false` the corrupt entry stays until the
    /// next explicit logout.
    pub purge_malformed: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_SESSION_KEY.to_string(),
            purge_malformed: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The client's login state.
///
/// Persisted as `{"token": ..., "fullName": ..., "email": ...}`.
/// `#[serde(default)]` lets older blobs with missing fields still load.
///
/// A session is authenticated iff `token` is present and not blank.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub token: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

impl Session {
    /// Returns `true` if the session carries a usable token.
    pub fn is_authenticated(&self) -> bool {
        self.bearer_token().is_some()
    }

    /// The token, treating a blank string as no token.
    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Self {
            token: Some(resp.token),
            full_name: Some(resp.full_name),
            email: Some(resp.email),
        }
    }
}

/// Tokens are credentials, so `Debug` shows only whether one is present.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// SessionEpoch
// ---------------------------------------------------------------------------

/// A snapshot of the controller's login generation.
///
/// Every login and logout moves the controller to a new epoch. Code that
/// starts a request captures the epoch first; if it no longer matches when
/// the response arrives, the response belongs to a session that has
/// ended and should be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionEpoch(pub(crate) u64);

impl fmt::Display for SessionEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epoch-{}", self.0)
    }
}
