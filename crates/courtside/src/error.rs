//! Unified error type for the Courtside client.

use courtside_protocol::ProtocolError;
use courtside_session::SessionError;
use courtside_transport::{Method, TransportError};

/// Coarse classification of a failed call, for deciding what to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No response at all (connection refused, DNS, timeout).
    Network,
    /// 401 or 403: missing, expired or rejected credentials.
    Unauthorized,
    /// Any other 4xx: the request itself was wrong.
    Validation,
    /// 5xx: the backend failed.
    Server,
    /// Everything else (bad config, undecodable body, storage trouble,
    /// stale response).
    Other,
}

impl ErrorKind {
    /// Classifies an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Unauthorized,
            400..=499 => Self::Validation,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }
}

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attributes let `?` convert sub-crate errors
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum CourtsideError {
    /// A transport-level error: the request never got a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A body couldn't be encoded or the response couldn't be decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Session persistence failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The backend answered with a non-2xx status.
    #[error("{method} {path} failed with HTTP {status}: {message}")]
    Status {
        method: Method,
        path: String,
        status: u16,
        /// The backend's `message` field if it sent one, otherwise the
        /// (truncated) body.
        message: String,
    },

    /// The session changed (login or logout) while the request was in
    /// flight, so its response was dropped.
    #[error("response discarded: session changed while the request was in flight")]
    Stale,

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CourtsideError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(TransportError::InvalidUrl(_))
            | Self::Transport(TransportError::InvalidHeader { .. }) => {
                ErrorKind::Other
            }
            Self::Transport(_) => ErrorKind::Network,
            Self::Status { status, .. } => ErrorKind::from_status(*status),
            _ => ErrorKind::Other,
        }
    }

    /// The HTTP status, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` for 401/403 responses. These never trigger a logout; the
    /// caller decides whether to ask the user to log in again.
    pub fn is_auth_failure(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: u16) -> CourtsideError {
        CourtsideError::Status {
            method: Method::Get,
            path: "/admin/teams".into(),
            status,
            message: "nope".into(),
        }
    }

    #[test]
    fn test_error_kind_from_status() {
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::Validation);
        assert_eq!(ErrorKind::from_status(422), ErrorKind::Validation);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::Server);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::Server);
        assert_eq!(ErrorKind::from_status(304), ErrorKind::Other);
    }

    #[test]
    fn test_status_error_accessors() {
        let err = status_error(401);
        assert_eq!(err.status(), Some(401));
        assert!(err.is_auth_failure());
        assert!(err.to_string().contains("GET /admin/teams"));
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn test_from_transport_error() {
        let err: CourtsideError =
            TransportError::Unavailable("offline".into()).into();
        assert!(matches!(err, CourtsideError::Transport(_)));
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_invalid_url_is_not_a_network_error() {
        let err: CourtsideError =
            TransportError::InvalidUrl("nope".into()).into();
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn test_from_protocol_error() {
        let json = serde_json::from_str::<u8>("not json").unwrap_err();
        let err: CourtsideError = ProtocolError::Decode(json).into();
        assert!(matches!(err, CourtsideError::Protocol(_)));
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn test_from_session_error() {
        let err: CourtsideError =
            SessionError::InvalidCredential("empty".into()).into();
        assert!(matches!(err, CourtsideError::Session(_)));
    }

    #[test]
    fn test_stale_is_not_auth_failure() {
        assert!(!CourtsideError::Stale.is_auth_failure());
    }
}
