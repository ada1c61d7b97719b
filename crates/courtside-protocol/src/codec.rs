//! Codec trait and implementations for serializing/deserializing bodies.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The API surface doesn't care HOW request and response bodies are
//! serialized, it just needs something that implements [`Codec`].
//!
//! The backend speaks JSON, so [`JsonCodec`] is the only implementation.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// ## Trait bounds
///
/// - `Send + Sync` → one codec instance is shared by every request the
///   client issues, possibly from different Tokio worker threads.
/// - `'static` → the codec owns everything it needs.
///
/// `decode` requires `DeserializeOwned` (vs plain `Deserialize`) so the
/// decoded DTO doesn't borrow from the response buffer, which is dropped
/// right after decoding.
pub trait Codec: Send + Sync + 'static {
    /// The `Content-Type` this codec produces.
    fn content_type(&self) -> &'static str;

    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// This is behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use courtside_protocol::{Codec, JsonCodec, TeamInput, TeamLevel};
///
/// let codec = JsonCodec;
///
/// let input = TeamInput {
///     name: "Varsity".into(),
///     level: TeamLevel::National,
/// };
///
/// let bytes = codec.encode(&input).unwrap();
/// let decoded: TeamInput = codec.decode(&bytes).unwrap();
/// assert_eq!(input, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{AuthResponse, Team, TeamId, TeamLevel};

    #[test]
    fn test_json_codec_content_type() {
        assert_eq!(JsonCodec.content_type(), "application/json");
    }

    #[test]
    fn test_json_codec_decodes_backend_team_list() {
        let body = br#"[
            {"id": 1, "name": "Varsity", "level": "NATIONAL",
             "season": "2024-25", "description": null},
            {"id": 2, "name": "JV", "level": "REGIONAL",
             "season": null, "description": null}
        ]"#;
        let teams: Vec<Team> = JsonCodec.decode(body).unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].id, TeamId(1));
        assert_eq!(teams[1].level, TeamLevel::Regional);
        assert!(teams[1].season.is_none());
    }

    #[test]
    fn test_json_codec_decode_html_error_page_fails() {
        let result: Result<AuthResponse, _> =
            JsonCodec.decode(b"<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_json_codec_decode_empty_body_fails() {
        let result: Result<Vec<Team>, _> = JsonCodec.decode(b"");
        assert!(result.is_err());
    }
}
