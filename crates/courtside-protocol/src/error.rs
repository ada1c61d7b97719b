//! Error types for the protocol layer.
//!
//! Each crate in Courtside defines its own error enum. When you see a
//! `ProtocolError`, the problem is in serialization/deserialization,
//! not in networking or session handling.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: the backend returned an HTML error page instead of
    /// JSON, a required field is missing, or a field has the wrong type.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
