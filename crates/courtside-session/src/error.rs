//! Error types for the session layer.

/// Errors raised by a [`KeyValueStorage`](crate::KeyValueStorage) backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The underlying file couldn't be read or written.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The storage container itself (not a single entry) is unreadable,
    /// e.g. a session file that isn't a JSON object.
    #[error("storage is corrupt: {0}")]
    Corrupt(String),
}

/// Errors that can occur during session management.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Reading the persisted session failed.
    #[error("failed to read credential storage: {0}")]
    StorageRead(#[source] StorageError),

    /// Persisting or clearing the session failed. After a failed login
    /// the user is still logged out; after a failed logout the user is
    /// logged out in memory but storage may still hold the old session.
    #[error("failed to write credential storage: {0}")]
    StorageWrite(#[source] StorageError),

    /// The session couldn't be serialized.
    #[error("failed to encode session: {0}")]
    Encode(#[source] serde_json::Error),

    /// The login response can't be used as a credential (empty token).
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
}
