//! Login session management for Courtside.
//!
//! This crate owns the answer to "is the user logged in":
//!
//! 1. **Storage**: where the session survives restarts
//!    ([`KeyValueStorage`], [`MemoryStorage`], [`FileStorage`])
//! 2. **Credential store**: the session's single storage slot
//!    ([`CredentialStore`])
//! 3. **Controller**: login/logout, the in-memory state everything else
//!    reads, and change notifications ([`SessionController`])
//!
//! # How it fits in the stack
//!
//! ```text
//! API surface (above)  ← asks the controller to log in/out
//!     ↕
//! Session layer (this crate)  ← holds the token, persists it
//!     ↕
//! Transport (below)  ← reads the token through `TokenSource`
//! ```

mod controller;
mod error;
mod session;
mod store;

pub use controller::SessionController;
pub use error::{SessionError, StorageError};
pub use session::{Session, SessionConfig, SessionEpoch};
pub use store::{
    CredentialStore, FileStorage, KeyValueStorage, MemoryStorage,
    StoredSession, DEFAULT_SESSION_KEY, LEGACY_TOKEN_KEYS,
};
