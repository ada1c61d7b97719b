//! Credential storage: where the session survives restarts.
//!
//! Two layers:
//!
//! - [`KeyValueStorage`]: a dumb string-to-string store. [`MemoryStorage`]
//!   lives for the process; [`FileStorage`] keeps a JSON object on disk so a
//!   login survives the next run.
//! - [`CredentialStore`]: knows which key the session lives under and how
//!   to encode it. It is the only code that reads or writes that key.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::{Session, SessionError, StorageError};

/// Key the session JSON is stored under unless configured otherwise.
pub const DEFAULT_SESSION_KEY: &str = "busche_bb_auth";

/// Bare-token keys written by older clients. Never written, only removed
/// on [`CredentialStore::clear`] so a logout leaves nothing behind.
pub const LEGACY_TOKEN_KEYS: [&str; 2] = ["authToken", "auth_token"];

// ---------------------------------------------------------------------------
// KeyValueStorage
// ---------------------------------------------------------------------------

/// Persistent string key-value storage.
///
/// Operations are synchronous: they are short and the session layer calls
/// them outside of any request, so there is nothing to gain from `async`.
pub trait KeyValueStorage: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage.
///
/// Clones share the same entries, which is how tests simulate a restart:
/// build a second controller over a clone of the first one's storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries =
            self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries =
            self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// Storage backed by a JSON object file.
///
/// Every operation re-reads the file, so two processes sharing one file
/// see each other's writes. Concurrent writers race and the last one
/// wins; nothing guards against that. Writes go to a sibling temp file
/// that is then renamed over the original, so a crash mid-write never
/// leaves a half-written file behind.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStorage {
    /// Uses `path` as the storage file. The file (and its parent
    /// directories) are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(e) => return Err(StorageError::Io(e)),
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).map_err(|e| {
            StorageError::Corrupt(format!("{}: {e}", self.path.display()))
        })
    }

    fn write_all(
        &self,
        entries: &BTreeMap<String, String>,
    ) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        // A corrupt container is replaced rather than blocking every
        // future login.
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(StorageError::Corrupt(reason)) => {
                tracing::warn!(%reason, "replacing corrupt storage file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(StorageError::Corrupt(reason)) => {
                tracing::warn!(%reason, "discarding corrupt storage file");
                return self.write_all(&BTreeMap::new());
            }
            Err(e) => return Err(e),
        };
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CredentialStore
// ---------------------------------------------------------------------------

/// What [`CredentialStore::inspect`] found in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredSession {
    /// Nothing stored under the session key.
    Missing,
    /// A session that parsed cleanly.
    Valid(Session),
    /// Something is stored, but it isn't a session. Carries the parse error.
    Malformed(String),
}

/// The session's single storage slot.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl CredentialStore {
    /// Stores the session under [`DEFAULT_SESSION_KEY`].
    pub fn new(storage: impl KeyValueStorage) -> Self {
        Self::with_key(storage, DEFAULT_SESSION_KEY)
    }

    pub fn with_key(storage: impl KeyValueStorage, key: impl Into<String>) -> Self {
        Self::from_shared(Arc::new(storage), key)
    }

    pub fn from_shared(
        storage: Arc<dyn KeyValueStorage>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Persists the full session.
    ///
    /// # Errors
    /// [`SessionError::Encode`] or [`SessionError::StorageWrite`]; in
    /// either case the session is not saved.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let json = serde_json::to_string(session).map_err(SessionError::Encode)?;
        self.storage
            .set(&self.key, &json)
            .map_err(SessionError::StorageWrite)
    }

    /// Reads the stored session without collapsing the failure cases.
    pub fn inspect(&self) -> Result<StoredSession, SessionError> {
        let Some(raw) = self
            .storage
            .get(&self.key)
            .map_err(SessionError::StorageRead)?
        else {
            return Ok(StoredSession::Missing);
        };
        Ok(match serde_json::from_str::<Session>(&raw) {
            Ok(session) => StoredSession::Valid(session),
            Err(e) => StoredSession::Malformed(e.to_string()),
        })
    }

    /// Reads the stored session. Missing, malformed and unreadable all
    /// come back as `None`.
    pub fn load(&self) -> Option<Session> {
        match self.inspect() {
            Ok(StoredSession::Valid(session)) => Some(session),
            Ok(StoredSession::Missing) => None,
            Ok(StoredSession::Malformed(reason)) => {
                tracing::debug!(key = %self.key, %reason, "stored session is malformed");
                None
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not read stored session");
                None
            }
        }
    }

    /// Removes the session key and every legacy token key.
    ///
    /// All removals are attempted; the first failure is returned.
    pub fn clear(&self) -> Result<(), SessionError> {
        let mut first_error = None;
        let keys = std::iter::once(self.key.as_str()).chain(LEGACY_TOKEN_KEYS);
        for key in keys {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key, error = %e, "failed to remove credential key");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(SessionError::StorageWrite(e)),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

// =========================================================================
// Tests
// =========================================================================
