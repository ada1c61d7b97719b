//! The session controller: the single source of truth for "logged in".
//!
//! Responsibilities:
//! - Rehydrating the stored session once, at construction
//! - Logging in (persist, then publish) and out (publish, then clear)
//! - Publishing every change to subscribers
//! - Handing the current token to the request authorizer
//! - Tracking the login epoch so stale responses can be discarded
//!
//! # Concurrency note
//!
//! The in-memory session lives in a `tokio::sync::watch` channel and the
//! epoch in an atomic, so a controller can sit behind an `Arc` and be read
//! from any task. `login` and `logout` serialize on a transition lock, so
//! memory and storage never disagree about a finished transition. Storage
//! writes are not coordinated with other processes sharing the same
//! storage: last writer wins.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use courtside_protocol::AuthResponse;
use courtside_transport::TokenSource;
use tokio::sync::watch;

use crate::{
    CredentialStore, KeyValueStorage, Session, SessionConfig, SessionEpoch,
    SessionError, StoredSession,
};

/// Owns the login state.
///
/// ## Lifecycle
///
/// ```text
/// open() ──(rehydrate)──→ [stored session or logged out]
///    login() ──→ [authenticated]  ──logout()──→ [logged out]
///                  each transition bumps the epoch
/// ```
pub struct SessionController {
    store: CredentialStore,
    state: watch::Sender<Session>,
    epoch: AtomicU64,
    /// Held across persist+publish (login) and publish+clear (logout).
    transition: Mutex<()>,
}

impl SessionController {
    /// Opens a controller over `storage` and rehydrates from it.
    pub fn open(storage: impl KeyValueStorage, config: SessionConfig) -> Self {
        let store = CredentialStore::with_key(storage, config.storage_key.clone());
        Self::new(store, &config)
    }

    /// Builds a controller over an existing store and rehydrates from it.
    ///
    /// This is the only place storage is read; afterwards the in-memory
    /// state is authoritative.
    pub fn new(store: CredentialStore, config: &SessionConfig) -> Self {
        let initial = rehydrate(&store, config);
        let (state, _) = watch::channel(initial);
        Self {
            store,
            state,
            epoch: AtomicU64::new(0),
            transition: Mutex::new(()),
        }
    }

    /// Convenience for `Arc::new(Self::open(..))`, the shape the API client
    /// and the authorizer share.
    pub fn shared(storage: impl KeyValueStorage, config: SessionConfig) -> Arc<Self> {
        Arc::new(Self::open(storage, config))
    }

    /// Records a successful login.
    ///
    /// The session is persisted first; only if that succeeds does the
    /// in-memory state change. A failed save leaves the caller exactly as
    /// logged in (or out) as before.
    ///
    /// # Errors
    /// - [`SessionError::InvalidCredential`]: the response has an empty token
    /// - [`SessionError::StorageWrite`] / [`SessionError::Encode`]: not saved
    pub fn login(&self, response: AuthResponse) -> Result<Session, SessionError> {
        if response.token.trim().is_empty() {
            return Err(SessionError::InvalidCredential(
                "login response carried an empty token".into(),
            ));
        }

        let session = Session::from(response);
        let _guard = self.lock_transition();
        self.store.save(&session)?;

        self.advance_epoch();
        self.state.send_replace(session.clone());

        tracing::info!(
            email = session.email.as_deref().unwrap_or_default(),
            "logged in"
        );
        Ok(session)
    }

    /// Logs out.
    ///
    /// Memory is cleared first and unconditionally; then storage. If
    /// clearing storage fails the error is returned, but the controller
    /// already reports logged out.
    pub fn logout(&self) -> Result<(), SessionError> {
        let _guard = self.lock_transition();
        let previous = self.state.send_replace(Session::default());
        self.advance_epoch();

        let result = self.store.clear();
        tracing::info!(
            was_authenticated = previous.is_authenticated(),
            storage_cleared = result.is_ok(),
            "logged out"
        );
        result
    }

    /// A snapshot of the current session.
    pub fn current_session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// `true` iff the current session carries a non-empty token.
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Observes login/logout transitions.
    ///
    /// The receiver starts with the current session marked as seen;
    /// `changed().await` resolves on the next transition.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// The current login epoch.
    pub fn epoch(&self) -> SessionEpoch {
        SessionEpoch(self.epoch.load(Ordering::Acquire))
    }

    /// Returns `true` if no login or logout happened since `epoch` was
    /// captured.
    pub fn is_current(&self, epoch: SessionEpoch) -> bool {
        self.epoch() == epoch
    }

    /// The backing store.
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// The lock guards no data, so a poisoned lock is still usable.
    fn lock_transition(&self) -> MutexGuard<'_, ()> {
        self.transition
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn advance_epoch(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }
}

impl TokenSource for SessionController {
    fn bearer_token(&self) -> Option<String> {
        self.state.borrow().bearer_token().map(str::to_owned)
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("store", &self.store)
            .field("session", &*self.state.borrow())
            .field("epoch", &self.epoch())
            .finish()
    }
}

/// Reads the stored session for a fresh controller.
///
/// Never fails: anything other than a valid session means "logged out".
fn rehydrate(store: &CredentialStore, config: &SessionConfig) -> Session {
    match store.inspect() {
        Ok(StoredSession::Valid(session)) => {
            if session.is_authenticated() {
                tracing::info!(
                    email = session.email.as_deref().unwrap_or_default(),
                    "restored stored session"
                );
            }
            session
        }
        Ok(StoredSession::Missing) => Session::default(),
        Ok(StoredSession::Malformed(reason)) => {
            tracing::warn!(
                key = store.key(),
                %reason,
                purge = config.purge_malformed,
                "stored session is malformed, starting logged out"
            );
            if config.purge_malformed {
                if let Err(e) = store.clear() {
                    tracing::warn!(error = %e, "failed to purge malformed session");
                }
            }
            Session::default()
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not read stored session, starting logged out");
            Session::default()
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
