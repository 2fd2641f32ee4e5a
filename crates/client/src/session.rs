//! Login state and the persisted bearer token.
//!
//! The session is either logged in or logged out; holding a token is what
//! makes it logged in. Every transition reports where the UI should go next
//! as a [`SessionTransition`], and the owner of the session routes it.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Fixed storage key of the persisted token.
pub const TOKEN_KEY: &str = "access_token";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access token store at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to resolve OS app data directory")]
    NoDataDir,

    #[error("token store lock poisoned")]
    Poisoned,
}

/// Persistent storage for a single bearer token.
pub trait TokenStore {
    fn load(&self) -> Result<Option<String>, StoreError>;

    fn save(&self, token: &str) -> Result<(), StoreError>;

    fn clear(&self) -> Result<(), StoreError>;
}

/// Token persisted as a file named [`TOKEN_KEY`] inside a directory.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_KEY),
        }
    }

    /// Store under `{app_data_dir}/stockdesk/`.
    pub fn in_default_dir() -> Result<Self, StoreError> {
        default_data_dir().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => {
                let token = s.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_err(e)),
        }
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        std::fs::write(&self.path, token).map_err(|e| self.io_err(e))
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_err(e)),
        }
    }
}

/// In-memory token store. Clones share the same slot, so a test can keep a
/// handle and inspect what the session persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.into()))),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|s| s.clone())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.lock().map_err(|_| StoreError::Poisoned)?.clone())
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        *self.slot.lock().map_err(|_| StoreError::Poisoned)? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().map_err(|_| StoreError::Poisoned)? = None;
        Ok(())
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn,
}

/// Where the UI goes after a session change.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionTransition {
    EnterMain,
    EnterLogin,
}

#[derive(Debug)]
pub struct Session<S> {
    store: S,
    state: SessionState,
    token: Option<String>,
}

impl<S: TokenStore> Session<S> {
    /// A logged-out session over `store`. Call [`Session::check`] to pick up a
    /// persisted token.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: SessionState::LoggedOut,
            token: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state == SessionState::LoggedIn
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Startup check: a persisted token means logged in.
    ///
    /// The token is trusted as-is; the backend is not asked whether it is
    /// still valid. The first authenticated call that gets a 401/403 ends the
    /// session instead. An unreadable store counts as logged out.
    pub fn check(&mut self) -> SessionTransition {
        match self.store.load() {
            Ok(Some(token)) => {
                tracing::info!("persisted session token found");
                self.token = Some(token);
                self.state = SessionState::LoggedIn;
                SessionTransition::EnterMain
            }
            Ok(None) => {
                tracing::info!("no persisted session token");
                self.reset();
                SessionTransition::EnterLogin
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to read token store; starting logged out");
                self.reset();
                SessionTransition::EnterLogin
            }
        }
    }

    /// Persist `token` and enter the logged-in state.
    ///
    /// If the token cannot be persisted the session stays logged out.
    pub fn login(&mut self, token: String) -> Result<SessionTransition, StoreError> {
        self.store.save(&token)?;
        self.token = Some(token);
        self.state = SessionState::LoggedIn;
        tracing::info!("session started");
        Ok(SessionTransition::EnterMain)
    }

    /// Clear the persisted token and enter the logged-out state.
    pub fn logout(&mut self) -> SessionTransition {
        if let Err(err) = self.store.clear() {
            tracing::error!(error = %err, "failed to clear persisted token");
        }
        self.reset();
        tracing::info!("session ended");
        SessionTransition::EnterLogin
    }

    fn reset(&mut self) {
        self.token = None;
        self.state = SessionState::LoggedOut;
    }
}

/// `{app_data_dir}/stockdesk`.
pub fn default_data_dir() -> Result<PathBuf, StoreError> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .ok_or(StoreError::NoDataDir)?;

    Ok(base.join("stockdesk"))
}
