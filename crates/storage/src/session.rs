use std::path::Path;
use std::sync::{Arc, RwLock};

use thiserror::Error;
use tracker_core::model::SessionToken;

use crate::file::FileSessionStore;

/// Well-known key the session token is persisted under.
pub const TOKEN_KEY: &str = "token";

/// Errors surfaced by session store adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("session store lock poisoned")]
    Poisoned,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Holder of the current authentication token.
///
/// Reads are synchronous and never touch the network. A single instance is
/// shared by the route guard and the API gateway for the life of the process.
pub trait SessionStore: Send + Sync {
    /// The current token, if any.
    fn token(&self) -> Option<SessionToken>;

    /// Replace the stored token.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the token cannot be persisted.
    fn write(&self, token: SessionToken) -> Result<(), StorageError>;

    /// Forget the stored token.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the durable copy cannot be erased.
    fn clear(&self) -> Result<(), StorageError>;

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    token: RwLock<Option<SessionToken>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: SessionToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn token(&self) -> Option<SessionToken> {
        // A poisoned lock reads as signed out.
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn write(&self, token: SessionToken) -> Result<(), StorageError> {
        let mut guard = self.token.write().map_err(|_| StorageError::Poisoned)?;
        *guard = Some(token);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self.token.write().map_err(|_| StorageError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}

/// Bundles the client-side persisted state.
#[derive(Clone)]
pub struct Storage {
    pub session: Arc<dyn SessionStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            session: Arc::new(InMemorySessionStore::new()),
        }
    }

    /// Open the durable session file at `path`, creating nothing until a token is written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if an existing file cannot be read or parsed.
    pub fn file(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let store = FileSessionStore::open(path)?;
        Ok(Self {
            session: Arc::new(store),
        })
    }
}
