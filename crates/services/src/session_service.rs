use std::sync::Arc;

use tracing::{info, warn};

use storage::SessionStore;
use tracker_core::model::SessionToken;

use crate::error::{ApiError, SessionError};

/// Login/logout bookkeeping over the shared session store.
///
/// Credential collection happens elsewhere; its only output is a token handed to `sign_in`.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
}

impl SessionService {
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.store)
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.store.is_authenticated()
    }

    /// Persist a freshly issued token.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Token` for a blank token.
    /// Returns `SessionError::Storage` if the token cannot be persisted.
    pub fn sign_in(&self, raw_token: &str) -> Result<(), SessionError> {
        let token = SessionToken::new(raw_token)?;
        self.store.write(token)?;
        info!("session started");
        Ok(())
    }

    /// Forget the current token.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the durable copy cannot be erased.
    pub fn sign_out(&self) -> Result<(), SessionError> {
        self.store.clear()?;
        info!("session ended");
        Ok(())
    }
}

/// Drop the session when a call shows the token is no longer accepted.
///
/// Returns `true` when the session was expired so the caller can flag it for the guard.
pub(crate) fn expire_on_rejection(store: &dyn SessionStore, err: &ApiError) -> bool {
    if !err.is_unauthenticated() {
        return false;
    }
    if let Err(clear_err) = store.clear() {
        warn!("failed to clear rejected session: {clear_err}");
    }
    warn!("session rejected by server; signing out");
    true
}
