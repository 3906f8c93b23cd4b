use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::{Map, Value};
use tracing::{debug, warn};
use tracker_core::model::SessionToken;

use crate::session::{SessionStore, StorageError, TOKEN_KEY};

/// Durable key/value document on disk, holding the session token under [`TOKEN_KEY`].
///
/// The token is cached in memory after `open`, so guard checks stay synchronous
/// and cheap. Other keys in the document are preserved across writes.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    cached: RwLock<Option<SessionToken>>,
}

impl FileSessionStore {
    /// Load the document at `path`. A missing file means signed out.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read.
    /// Returns `StorageError::Serialization` if it is not a JSON object.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let document = read_document(&path)?;
        let cached = match document.get(TOKEN_KEY) {
            Some(Value::String(raw)) => match SessionToken::new(raw.clone()) {
                Ok(token) => Some(token),
                Err(err) => {
                    warn!("ignoring stored session token: {err}");
                    None
                }
            },
            _ => None,
        };
        debug!(path = %path.display(), signed_in = cached.is_some(), "opened session file");

        Ok(Self {
            path,
            cached: RwLock::new(cached),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, token: Option<&SessionToken>) -> Result<(), StorageError> {
        let mut document = read_document(&self.path)?;
        match token {
            Some(token) => {
                document.insert(TOKEN_KEY.to_string(), Value::String(token.expose().to_string()));
            }
            None => {
                document.remove(TOKEN_KEY);
            }
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_vec_pretty(&Value::Object(document))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<SessionToken> {
        self.cached.read().ok().and_then(|guard| guard.clone())
    }

    fn write(&self, token: SessionToken) -> Result<(), StorageError> {
        self.persist(Some(&token))?;
        let mut guard = self.cached.write().map_err(|_| StorageError::Poisoned)?;
        *guard = Some(token);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        // Drop the in-memory copy first so a failed erase still signs the process out.
        {
            let mut guard = self.cached.write().map_err(|_| StorageError::Poisoned)?;
            *guard = None;
        }
        self.persist(None)
    }
}

fn read_document(path: &Path) -> Result<Map<String, Value>, StorageError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
        Err(err) => return Err(err.into()),
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    Ok(serde_json::from_slice(&bytes)?)
}
