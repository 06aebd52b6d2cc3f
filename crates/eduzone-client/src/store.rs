//! Persistence for the bearer token and the signed-in user.
//!
//! Every operation is synchronous so that logging out clears state before it
//! returns.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use eduzone_models::UserProfile;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ClientError;

const APP_DIR: &str = "eduzone";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedAuth {
    pub token: String,
    pub user: Option<UserProfile>,
}

pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<PersistedAuth>, ClientError>;

    fn save(&self, auth: &PersistedAuth) -> Result<(), ClientError>;

    fn clear(&self) -> Result<(), ClientError>;

    fn token(&self) -> Result<Option<String>, ClientError> {
        Ok(self.load()?.map(|auth| auth.token))
    }
}

/// Keeps the session for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    auth: Mutex<Option<PersistedAuth>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            auth: Mutex::new(Some(PersistedAuth {
                token: token.into(),
                user: None,
            })),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<PersistedAuth>> {
        // A panic while holding the lock cannot leave the slot half written
        self.auth.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<PersistedAuth>, ClientError> {
        Ok(self.slot().clone())
    }

    fn save(&self, auth: &PersistedAuth) -> Result<(), ClientError> {
        *self.slot() = Some(auth.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.slot() = None;
        Ok(())
    }
}

/// Stores the session as JSON, by default under the user's config directory
/// (`~/.config/eduzone/session.json` on Linux).
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Result<Self, ClientError> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ClientError::Store(io::Error::new(
                io::ErrorKind::NotFound,
                "no user config directory on this platform",
            ))
        })?;

        Ok(Self::new(dir.join(APP_DIR).join(SESSION_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<PersistedAuth>, ClientError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&raw) {
            Ok(auth) => Ok(Some(auth)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding unreadable session file");
                self.clear()?;
                Ok(None)
            }
        }
    }

    fn save(&self, auth: &PersistedAuth) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_vec_pretty(auth).map_err(ClientError::Encode)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
