use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::session::{Principal, ThemePreference};

/// Persisted session snapshot: the bearer token plus the profile record
/// cached at login so a restart can restore identity without a network
/// round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
}

/// Durable storage behind the session store. Clearing the session
/// removes the token and the profile snapshot together; the theme
/// preference is persisted independently and survives a clear.
pub trait SessionStateStore: Send + Sync {
    fn load_session(&self) -> Result<Option<StoredSession>, ClientError>;
    fn persist_session(&self, session: &StoredSession) -> Result<(), ClientError>;
    fn clear_session(&self) -> Result<(), ClientError>;
    fn load_theme(&self) -> Result<Option<ThemePreference>, ClientError>;
    fn persist_theme(&self, theme: ThemePreference) -> Result<(), ClientError>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct StateDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session: Option<StoredSession>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<ThemePreference>,
}

/// File-backed store: one JSON document per app instance. An unreadable
/// or corrupt document is treated as empty rather than failing startup.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join("debate-client").join("state.json"))
    }

    fn read_document(&self) -> StateDocument {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return StateDocument::default();
            }
            Err(error) => {
                tracing::warn!(error = %error, path = %self.path.display(), "session state unreadable, starting empty");
                return StateDocument::default();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(document) => document,
            Err(error) => {
                tracing::warn!(error = %error, path = %self.path.display(), "session state corrupt, starting empty");
                StateDocument::default()
            }
        }
    }

    fn write_document(&self, document: &StateDocument) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|error| ClientError::storage(error.to_string()))?;
        }
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|error| ClientError::storage(error.to_string()))?;
        fs::write(&self.path, bytes).map_err(|error| ClientError::storage(error.to_string()))
    }
}

impl SessionStateStore for FileSessionStore {
    fn load_session(&self) -> Result<Option<StoredSession>, ClientError> {
        Ok(self.read_document().session)
    }

    fn persist_session(&self, session: &StoredSession) -> Result<(), ClientError> {
        let mut document = self.read_document();
        document.session = Some(session.clone());
        self.write_document(&document)
    }

    fn clear_session(&self) -> Result<(), ClientError> {
        let mut document = self.read_document();
        if document.session.take().is_none() {
            return Ok(());
        }
        self.write_document(&document)
    }

    fn load_theme(&self) -> Result<Option<ThemePreference>, ClientError> {
        Ok(self.read_document().theme)
    }

    fn persist_theme(&self, theme: ThemePreference) -> Result<(), ClientError> {
        let mut document = self.read_document();
        document.theme = Some(theme);
        self.write_document(&document)
    }
}

/// In-memory store for tests and short-lived tooling.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<StateDocument>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StateDocument> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStateStore for MemorySessionStore {
    fn load_session(&self) -> Result<Option<StoredSession>, ClientError> {
        Ok(self.lock().session.clone())
    }

    fn persist_session(&self, session: &StoredSession) -> Result<(), ClientError> {
        self.lock().session = Some(session.clone());
        Ok(())
    }

    fn clear_session(&self) -> Result<(), ClientError> {
        self.lock().session = None;
        Ok(())
    }

    fn load_theme(&self) -> Result<Option<ThemePreference>, ClientError> {
        Ok(self.lock().theme)
    }

    fn persist_theme(&self, theme: ThemePreference) -> Result<(), ClientError> {
        self.lock().theme = Some(theme);
        Ok(())
    }
}
