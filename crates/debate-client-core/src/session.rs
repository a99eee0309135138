use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ClientError;
use crate::storage::{SessionStateStore, StoredSession};

/// Authenticated identity as the server defines it. Only `id` is typed;
/// everything else the server sends is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Principal {
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.field_str("nickname").or_else(|| self.field_str("name"))
    }

    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.field_str("role")
    }

    fn field_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Restoring,
    Authenticated,
    Anonymous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
}

impl ThemePreference {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

impl Default for ThemePreference {
    fn default() -> Self {
        Self::Light
    }
}

#[derive(Debug)]
struct SessionInner {
    phase: SessionPhase,
    token: Option<String>,
    principal: Option<Principal>,
}

type UnauthorizedHook = Box<dyn Fn() + Send + Sync>;

/// Holds the current token and principal, mirrored into durable storage.
/// Constructed explicitly and shared via `Arc`; there is no ambient
/// singleton, so tests can run isolated stores side by side.
pub struct SessionStore {
    inner: Mutex<SessionInner>,
    storage: Arc<dyn SessionStateStore>,
    unauthorized_hook: Mutex<Option<UnauthorizedHook>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStateStore>) -> Self {
        Self {
            inner: Mutex::new(SessionInner {
                phase: SessionPhase::Restoring,
                token: None,
                principal: None,
            }),
            storage,
            unauthorized_hook: Mutex::new(None),
        }
    }

    /// Loads the persisted snapshot, transitioning to `Authenticated`
    /// optimistically when a token is present and `Anonymous` otherwise.
    /// Always leaves the restoring phase, even on a storage failure.
    pub fn restore(&self) {
        let restored = match self.storage.load_session() {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!(error = %error, "session restore failed, starting anonymous");
                None
            }
        };

        let mut inner = self.lock_inner();
        match restored {
            Some(session) => {
                inner.token = Some(session.token);
                inner.principal = session.principal;
                inner.phase = SessionPhase::Authenticated;
            }
            None => {
                inner.token = None;
                inner.principal = None;
                inner.phase = SessionPhase::Anonymous;
            }
        }
    }

    /// Records a fresh login: memory first, then durable storage.
    /// Concurrent duplicate calls are last-write-wins.
    pub fn establish(&self, token: String, principal: Principal) -> Result<(), ClientError> {
        {
            let mut inner = self.lock_inner();
            inner.token = Some(token.clone());
            inner.principal = Some(principal.clone());
            inner.phase = SessionPhase::Authenticated;
        }
        self.storage.persist_session(&StoredSession {
            token,
            principal: Some(principal),
            issued_at: Some(Utc::now()),
        })
    }

    /// Replaces the cached principal snapshot without touching the token.
    /// Used after a profile refresh or edit while logged in.
    pub fn update_principal(&self, principal: Principal) -> Result<(), ClientError> {
        let token = {
            let mut inner = self.lock_inner();
            let Some(token) = inner.token.clone() else {
                return Err(ClientError::auth("no active session"));
            };
            inner.principal = Some(principal.clone());
            token
        };
        self.storage.persist_session(&StoredSession {
            token,
            principal: Some(principal),
            issued_at: Some(Utc::now()),
        })
    }

    /// Clears memory and durable state unconditionally. Storage failures
    /// are logged, never surfaced.
    pub fn logout(&self) {
        {
            let mut inner = self.lock_inner();
            inner.token = None;
            inner.principal = None;
            inner.phase = SessionPhase::Anonymous;
        }
        if let Err(error) = self.storage.clear_session() {
            tracing::warn!(error = %error, "failed to clear persisted session");
        }
    }

    /// Forced logout on an authentication-failure response. The only
    /// automatic transition to `Anonymous`; the registered hook handles
    /// the navigate-to-login side effect.
    pub fn on_unauthorized(&self) {
        self.logout();
        let hook = self
            .unauthorized_hook
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(hook) = hook.as_ref() {
            hook();
        }
    }

    pub fn set_unauthorized_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        let mut slot = self
            .unauthorized_hook
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(Box::new(hook));
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.lock_inner().token.clone()
    }

    #[must_use]
    pub fn principal(&self) -> Option<Principal> {
        self.lock_inner().principal.clone()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.lock_inner().phase
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        let inner = self.lock_inner();
        inner.phase == SessionPhase::Authenticated && inner.token.is_some()
    }

    #[must_use]
    pub fn is_restoring(&self) -> bool {
        self.lock_inner().phase == SessionPhase::Restoring
    }

    #[must_use]
    pub fn theme(&self) -> ThemePreference {
        match self.storage.load_theme() {
            Ok(theme) => theme.unwrap_or_default(),
            Err(error) => {
                tracing::warn!(error = %error, "theme preference unreadable, using default");
                ThemePreference::default()
            }
        }
    }

    pub fn set_theme(&self, theme: ThemePreference) -> Result<(), ClientError> {
        self.storage.persist_theme(theme)
    }

    fn lock_inner(&self) -> MutexGuard<'_, SessionInner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock_inner();
        f.debug_struct("SessionStore")
            .field("phase", &inner.phase)
            .field("has_token", &inner.token.is_some())
            .field("principal_id", &inner.principal.as_ref().map(|p| p.id))
            .finish_non_exhaustive()
    }
}
