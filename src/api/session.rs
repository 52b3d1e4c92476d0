use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::RwLock,
};

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};

/// How long a login stays valid on this client.
pub const SESSION_TTL: Duration = Duration::hours(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub expires_at: OffsetDateTime,
}

impl Session {
    pub fn issued_now(token: impl Into<String>) -> Self {
        Self::issued_at(token, OffsetDateTime::now_utc())
    }

    pub fn issued_at(token: impl Into<String>, issued_at: OffsetDateTime) -> Self {
        Self {
            token: token.into(),
            expires_at: issued_at + SESSION_TTL,
        }
    }

    pub fn is_live_at(&self, now: OffsetDateTime) -> bool {
        !self.token.is_empty() && now < self.expires_at
    }

    pub fn is_live(&self) -> bool {
        self.is_live_at(OffsetDateTime::now_utc())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
    expires_at: i64,
}

/// File that keeps the session between runs, the way a browser keeps a cookie.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing, unreadable, or expired file means "no session".
    pub fn load(&self) -> Option<Session> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Failed to read session file.");
                return None;
            }
        };
        let stored: StoredSession = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Ignoring malformed session file.");
                return None;
            }
        };
        let expires_at = OffsetDateTime::from_unix_timestamp(stored.expires_at).ok()?;
        let session = Session {
            token: stored.token,
            expires_at,
        };
        session.is_live().then_some(session)
    }

    pub fn save(&self, session: &Session) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let stored = StoredSession {
            token: session.token.clone(),
            expires_at: session.expires_at.unix_timestamp(),
        };
        let body = serde_json::to_string(&stored).map_err(io::Error::other)?;
        fs::write(&self.path, body)
    }

    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Owner of the current session, shared by everything that talks to the API.
#[derive(Debug)]
pub struct SessionState {
    current: RwLock<Option<Session>>,
    store: Option<SessionStore>,
}

impl SessionState {
    /// Session kept only in memory.
    pub fn ephemeral() -> Self {
        Self {
            current: RwLock::new(None),
            store: None,
        }
    }

    /// Session backed by `store`, restored from it if still live.
    pub fn persistent(store: SessionStore) -> Self {
        let restored = store.load();
        if restored.is_some() {
            debug!(path = ?store.path(), "Restored session.");
        }
        Self {
            current: RwLock::new(restored),
            store: Some(store),
        }
    }

    /// Token to attach to outgoing requests, if the session is still live.
    pub fn token(&self) -> Option<String> {
        self.current()
            .filter(Session::is_live)
            .map(|session| session.token)
    }

    pub fn current(&self) -> Option<Session> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn establish(&self, session: Session) -> io::Result<()> {
        if let Some(store) = &self.store {
            store.save(&session)?;
        }
        self.replace(Some(session));
        Ok(())
    }

    /// Drops the session from memory and from disk.
    pub fn clear(&self) -> io::Result<()> {
        self.replace(None);
        match &self.store {
            Some(store) => store.clear(),
            None => Ok(()),
        }
    }

    fn replace(&self, session: Option<Session>) {
        match self.current.write() {
            Ok(mut guard) => *guard = session,
            Err(poisoned) => *poisoned.into_inner() = session,
        }
    }
}
