//! Per-visitor widget state and session storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::widgets::{ChatWidget, SearchWidget};

/// Default session timeout (30 minutes).
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// One visitor's widgets.
///
/// Each widget sits behind its own mutex. Access goes through closures so a
/// guard can never be held across an `.await`.
#[derive(Debug)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    /// Unique session identifier.
    id: String,
    chat: Mutex<ChatWidget>,
    search: Mutex<SearchWidget>,
    /// Last activity time.
    last_activity: RwLock<DateTime<Utc>>,
}

impl Clone for Session {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Session {
    /// Create a new session with the given ID.
    fn new(id: String, backend_url: &str) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                id,
                chat: Mutex::new(ChatWidget::new(backend_url)),
                search: Mutex::new(SearchWidget::new()),
                last_activity: RwLock::new(Utc::now()),
            }),
        }
    }

    /// Get the session ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Run `f` against the chat widget.
    pub fn with_chat<R>(&self, f: impl FnOnce(&mut ChatWidget) -> R) -> R {
        self.touch();
        f(&mut lock(&self.inner.chat))
    }

    /// Run `f` against the search widget.
    pub fn with_search<R>(&self, f: impl FnOnce(&mut SearchWidget) -> R) -> R {
        self.touch();
        f(&mut lock(&self.inner.search))
    }

    /// Update the last activity timestamp.
    fn touch(&self) {
        let mut guard = self
            .inner
            .last_activity
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Utc::now();
    }

    /// Whether the session has been idle for longer than `timeout`.
    #[must_use]
    pub fn is_expired(&self, timeout: Duration) -> bool {
        let last = *self
            .inner
            .last_activity
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        // Negative durations (clock skew) count as fresh.
        (Utc::now() - last)
            .to_std()
            .is_ok_and(|idle| idle > timeout)
    }
}

/// Thread-safe store for sessions.
///
/// Provides methods for creating, retrieving, and cleaning up sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug)]
struct SessionStoreInner {
    sessions: RwLock<HashMap<String, Session>>,
    /// Shown in chat error notifications.
    backend_url: String,
    /// Inactivity after which a session is dropped.
    timeout: Duration,
}

impl SessionStore {
    /// Create a new session store with the default timeout.
    #[must_use]
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self::with_timeout(backend_url, DEFAULT_SESSION_TIMEOUT)
    }

    /// Create a new session store whose sessions expire after `timeout` idle.
    #[must_use]
    pub fn with_timeout(backend_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                sessions: RwLock::new(HashMap::new()),
                backend_url: backend_url.into(),
                timeout,
            }),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Session>> {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Session>> {
        self.inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a new session and return it.
    #[must_use]
    pub fn create(&self) -> Session {
        let id = Uuid::new_v4().to_string();
        self.create_with_id(id)
    }

    /// Create a new session with a specific ID.
    #[must_use]
    pub fn create_with_id(&self, id: impl Into<String>) -> Session {
        let id = id.into();
        let session = Session::new(id.clone(), &self.inner.backend_url);
        self.write().insert(id, session.clone());
        debug!(name: "session.created", session_id = %session.id(), "Session created");
        session
    }

    /// Get a live session by ID. An expired session not yet swept is
    /// removed and reported as absent.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Session> {
        let session = self.read().get(id).cloned()?;
        if session.is_expired(self.inner.timeout) {
            self.remove(id);
            debug!(name: "session.expired_on_access", session_id = %id, "Expired session dropped");
            return None;
        }
        Some(session)
    }

    /// Get a session by ID, creating it if it doesn't exist.
    #[must_use]
    pub fn get_or_create(&self, id: &str) -> Session {
        if let Some(session) = self.get(id) {
            return session;
        }
        // Unknown or expired id: start over under a fresh UUID rather than
        // trusting client-chosen keys.
        self.create()
    }

    /// Remove a session by ID.
    pub fn remove(&self, id: &str) -> Option<Session> {
        self.write().remove(id)
    }

    /// Get the number of active sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if there are no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove sessions idle for longer than the store's timeout.
    ///
    /// Returns the number of sessions removed.
    pub fn cleanup_expired(&self) -> usize {
        let timeout = self.inner.timeout;
        let mut guard = self.write();
        let before = guard.len();
        guard.retain(|_, session| !session.is_expired(timeout));
        before - guard.len()
    }

    /// Periodically remove expired sessions.
    pub fn spawn_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let removed = store.cleanup_expired();
                if removed > 0 {
                    info!(
                        name: "session.expired",
                        removed,
                        remaining = store.len(),
                        "Expired sessions removed"
                    );
                }
            }
        })
    }
}
