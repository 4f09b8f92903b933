//! In-memory session store
//!
//! Sessions are keyed by a random UUID carried in the `meal_session` cookie.
//! An idle session expires after the configured timeout; expiry is checked
//! (and the entry evicted) on lookup.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use http::{HeaderMap, HeaderValue, header};
use shared::client::SessionInfo;
use uuid::Uuid;

/// Session cookie name
pub const SESSION_COOKIE: &str = "meal_session";

/// Who is logged in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Employee { emp_id: String, emp_name: String },
    Admin { account: String },
}

impl Session {
    pub fn is_admin(&self) -> bool {
        matches!(self, Session::Admin { .. })
    }

    pub fn info(&self) -> SessionInfo {
        match self {
            Session::Employee { emp_id, emp_name } => SessionInfo::Employee {
                emp_id: emp_id.clone(),
                emp_name: emp_name.clone(),
            },
            Session::Admin { account } => SessionInfo::Admin {
                account: account.clone(),
            },
        }
    }
}

#[derive(Debug)]
struct SessionEntry {
    session: Session,
    last_seen: Instant,
}

/// Result of a session lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLookup {
    Active(Session),
    Expired,
    Missing,
}

/// 会话存储 (DashMap, 无全局锁)
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, SessionEntry>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            idle_timeout,
        }
    }

    /// Start a session and return its id
    pub fn create(&self, session: Session) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.insert(
            id.clone(),
            SessionEntry {
                session,
                last_seen: Instant::now(),
            },
        );
        id
    }

    /// Look up a session and refresh its idle timer
    pub fn lookup(&self, id: &str) -> SessionLookup {
        {
            let Some(mut entry) = self.sessions.get_mut(id) else {
                return SessionLookup::Missing;
            };
            if entry.last_seen.elapsed() <= self.idle_timeout {
                entry.last_seen = Instant::now();
                return SessionLookup::Active(entry.session.clone());
            }
        }

        // shard guard released above
        self.sessions.remove(id);
        SessionLookup::Expired
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        match self.lookup(id) {
            SessionLookup::Active(session) => Some(session),
            _ => None,
        }
    }

    /// End a session; returns the removed session if it existed
    pub fn remove(&self, id: &str) -> Option<Session> {
        self.sessions.remove(id).map(|(_, entry)| entry.session)
    }

    /// Drop every expired session
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        let idle = self.idle_timeout;
        self.sessions.retain(|_, entry| entry.last_seen.elapsed() <= idle);
        before - self.sessions.len()
    }

    /// Purge expired sessions every `period` until the runtime shuts down
    pub fn start_purge_task(&self, period: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let purged = store.purge_expired();
                if purged > 0 {
                    tracing::debug!(purged, remaining = store.len(), "Purged expired sessions");
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

// ── Cookie helpers ──────────────────────────────────────────────────

/// Session id from the request's `Cookie` header(s)
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value for a new session
pub fn session_cookie(id: &str) -> HeaderValue {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={id}; HttpOnly; Path=/; SameSite=Lax"
    ))
    .unwrap_or_else(|_| clear_session_cookie())
}

/// `Set-Cookie` value that removes the session cookie
pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0"
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("Max-Age=0"))
}
