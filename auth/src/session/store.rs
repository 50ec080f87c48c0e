use std::collections::HashMap;

use chrono::Duration;
use parking_lot::Mutex;

use super::clock::Clock;
use super::clock::SystemClock;
use super::models::Session;
use super::models::SessionToken;

/// Storage for live sessions keyed by token.
///
/// Every operation is atomic with respect to the others.
pub trait SessionStore: Send + Sync + 'static {
    /// Start a session for an already verified user.
    ///
    /// # Arguments
    /// * `username` - Owner of the new session
    ///
    /// # Returns
    /// The stored session, carrying its freshly generated token
    fn create(&self, username: &str) -> Session;

    /// Look up a live session.
    ///
    /// An expired entry is removed as part of the same call.
    ///
    /// # Returns
    /// The session if present and not expired
    fn validate(&self, token: &str) -> Option<Session>;

    /// Remove a session. Unknown tokens are ignored.
    fn delete(&self, token: &str);

    /// Remove every expired session.
    ///
    /// # Returns
    /// Number of sessions removed
    fn purge_expired(&self) -> usize;

    /// Lifetime given to new sessions.
    fn ttl(&self) -> Duration;

    /// Number of stored sessions, expired or not.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local session store. Nothing survives a restart.
pub struct InMemorySessionStore<C: Clock = SystemClock> {
    sessions: Mutex<HashMap<SessionToken, Session>>,
    ttl: Duration,
    clock: C,
}

impl InMemorySessionStore<SystemClock> {
    /// Default session lifetime.
    pub const DEFAULT_TTL_HOURS: i64 = 24;

    /// Create a store backed by the wall clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl Default for InMemorySessionStore<SystemClock> {
    fn default() -> Self {
        Self::new(Duration::hours(Self::DEFAULT_TTL_HOURS))
    }
}

impl<C: Clock> InMemorySessionStore<C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }
}

impl<C: Clock> SessionStore for InMemorySessionStore<C> {
    fn create(&self, username: &str) -> Session {
        let created_at = self.clock.now();
        let session = Session {
            token: SessionToken::generate(),
            username: username.to_string(),
            created_at,
            expires_at: created_at + self.ttl,
        };

        self.sessions
            .lock()
            .insert(session.token.clone(), session.clone());

        tracing::debug!(
            username = %session.username,
            expires_at = %session.expires_at,
            "Session created"
        );

        session
    }

    fn validate(&self, token: &str) -> Option<Session> {
        let key = SessionToken(token.to_string());
        let now = self.clock.now();
        let mut sessions = self.sessions.lock();

        let session = sessions.get(&key)?;
        if session.is_expired_at(now) {
            tracing::debug!(username = %session.username, "Session expired, evicting");
            sessions.remove(&key);
            return None;
        }

        Some(session.clone())
    }

    fn delete(&self, token: &str) {
        let key = SessionToken(token.to_string());
        if let Some(session) = self.sessions.lock().remove(&key) {
            tracing::debug!(username = %session.username, "Session deleted");
        }
    }

    fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock();
        let before = sessions.len();

        sessions.retain(|_, session| !session.is_expired_at(now));

        before - sessions.len()
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }

    fn len(&self) -> usize {
        self.sessions.lock().len()
    }
}
