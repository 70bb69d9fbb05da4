//! Session store and the `AuthSession` handle.
//!
//! ARCHITECTURE
//! ============
//! Each browser session is identified by an opaque random token carried in
//! a cookie. The store maps tokens to the session's identity slot and toast
//! queue. An `AuthSession` can only be obtained from a `SessionStore`, and a
//! store cannot be built without an `Authenticator`, so every handle in the
//! process is able to log in and out.
//!
//! TRADE-OFFS
//! ==========
//! Sessions live in memory. A session opened without a known token is not
//! stored until a request leaves something in it (a signed-in user or a
//! pending toast), so anonymous traffic never grows the map. Idle entries
//! are pruned at most once per `PRUNE_INTERVAL`, or immediately when the
//! store is at capacity; past that the least recently seen entry is evicted.
//! A restart signs everybody out.

use std::collections::HashMap;
use std::fmt::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::RwLock;

use super::auth::{AuthError, Authenticator, Credentials, CurrentUser};
use crate::config::{DEFAULT_MAX_SESSIONS, DEFAULT_TOAST_LIMIT};
use crate::toast::Toaster;

const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

// =============================================================================
// AUTH SESSION
// =============================================================================

/// Handle to one browser session's identity and toast queue.
/// Clones refer to the same session.
#[derive(Clone)]
pub struct AuthSession {
    token: String,
    user: Arc<RwLock<Option<CurrentUser>>>,
    remember: Arc<AtomicBool>,
    toaster: Toaster,
    authenticator: Arc<dyn Authenticator>,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl AuthSession {
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    pub async fn current_user(&self) -> Option<CurrentUser> {
        self.user.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }

    /// Whether the signed-in user asked to be remembered.
    #[must_use]
    pub fn is_remembered(&self) -> bool {
        self.remember.load(Ordering::Relaxed)
    }

    /// Something worth keeping across requests.
    async fn has_state(&self) -> bool {
        self.toaster.pending() > 0 || self.is_authenticated().await
    }

    /// Authenticate and store the identity. On failure the previous
    /// identity (if any) is left in place.
    ///
    /// # Errors
    ///
    /// Returns whatever the configured authenticator rejects with.
    pub async fn login(&self, credentials: &Credentials) -> Result<CurrentUser, AuthError> {
        let user = self.authenticator.authenticate(credentials).await?;
        *self.user.write().await = Some(user.clone());
        self.remember.store(credentials.remember, Ordering::Relaxed);
        tracing::info!(user_id = %user.id, remember = credentials.remember, "session signed in");
        Ok(user)
    }

    pub async fn logout(&self) {
        self.remember.store(false, Ordering::Relaxed);
        if let Some(user) = self.user.write().await.take() {
            tracing::info!(user_id = %user.id, "session signed out");
        }
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

struct SessionEntry {
    user: Arc<RwLock<Option<CurrentUser>>>,
    remember: Arc<AtomicBool>,
    toaster: Toaster,
    last_seen: Instant,
}

struct Sessions {
    entries: HashMap<String, SessionEntry>,
    last_pruned: Instant,
}

/// Result of [`SessionStore::open`].
#[derive(Debug, Clone)]
pub struct OpenedSession {
    pub session: AuthSession,
    /// False for a fresh session that has not been committed yet. Its token
    /// is unknown to the client until [`SessionStore::commit`] stores it.
    pub stored: bool,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<Sessions>>,
    authenticator: Arc<dyn Authenticator>,
    idle_ttl: Duration,
    toast_limit: usize,
    max_sessions: usize,
}

impl SessionStore {
    #[must_use]
    pub fn new(authenticator: Arc<dyn Authenticator>, idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(Sessions { entries: HashMap::new(), last_pruned: Instant::now() })),
            authenticator,
            idle_ttl,
            toast_limit: DEFAULT_TOAST_LIMIT,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }

    #[must_use]
    pub fn with_toast_limit(mut self, limit: usize) -> Self {
        self.toast_limit = limit;
        self
    }

    #[must_use]
    pub fn with_max_sessions(mut self, max: usize) -> Self {
        self.max_sessions = max.max(1);
        self
    }

    #[must_use]
    pub fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }

    /// Resume the stored session for `token`, or hand out a fresh, unstored
    /// one when the token is absent, unknown, or idle past the TTL.
    pub async fn open(&self, token: Option<&str>) -> OpenedSession {
        if let Some(token) = token {
            let now = Instant::now();
            let mut sessions = self.sessions.write().await;
            match sessions.entries.get_mut(token) {
                Some(entry) if now.duration_since(entry.last_seen) <= self.idle_ttl => {
                    entry.last_seen = now;
                    let session = self.handle(token.to_owned(), entry);
                    return OpenedSession { session, stored: true };
                }
                Some(_) => {
                    sessions.entries.remove(token);
                    tracing::debug!("session expired");
                }
                None => {}
            }
        }

        let entry = self.fresh_entry();
        OpenedSession { session: self.handle(generate_token(), &entry), stored: false }
    }

    /// Store a fresh session once it holds a user or a pending toast.
    /// Returns true when the session was stored by this call, meaning its
    /// token must now be sent to the client.
    pub async fn commit(&self, session: &AuthSession) -> bool {
        if !session.has_state().await {
            return false;
        }

        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        if sessions.entries.contains_key(session.token()) {
            return false;
        }

        let full = sessions.entries.len() >= self.max_sessions;
        if full || now.duration_since(sessions.last_pruned) >= PRUNE_INTERVAL {
            self.prune(&mut sessions, now);
        }
        if sessions.entries.len() >= self.max_sessions {
            evict_least_recent(&mut sessions.entries);
        }

        sessions.entries.insert(
            session.token.clone(),
            SessionEntry {
                user: session.user.clone(),
                remember: session.remember.clone(),
                toaster: session.toaster.clone(),
                last_seen: now,
            },
        );
        true
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.entries.is_empty()
    }

    fn prune(&self, sessions: &mut Sessions, now: Instant) {
        let before = sessions.entries.len();
        sessions
            .entries
            .retain(|_, entry| now.duration_since(entry.last_seen) <= self.idle_ttl);
        sessions.last_pruned = now;
        let pruned = before - sessions.entries.len();
        if pruned > 0 {
            tracing::debug!(pruned, "pruned idle sessions");
        }
    }

    fn fresh_entry(&self) -> SessionEntry {
        SessionEntry {
            user: Arc::new(RwLock::new(None)),
            remember: Arc::new(AtomicBool::new(false)),
            toaster: Toaster::with_limit(self.toast_limit),
            last_seen: Instant::now(),
        }
    }

    fn handle(&self, token: String, entry: &SessionEntry) -> AuthSession {
        AuthSession {
            token,
            user: entry.user.clone(),
            remember: entry.remember.clone(),
            toaster: entry.toaster.clone(),
            authenticator: self.authenticator.clone(),
        }
    }
}

fn evict_least_recent(entries: &mut HashMap<String, SessionEntry>) {
    let oldest = entries
        .iter()
        .min_by_key(|(_, entry)| entry.last_seen)
        .map(|(token, _)| token.clone());
    if let Some(token) = oldest {
        entries.remove(&token);
        tracing::warn!(capacity = entries.len() + 1, "session store full; evicted least recent session");
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
