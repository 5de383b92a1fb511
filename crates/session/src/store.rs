//! Tab-scoped session storage

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::types::Identity;

/// The signed-in identity together with its bearer credential.
///
/// Both halves live in one value so a store can only ever hold a complete
/// session or nothing.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub identity: Identity,
    pub credential: String,
}

impl Session {
    pub fn new(identity: Identity, credential: impl Into<String>) -> Self {
        Self {
            identity,
            credential: credential.into(),
        }
    }

    /// False for a blank credential, which counts as signed out
    pub fn has_credential(&self) -> bool {
        !self.credential.trim().is_empty()
    }

    /// `Authorization` header value for this session
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.credential)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("identity", &self.identity)
            .field("credential", &"[REDACTED]")
            .finish()
    }
}

/// Source of truth for who is signed in.
///
/// Implementations must keep identity and credential together: `set` and
/// `clear` replace both at once, and `get` never returns half a session.
pub trait SessionStore: Send + Sync {
    /// Store a session. A blank credential is the same as no credential,
    /// so it clears the store instead.
    fn set(&self, identity: Identity, credential: String);

    /// Current session, if any. Never fails.
    fn get(&self) -> Option<Session>;

    /// Forget the current session. Clearing an empty store is a no-op.
    fn clear(&self);

    fn is_authenticated(&self) -> bool {
        self.get().is_some_and(|session| session.has_credential())
    }
}

/// In-memory store scoped to one browser tab; nothing is persisted.
///
/// Clones share the same slot, so the API layer and every page controller
/// of a tab observe the same session.
#[derive(Clone, Default)]
pub struct TabSessionStore {
    slot: Arc<RwLock<Option<Session>>>,
}

impl TabSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a session, for restoring a tab in tests
    pub fn with_session(session: Session) -> Self {
        let store = Self::new();
        store.set(session.identity, session.credential);
        store
    }
}

impl fmt::Debug for TabSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabSessionStore")
            .field("session", &self.get())
            .finish()
    }
}

impl SessionStore for TabSessionStore {
    fn set(&self, identity: Identity, credential: String) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        if credential.trim().is_empty() {
            tracing::warn!(user_id = identity.id, "Refusing to store session without a credential");
            *slot = None;
            return;
        }
        tracing::debug!(user_id = identity.id, role = %identity.role, "Session stored");
        *slot = Some(Session::new(identity, credential));
    }

    fn get(&self) -> Option<Session> {
        self.slot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn clear(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        if slot.take().is_some() {
            tracing::debug!("Session cleared");
        }
    }
}
