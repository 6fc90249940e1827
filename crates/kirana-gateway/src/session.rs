//! # Session Store
//!
//! The cached session identity, shared read-mostly state.
//!
//! The auth collaborator (out of scope for this repo) writes the cached
//! user after login/logout; the gateway reads it on every call to decide
//! whether to attach the `x-username` header, and the session controller
//! reads it at checkout for the receipt's store header.
//!
//! Absence of a session is not an error: requests simply go out without
//! the identity header and the server decides authorization.

use std::sync::{Arc, RwLock};

use kirana_core::SessionUser;

/// Shared handle to the cached session identity.
///
/// Cloning is cheap; all clones observe the same cache. Reads take the
/// lock briefly and never hold it across an await.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<SessionUser>>>,
}

impl SessionStore {
    /// Creates an empty store (no cached session).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a cached user.
    pub fn with_user(user: SessionUser) -> Self {
        SessionStore {
            inner: Arc::new(RwLock::new(Some(user))),
        }
    }

    /// Snapshot of the cached user, if any.
    pub fn current(&self) -> Option<SessionUser> {
        self.inner.read().expect("session store poisoned").clone()
    }

    /// The cached username, if a session exists.
    pub fn username(&self) -> Option<String> {
        self.inner
            .read()
            .expect("session store poisoned")
            .as_ref()
            .map(|u| u.username.clone())
    }

    /// Replaces the cached session. Called by the auth collaborator only.
    pub fn replace(&self, user: Option<SessionUser>) {
        *self.inner.write().expect("session store poisoned") = user;
    }

    /// Clears the cached session.
    pub fn clear(&self) {
        self.replace(None);
    }
}
