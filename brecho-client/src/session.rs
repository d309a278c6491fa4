//! Auth session
//!
//! The session is a cheap-to-clone handle shared by the HTTP transport
//! (which reads the bearer token) and the screens (which check
//! `is_authenticated` before issuing requests).

use parking_lot::RwLock;
use shared::client::UserInfo;
use std::sync::Arc;

/// Anything that can tell whether requests would be authenticated
pub trait AuthSession: Send + Sync {
    fn is_authenticated(&self) -> bool;
}

#[derive(Debug, Clone)]
struct SessionData {
    token: String,
    user: Option<UserInfo>,
}

/// Shared session state
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<SessionData>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that already carries a token (e.g. restored from storage)
    pub fn with_token(token: impl Into<String>) -> Self {
        let handle = Self::new();
        handle.sign_in(token, None);
        handle
    }

    pub fn sign_in(&self, token: impl Into<String>, user: Option<UserInfo>) {
        *self.inner.write() = Some(SessionData {
            token: token.into(),
            user,
        });
    }

    pub fn sign_out(&self) {
        *self.inner.write() = None;
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.inner.read().as_ref().and_then(|s| s.user.clone())
    }
}

impl AuthSession for SessionHandle {
    fn is_authenticated(&self) -> bool {
        self.inner.read().is_some()
    }
}
