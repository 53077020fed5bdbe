//! Process-wide session state, injected into the [`Client`](crate::Client).

use std::sync::{Arc, RwLock};

/// Holds the bearer token for the current user, if any.
///
/// Cloning a `Session` shares the underlying token, so the client and the
/// code that logs in or out always agree on whether a user is signed in.
#[derive(Clone, Default, Debug)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// An anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that starts out signed in with `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = if token.trim().is_empty() {
            None
        } else {
            Some(token)
        };
    }

    /// Forgets the token. Called on logout and whenever the server answers 401.
    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_token() {
        let session = Session::new();
        let shared = session.clone();
        session.set_token("abc");
        assert_eq!(shared.token().as_deref(), Some("abc"));
        shared.clear();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn blank_token_is_anonymous() {
        let session = Session::with_token("   ");
        assert!(!session.is_authenticated());
    }
}
