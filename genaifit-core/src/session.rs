//! Authentication session state.
//!
//! The session is a marker persisted in the key-value substrate under
//! [`SESSION_KEY`]. Its presence is the only thing that decides whether
//! gated operations may run.
//!
//! # States
//!
//! 1. **Anonymous** - no marker stored
//! 2. **Authenticated** - marker stored by a successful login or signup
//!
//! Logout removes the marker. Sessions never expire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::UserProfile;
use crate::store::{KeyValueStore, KvError};

/// Substrate key holding the session marker.
pub const SESSION_KEY: &str = "auth_token";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Substrate(#[from] KvError),

    #[error("Failed to encode session marker: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// Persisted session marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMarker {
    /// Opaque mock token; carries no security.
    pub token: String,
    pub user: UserProfile,
    pub issued_at: DateTime<Utc>,
}

/// Session bound to one substrate.
#[derive(Clone)]
pub struct Session {
    kv: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub fn state(&self) -> SessionState {
        match self.kv.get(SESSION_KEY) {
            Ok(Some(_)) => SessionState::Authenticated,
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                tracing::warn!("Failed to read session marker: {}", e);
                SessionState::Anonymous
            }
        }
    }

    /// Returns true if a session marker is present.
    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Returns the signed-in user recorded in the marker.
    ///
    /// A marker that cannot be decoded still counts as authenticated but
    /// yields `None` here.
    pub fn current_user(&self) -> Option<UserProfile> {
        let raw = self.kv.get(SESSION_KEY).ok()??;
        serde_json::from_str::<SessionMarker>(&raw)
            .ok()
            .map(|marker| marker.user)
    }

    /// Records a session for `user`.
    ///
    /// Nothing is stored unless the marker encodes and the write lands.
    pub(crate) fn begin(&self, user: UserProfile) -> Result<SessionMarker, SessionError> {
        let marker = SessionMarker {
            token: format!("mock-{}", Uuid::new_v4().simple()),
            user,
            issued_at: Utc::now(),
        };
        let raw = serde_json::to_string(&marker)?;
        self.kv.set(SESSION_KEY, raw)?;
        Ok(marker)
    }

    /// Clears the session marker.
    pub(crate) fn end(&self) -> Result<(), SessionError> {
        Ok(self.kv.remove(SESSION_KEY)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::SessionlessStore;
    use crate::store::MemoryStore;

    fn profile() -> UserProfile {
        UserProfile {
            id: 1,
            email: "demo@genaifit.com".into(),
            name: "Demo User".into(),
        }
    }

    #[test]
    fn test_starts_anonymous() {
        let session = Session::new(Arc::new(MemoryStore::new()));
        assert_eq!(session.state(), SessionState::Anonymous);
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_begin_and_end() {
        let session = Session::new(Arc::new(MemoryStore::new()));

        let marker = session.begin(profile()).unwrap();
        assert!(marker.token.starts_with("mock-"));
        assert!(session.is_authenticated());
        assert_eq!(session.current_user(), Some(profile()));

        session.end().unwrap();
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_any_marker_counts_as_authenticated() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(SESSION_KEY, "mock_jwt_token".to_string()).unwrap();

        let session = Session::new(kv);
        assert!(session.is_authenticated());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_sessions_on_separate_substrates_are_isolated() {
        let a = Session::new(Arc::new(MemoryStore::new()));
        let b = Session::new(Arc::new(MemoryStore::new()));

        a.begin(profile()).unwrap();
        assert!(a.is_authenticated());
        assert!(!b.is_authenticated());
    }

    #[test]
    fn test_failed_write_leaves_session_anonymous() {
        let session = Session::new(Arc::new(SessionlessStore::default()));

        let err = session.begin(profile()).unwrap_err();

        assert!(matches!(err, SessionError::Substrate(KvError::InvalidKey(_))));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_encode_failure_is_an_error() {
        let source = serde_json::from_str::<SessionMarker>("").unwrap_err();
        let err = SessionError::from(source);
        assert!(err.to_string().starts_with("Failed to encode session marker"));
    }
}
