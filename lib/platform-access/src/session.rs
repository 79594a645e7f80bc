//! Client-side session state.
//!
//! The session is a three-state machine. Authentication status is derived
//! from whether a user is present, so it cannot disagree with the identity:
//!
//! ```text
//! Initializing ──verify ok──▶ Authenticated(user)
//!      │                          ▲        │
//!      └─no token / verify fails─▶ Anonymous ◀─logout
//!                                  └──login──┘
//! ```

use serde::{Deserialize, Serialize};

use crate::role::Role;
use crate::user::User;

/// Authentication state of the running client.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "user", rename_all = "snake_case")]
pub enum SessionState {
    /// Start-up check of a stored token has not finished yet.
    #[default]
    Initializing,
    /// No one is signed in.
    Anonymous,
    /// A verified identity is signed in.
    Authenticated(User),
}

impl SessionState {
    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Initializing | Self::Anonymous => None,
        }
    }

    /// Returns true exactly when a user is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Returns true while the start-up token check is running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Initializing)
    }

    /// Returns true once the state can no longer be `Initializing`.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    /// Returns the role of the signed-in user.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.current_user().map(User::role)
    }

    /// Short name of the state for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Anonymous => "anonymous",
            Self::Authenticated(_) => "authenticated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff() -> User {
        User::new("3", "Kiran", "kiran@example.edu", Role::Staff)
    }

    #[test]
    fn default_state_is_initializing() {
        let state = SessionState::default();
        assert!(state.is_loading());
        assert!(!state.is_settled());
        assert!(!state.is_authenticated());
        assert!(state.current_user().is_none());
    }

    #[test]
    fn authenticated_iff_user_present() {
        let states = [
            SessionState::Initializing,
            SessionState::Anonymous,
            SessionState::Authenticated(staff()),
        ];

        for state in states {
            assert_eq!(state.is_authenticated(), state.current_user().is_some());
        }
    }

    #[test]
    fn authenticated_state_exposes_role() {
        let state = SessionState::Authenticated(staff());
        assert_eq!(state.role(), Some(Role::Staff));
        assert!(state.is_settled());
        assert_eq!(state.name(), "authenticated");
    }

    #[test]
    fn anonymous_is_settled_without_user() {
        let state = SessionState::Anonymous;
        assert!(state.is_settled());
        assert!(state.role().is_none());
    }

    #[test]
    fn session_state_serialization_roundtrip() {
        let state = SessionState::Authenticated(staff());
        let json = serde_json::to_string(&state).expect("serialize");
        assert!(json.contains("\"status\":\"authenticated\""));
        let parsed: SessionState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(state, parsed);
    }
}
