//! Error types for the platform-access crate.
//!
//! - `AuthenticationError`: a login attempt did not produce a session
//! - `AuthorizationError`: a settled session may not enter a guarded route

use std::fmt;

use crate::role::Role;

/// Default reason shown when the backend rejects a login without saying why.
pub const DEFAULT_LOGIN_FAILURE: &str = "Login failed";

/// Errors from login attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// The backend refused the credentials or could not be reached.
    Rejected { reason: String },
    /// The backend reported success but returned no usable identity.
    IncompleteResponse,
}

impl AuthenticationError {
    /// Builds a rejection, substituting the default reason for a missing one.
    #[must_use]
    pub fn rejected(reason: Option<String>) -> Self {
        let reason = reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOGIN_FAILURE.to_string());
        Self::Rejected { reason }
    }

    /// Message suitable for the login form.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected { reason } => reason,
            Self::IncompleteResponse => "An unexpected error occurred during login",
        }
    }
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { reason } => write!(f, "login rejected: {reason}"),
            Self::IncompleteResponse => {
                write!(f, "login succeeded without returning a user")
            }
        }
    }
}

impl std::error::Error for AuthenticationError {}

/// Reasons a guarded route refuses a visitor.
///
/// Both variants lead to the same redirect; they are kept apart only for
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// No user is signed in.
    NotAuthenticated,
    /// The signed-in user holds a different role.
    RoleMismatch { required: Role, actual: Role },
}

impl fmt::Display for AuthorizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "user is not authenticated"),
            Self::RoleMismatch { required, actual } => {
                write!(f, "route requires role {required}, user has {actual}")
            }
        }
    }
}

impl std::error::Error for AuthorizationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_keeps_server_reason() {
        let err = AuthenticationError::rejected(Some("Invalid email or password".to_string()));
        assert_eq!(err.user_message(), "Invalid email or password");
        assert!(err.to_string().contains("Invalid email or password"));
    }

    #[test]
    fn rejected_falls_back_to_default_reason() {
        assert_eq!(
            AuthenticationError::rejected(None).user_message(),
            DEFAULT_LOGIN_FAILURE
        );
        assert_eq!(
            AuthenticationError::rejected(Some("  ".to_string())).user_message(),
            DEFAULT_LOGIN_FAILURE
        );
    }

    #[test]
    fn incomplete_response_display() {
        let err = AuthenticationError::IncompleteResponse;
        assert!(err.to_string().contains("without returning a user"));
        assert!(err.user_message().contains("unexpected"));
    }

    #[test]
    fn role_mismatch_display_names_both_roles() {
        let err = AuthorizationError::RoleMismatch {
            required: Role::MainAdmin,
            actual: Role::Staff,
        };
        assert!(err.to_string().contains("main_admin"));
        assert!(err.to_string().contains("staff"));
    }

    #[test]
    fn not_authenticated_display() {
        let err = AuthorizationError::NotAuthenticated;
        assert!(err.to_string().contains("not authenticated"));
    }
}
