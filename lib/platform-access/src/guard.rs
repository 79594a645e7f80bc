//! Render-or-redirect decisions for guarded routes.
//!
//! A [`RouteGuard`] holds nothing but the role a route requires. It reads the
//! session on every evaluation, so it can never disagree with it.

use crate::error::AuthorizationError;
use crate::role::Role;
use crate::session::SessionState;
use crate::user::User;

/// Entry point visitors are sent to when they may not see a route.
pub const LOGIN_PATH: &str = "/login";

/// Where to send a visitor and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    /// Target path.
    pub to: &'static str,
    /// Replace the current history entry instead of pushing a new one, so
    /// back-navigation cannot return to the guarded page.
    pub replace: bool,
}

impl Redirect {
    /// Redirect to the login entry point, replacing history.
    #[must_use]
    pub const fn to_login() -> Self {
        Self {
            to: LOGIN_PATH,
            replace: true,
        }
    }
}

/// Outcome of evaluating a guard against the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session is still initializing: show a neutral indicator.
    Loading,
    /// Render the protected content.
    Render,
    /// Leave the route.
    Redirect(Redirect),
}

/// Access rule for a navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteGuard {
    required_role: Option<Role>,
}

impl RouteGuard {
    /// Guard admitting any authenticated user.
    #[must_use]
    pub const fn authenticated() -> Self {
        Self {
            required_role: None,
        }
    }

    /// Guard admitting only users holding `role`.
    #[must_use]
    pub const fn require(role: Role) -> Self {
        Self {
            required_role: Some(role),
        }
    }

    /// Builds a guard from an optional role requirement.
    #[must_use]
    pub const fn new(required_role: Option<Role>) -> Self {
        Self { required_role }
    }

    /// Returns the role this guard requires, if any.
    #[must_use]
    pub fn required_role(&self) -> Option<Role> {
        self.required_role
    }

    /// Checks a user against this guard's role requirement.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` when `user` is absent and `RoleMismatch`
    /// when the user's role differs from the required one.
    pub fn authorize<'a>(&self, user: Option<&'a User>) -> Result<&'a User, AuthorizationError> {
        let user = user.ok_or(AuthorizationError::NotAuthenticated)?;
        match self.required_role {
            Some(required) if !user.has_role(required) => Err(AuthorizationError::RoleMismatch {
                required,
                actual: user.role(),
            }),
            _ => Ok(user),
        }
    }

    /// Decides what a route protected by this guard should do right now.
    #[must_use]
    pub fn evaluate(&self, state: &SessionState) -> GuardDecision {
        if state.is_loading() {
            return GuardDecision::Loading;
        }

        match self.authorize(state.current_user()) {
            Ok(_) => GuardDecision::Render,
            Err(reason) => {
                tracing::debug!(%reason, "guarded route redirecting to login");
                // Role mismatch and anonymity share one redirect so the
                // route's existence is not revealed.
                GuardDecision::Redirect(Redirect::to_login())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User::new("1", "Test", "test@example.edu", role)
    }

    #[test]
    fn initializing_always_shows_loading() {
        let state = SessionState::Initializing;
        assert_eq!(
            RouteGuard::authenticated().evaluate(&state),
            GuardDecision::Loading
        );
        for role in Role::ALL {
            assert_eq!(
                RouteGuard::require(role).evaluate(&state),
                GuardDecision::Loading
            );
        }
    }

    #[test]
    fn anonymous_redirects_to_login_replacing_history() {
        let decision = RouteGuard::authenticated().evaluate(&SessionState::Anonymous);
        assert_eq!(
            decision,
            GuardDecision::Redirect(Redirect {
                to: "/login",
                replace: true
            })
        );
    }

    #[test]
    fn any_authenticated_user_passes_roleless_guard() {
        for role in Role::ALL {
            let state = SessionState::Authenticated(user(role));
            assert_eq!(
                RouteGuard::authenticated().evaluate(&state),
                GuardDecision::Render
            );
        }
    }

    #[test]
    fn matching_role_renders() {
        let state = SessionState::Authenticated(user(Role::MainAdmin));
        assert_eq!(
            RouteGuard::require(Role::MainAdmin).evaluate(&state),
            GuardDecision::Render
        );
    }

    #[test]
    fn staff_on_main_admin_route_is_redirected() {
        let state = SessionState::Authenticated(user(Role::Staff));
        assert_eq!(
            RouteGuard::require(Role::MainAdmin).evaluate(&state),
            GuardDecision::Redirect(Redirect::to_login())
        );
    }

    #[test]
    fn role_mismatch_is_indistinguishable_from_anonymity() {
        let guard = RouteGuard::require(Role::DeptAdmin);
        let mismatch = guard.evaluate(&SessionState::Authenticated(user(Role::Staff)));
        let anonymous = guard.evaluate(&SessionState::Anonymous);
        assert_eq!(mismatch, anonymous);
    }

    #[test]
    fn authorize_reports_specific_reason() {
        let guard = RouteGuard::require(Role::MainAdmin);
        assert_eq!(
            guard.authorize(None),
            Err(AuthorizationError::NotAuthenticated)
        );

        let staff = user(Role::Staff);
        assert_eq!(
            guard.authorize(Some(&staff)),
            Err(AuthorizationError::RoleMismatch {
                required: Role::MainAdmin,
                actual: Role::Staff,
            })
        );
    }

    #[test]
    fn new_matches_named_constructors() {
        assert_eq!(RouteGuard::new(None), RouteGuard::authenticated());
        assert_eq!(
            RouteGuard::new(Some(Role::Staff)),
            RouteGuard::require(Role::Staff)
        );
        assert_eq!(
            RouteGuard::require(Role::Staff).required_role(),
            Some(Role::Staff)
        );
    }
}
