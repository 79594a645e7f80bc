//! Identity, session state, and access decisions for timetable-admin.
//!
//! This crate provides:
//! - Identity types (`User`, `Role`, `StaffRole`)
//! - Bearer token persistence (`CredentialStore`, `BearerToken`)
//! - The client session state machine (`SessionState`)
//! - Role-gated navigation decisions (`RouteGuard`)
//!
//! # Access Control Model
//!
//! Each account holds exactly one role. A guarded route either admits any
//! signed-in user or exactly one role. Visitors who are anonymous or hold
//! the wrong role are sent to the login page in the same way, so a guarded
//! route's existence is never revealed.
//!
//! # Example
//!
//! ```
//! use timetable_admin_platform_access::{
//!     GuardDecision, Role, RouteGuard, SessionState, User,
//! };
//!
//! let user = User::new("1", "Asha", "asha@example.edu", Role::Staff);
//! let state = SessionState::Authenticated(user);
//!
//! assert!(state.is_authenticated());
//! assert_eq!(RouteGuard::require(Role::Staff).evaluate(&state), GuardDecision::Render);
//! assert!(matches!(
//!     RouteGuard::require(Role::MainAdmin).evaluate(&state),
//!     GuardDecision::Redirect(_)
//! ));
//! ```

pub mod credential;
pub mod error;
pub mod guard;
pub mod role;
pub mod session;
pub mod user;

// Re-export main types at crate root
pub use credential::{BearerToken, CredentialStore, DEFAULT_STORAGE_KEY, MemoryCredentialStore};
pub use error::{AuthenticationError, AuthorizationError};
pub use guard::{GuardDecision, LOGIN_PATH, Redirect, RouteGuard};
pub use role::{ParseRoleError, Role, StaffRole};
pub use session::SessionState;
pub use user::User;
