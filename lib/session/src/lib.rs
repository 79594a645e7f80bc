//! Session lifecycle for the timetable-admin client.
//!
//! [`SessionController`] owns the single authoritative [`SessionState`]. It
//! resolves a stored token at start-up, performs login and logout through a
//! [`BackendGateway`](timetable_admin_gateway::BackendGateway), and
//! broadcasts every transition to subscribers.

pub mod controller;

pub use controller::SessionController;
pub use timetable_admin_platform_access::{AuthenticationError, SessionState};
