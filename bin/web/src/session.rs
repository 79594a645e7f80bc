//! Session context shared by every view.
//!
//! The controller only exists in the browser. During server-side rendering
//! the context carries no controller, so the session stays `Initializing`
//! and guarded routes render their loading indicator until hydration.

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;
use timetable_admin_gateway::HttpGateway;
use timetable_admin_platform_access::{AuthenticationError, SessionState, User};
use timetable_admin_session::SessionController;

const BACKEND_UNAVAILABLE: &str = "Backend client unavailable";

/// Handle on the session and backend client, provided through context.
#[derive(Clone, Copy)]
pub struct SessionContext {
    state: RwSignal<SessionState>,
    controller: StoredValue<Option<Arc<SessionController>>>,
    gateway: StoredValue<Option<HttpGateway>>,
}

impl SessionContext {
    /// Reactive view of the session state.
    #[must_use]
    pub fn state(&self) -> ReadSignal<SessionState> {
        self.state.read_only()
    }

    /// The signed-in user, tracked.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.with(|state| state.current_user().cloned())
    }

    /// Backend client for the dashboards.
    ///
    /// # Errors
    ///
    /// Fails outside the browser, where no client is built.
    pub fn backend(&self) -> Result<HttpGateway, String> {
        self.gateway
            .get_value()
            .ok_or_else(|| BACKEND_UNAVAILABLE.to_string())
    }

    /// Signs in and mirrors the resulting state into the signal.
    ///
    /// # Errors
    ///
    /// Returns the controller's error, or a rejection when no controller is
    /// available.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthenticationError> {
        let Some(controller) = self.controller.get_value() else {
            return Err(AuthenticationError::rejected(Some(
                BACKEND_UNAVAILABLE.to_string(),
            )));
        };
        let result = controller.login(email, password).await;
        self.state.set(controller.state());
        result
    }

    /// Signs out in the background, then runs `then`.
    pub fn logout(&self, then: impl FnOnce() + 'static) {
        let Some(controller) = self.controller.get_value() else {
            self.state.set(SessionState::Anonymous);
            then();
            return;
        };
        let state = self.state;
        spawn_local(async move {
            controller.logout().await;
            state.set(controller.state());
            then();
        });
    }
}

/// Builds the session context, provides it, and starts initialization once
/// the app is running in the browser.
pub fn provide_session() -> SessionContext {
    let (controller, gateway) = build_client();
    let context = SessionContext {
        state: RwSignal::new(SessionState::Initializing),
        controller: StoredValue::new(controller),
        gateway: StoredValue::new(gateway),
    };
    provide_context(context);

    // Effects only run after hydration.
    Effect::new(move |_| {
        let Some(controller) = context.controller.get_value() else {
            context.state.set(SessionState::Anonymous);
            return;
        };

        let state = context.state;
        let mut transitions = controller.subscribe();
        spawn_local(async move {
            while transitions.changed().await.is_ok() {
                let next = transitions.borrow_and_update().clone();
                state.set(next);
            }
        });
        spawn_local(async move {
            controller.initialize().await;
        });
    });

    context
}

/// Returns the session context provided by [`provide_session`].
///
/// # Panics
///
/// Panics if called outside the `App` component tree.
#[must_use]
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

#[cfg(feature = "hydrate")]
fn build_client() -> (Option<Arc<SessionController>>, Option<HttpGateway>) {
    use crate::storage::{BrowserCredentialStore, published_api_base_url};
    use timetable_admin_gateway::ClientConfig;
    use timetable_admin_platform_access::CredentialStore;

    let config = published_api_base_url()
        .map(ClientConfig::with_base_url)
        .unwrap_or_default();
    let credentials: Arc<dyn CredentialStore> =
        Arc::new(BrowserCredentialStore::new(config.storage_key.clone()));

    match HttpGateway::new(&config, credentials.clone()) {
        Ok(gateway) => {
            let controller = SessionController::new(Arc::new(gateway.clone()), credentials);
            (Some(Arc::new(controller)), Some(gateway))
        }
        Err(report) => {
            leptos::logging::error!("failed to build backend client: {report}");
            (None, None)
        }
    }
}

#[cfg(not(feature = "hydrate"))]
fn build_client() -> (Option<Arc<SessionController>>, Option<HttpGateway>) {
    (None, None)
}
