//! The session controller.
//!
//! All writes to the session go through one `watch::Sender`, so readers on
//! any thread observe the same sequence of transitions and the state can
//! never report a user while being unauthenticated.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use timetable_admin_gateway::{BackendGateway, Credentials};
use timetable_admin_platform_access::{
    AuthenticationError, BearerToken, CredentialStore, SessionState, User,
};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Single owner of "who is signed in".
pub struct SessionController {
    gateway: Arc<dyn BackendGateway>,
    credentials: Arc<dyn CredentialStore>,
    state: watch::Sender<SessionState>,
    initialized: AtomicBool,
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("state", &self.state.borrow().name())
            .field("initialized", &self.initialized.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

impl SessionController {
    /// Creates a controller in the `Initializing` state.
    ///
    /// `credentials` must be the same store the gateway persists tokens in.
    #[must_use]
    pub fn new(gateway: Arc<dyn BackendGateway>, credentials: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Initializing);
        Self {
            gateway,
            credentials,
            state,
            initialized: AtomicBool::new(false),
        }
    }

    /// Resolves the stored token into a session.
    ///
    /// Runs once per controller; later calls, including ones made while the
    /// first is still verifying, wait for the session to settle without
    /// contacting the backend. A token the backend no longer accepts is
    /// cleared silently. If a login or logout settles the session while
    /// verification is in flight, the verification result is dropped.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> SessionState {
        if self.initialized.swap(true, Ordering::AcqRel) {
            debug!("session already initializing");
            return self.settled().await;
        }

        let Some(stored) = self.credentials.read() else {
            debug!("no stored token");
            self.settle(SessionState::Anonymous, None);
            return self.state();
        };

        let response = self.gateway.verify_token().await;
        let error = response.error.clone();
        let (next, rejected) = match response.into_data() {
            Some(payload) => (SessionState::Authenticated(payload.user), None),
            None => {
                debug!(
                    error = error.as_deref().unwrap_or("no identity returned"),
                    "stored token rejected"
                );
                (SessionState::Anonymous, Some(&stored))
            }
        };

        if self.settle(next, rejected) {
            info!(state = self.state.borrow().name(), "session initialized");
        } else {
            debug!("session settled during verification, discarding result");
        }
        self.state()
    }

    /// Replaces `Initializing` with `next`, clearing `rejected` from the
    /// store if it is still the stored token. Returns false, leaving the
    /// state and the store untouched, if something else settled it first.
    fn settle(&self, next: SessionState, rejected: Option<&BearerToken>) -> bool {
        self.state.send_if_modified(|state| {
            if state.is_settled() {
                return false;
            }
            if let Some(token) = rejected {
                if !self.credentials.clear_if(token) {
                    debug!("stored token replaced during verification, keeping it");
                }
            }
            *state = next;
            true
        })
    }

    /// Signs in with an email and password.
    ///
    /// The inputs are normalized before they are sent. On success the
    /// session is `Authenticated` before this returns; on failure it is left
    /// as it was.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` with the backend's reason (or a default) when the
    /// backend refuses or cannot be reached, and `IncompleteResponse` when
    /// it reports success without an identity and token.
    #[instrument(skip(self, email, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthenticationError> {
        let credentials = Credentials::new(email, password);
        let response = self.gateway.login(&credentials).await;

        if !response.success {
            let err = AuthenticationError::rejected(response.error);
            warn!(error = %err, "login failed");
            return Err(err);
        }

        let payload = match response.data {
            Some(payload) if !payload.token.is_empty() => payload,
            _ => {
                warn!("login response carried no identity");
                return Err(AuthenticationError::IncompleteResponse);
            }
        };

        self.state
            .send_replace(SessionState::Authenticated(payload.user.clone()));
        info!(user_id = %payload.user.id(), role = %payload.user.role(), "signed in");
        Ok(payload.user)
    }

    /// Signs out. The session always ends `Anonymous` and the stored token
    /// is gone, whatever the backend answered.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let response = self.gateway.logout().await;
        if !response.success {
            debug!(
                error = response.error_or("unknown"),
                "remote logout failed"
            );
        }

        let previous = self.state.send_replace(SessionState::Anonymous);
        info!(previous = previous.name(), "signed out");
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().current_user().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Subscribes to state transitions. The receiver starts at the current
    /// state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Waits until initialization has settled the session.
    pub async fn settled(&self) -> SessionState {
        let mut receiver = self.subscribe();
        match receiver.wait_for(SessionState::is_settled).await {
            Ok(state) => state.clone(),
            // The sender lives in `self`, so it cannot have been dropped.
            Err(_) => self.state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use timetable_admin_gateway::{ApiResponse, LoginPayload, VerifyPayload};
    use timetable_admin_platform_access::{BearerToken, MemoryCredentialStore, Role};
    use tokio::sync::Notify;

    fn user(role: Role) -> User {
        User::new("7", "Priya", "priya@college.edu", role)
    }

    /// Gateway answering from canned responses and emulating the token side
    /// effects of the real one.
    struct ScriptedGateway {
        store: Arc<MemoryCredentialStore>,
        login: Mutex<ApiResponse<LoginPayload>>,
        verify: Mutex<ApiResponse<VerifyPayload>>,
        logout: Mutex<ApiResponse<()>>,
        sent: Mutex<Vec<Credentials>>,
        verify_gate: Option<Arc<Notify>>,
        verify_calls: Mutex<u32>,
    }

    impl ScriptedGateway {
        fn new(store: Arc<MemoryCredentialStore>) -> Self {
            Self {
                store,
                login: Mutex::new(ApiResponse::failure("Invalid email or password")),
                verify: Mutex::new(ApiResponse::failure("Invalid token")),
                logout: Mutex::new(ApiResponse::empty()),
                sent: Mutex::new(Vec::new()),
                verify_gate: None,
                verify_calls: Mutex::new(0),
            }
        }

        fn accepting_login(self, user: User, token: &str) -> Self {
            *self.login.lock().expect("lock") = ApiResponse::ok(LoginPayload {
                user,
                token: token.to_string(),
            });
            self
        }

        fn accepting_verify(self, user: User) -> Self {
            *self.verify.lock().expect("lock") = ApiResponse::ok(VerifyPayload { user });
            self
        }

        fn failing_logout(self) -> Self {
            *self.logout.lock().expect("lock") = ApiResponse::network_error();
            self
        }

        fn gated_verify(mut self, gate: Arc<Notify>) -> Self {
            self.verify_gate = Some(gate);
            self
        }

        fn verify_calls(&self) -> u32 {
            *self.verify_calls.lock().expect("lock")
        }
    }

    #[async_trait]
    impl BackendGateway for ScriptedGateway {
        async fn login(&self, credentials: &Credentials) -> ApiResponse<LoginPayload> {
            self.sent.lock().expect("lock").push(credentials.clone());
            let response = self.login.lock().expect("lock").clone();
            if let Some(payload) = response.data.as_ref().filter(|_| response.success) {
                self.store.save(&BearerToken::new(payload.token.clone()));
            }
            response
        }

        async fn logout(&self) -> ApiResponse<()> {
            self.store.clear();
            self.logout.lock().expect("lock").clone()
        }

        async fn verify_token(&self) -> ApiResponse<VerifyPayload> {
            *self.verify_calls.lock().expect("lock") += 1;
            if let Some(gate) = &self.verify_gate {
                gate.notified().await;
            }
            if self.store.read().is_none() {
                return ApiResponse::failure("no stored token");
            }
            self.verify.lock().expect("lock").clone()
        }
    }

    fn controller(
        gateway: ScriptedGateway,
    ) -> (SessionController, Arc<ScriptedGateway>) {
        let gateway = Arc::new(gateway);
        let store = gateway.store.clone();
        (SessionController::new(gateway.clone(), store), gateway)
    }

    #[test]
    fn starts_initializing() {
        let store = Arc::new(MemoryCredentialStore::new());
        let (controller, _) = controller(ScriptedGateway::new(store));
        assert!(controller.is_loading());
        assert!(!controller.is_authenticated());
        assert_eq!(controller.current_user(), None);
    }

    #[tokio::test]
    async fn initialize_without_token_is_anonymous_without_verifying() {
        let store = Arc::new(MemoryCredentialStore::new());
        let (controller, gateway) = controller(ScriptedGateway::new(store));

        assert_eq!(controller.initialize().await, SessionState::Anonymous);
        assert_eq!(gateway.verify_calls(), 0);
    }

    #[tokio::test]
    async fn initialize_with_valid_token_authenticates() {
        let store = Arc::new(MemoryCredentialStore::with_token("abc"));
        let (controller, _) = controller(
            ScriptedGateway::new(store.clone()).accepting_verify(user(Role::DeptAdmin)),
        );

        let state = controller.initialize().await;

        assert_eq!(state.role(), Some(Role::DeptAdmin));
        assert!(controller.is_authenticated());
        assert_eq!(store.read(), Some(BearerToken::new("abc")));
    }

    #[tokio::test]
    async fn initialize_with_rejected_token_clears_it() {
        let store = Arc::new(MemoryCredentialStore::with_token("expired"));
        let (controller, _) = controller(ScriptedGateway::new(store.clone()));

        assert_eq!(controller.initialize().await, SessionState::Anonymous);
        assert_eq!(store.read(), None);
    }

    #[tokio::test]
    async fn initialize_runs_once() {
        let store = Arc::new(MemoryCredentialStore::with_token("abc"));
        let (controller, gateway) =
            controller(ScriptedGateway::new(store).accepting_verify(user(Role::Staff)));

        controller.initialize().await;
        controller.logout().await;
        let again = controller.initialize().await;

        assert_eq!(again, SessionState::Anonymous);
        assert_eq!(gateway.verify_calls(), 1);
    }

    #[tokio::test]
    async fn late_verification_does_not_override_login() {
        let store = Arc::new(MemoryCredentialStore::with_token("old"));
        let gate = Arc::new(Notify::new());
        let (controller, _) = controller(
            ScriptedGateway::new(store.clone())
                .accepting_login(user(Role::MainAdmin), "fresh")
                .gated_verify(gate.clone()),
        );

        let (initialized, logged_in) = tokio::join!(controller.initialize(), async {
            let result = controller.login("admin@college.edu", "admin123").await;
            gate.notify_one();
            result
        });

        assert!(logged_in.is_ok());
        assert_eq!(initialized.role(), Some(Role::MainAdmin));
        assert_eq!(store.read(), Some(BearerToken::new("fresh")));
        assert!(controller.is_authenticated());
    }

    #[tokio::test]
    async fn rejected_verification_keeps_a_token_saved_meanwhile() {
        let store = Arc::new(MemoryCredentialStore::with_token("stale"));
        let gate = Arc::new(Notify::new());
        let (controller, _) =
            controller(ScriptedGateway::new(store.clone()).gated_verify(gate.clone()));

        let (initialized, ()) = tokio::join!(controller.initialize(), async {
            store.save(&BearerToken::new("fresh"));
            gate.notify_one();
        });

        assert_eq!(initialized, SessionState::Anonymous);
        assert_eq!(store.read(), Some(BearerToken::new("fresh")));
    }

    #[tokio::test]
    async fn concurrent_initialize_waits_for_the_first() {
        let store = Arc::new(MemoryCredentialStore::with_token("abc"));
        let gate = Arc::new(Notify::new());
        let (controller, gateway) = controller(
            ScriptedGateway::new(store)
                .accepting_verify(user(Role::Staff))
                .gated_verify(gate.clone()),
        );

        let (first, second, ()) = tokio::join!(
            controller.initialize(),
            controller.initialize(),
            async { gate.notify_one() }
        );

        assert_eq!(first.role(), Some(Role::Staff));
        assert_eq!(second, first);
        assert_eq!(gateway.verify_calls(), 1);
    }

    #[tokio::test]
    async fn login_sends_normalized_credentials_and_authenticates() {
        let store = Arc::new(MemoryCredentialStore::new());
        let (controller, gateway) = controller(
            ScriptedGateway::new(store.clone()).accepting_login(user(Role::DeptAdmin), "abc"),
        );
        controller.initialize().await;

        let signed_in = controller
            .login("  User@Example.com ", "  pw ")
            .await
            .expect("login");

        let sent = gateway.sent.lock().expect("lock");
        assert_eq!(sent[0].email(), "user@example.com");
        assert_eq!(sent[0].password(), "pw");
        assert_eq!(signed_in.role(), Role::DeptAdmin);
        assert_eq!(controller.current_user(), Some(signed_in));
        assert_eq!(store.read(), Some(BearerToken::new("abc")));
    }

    #[tokio::test]
    async fn failed_login_leaves_state_unchanged() {
        let store = Arc::new(MemoryCredentialStore::new());
        let (controller, _) = controller(ScriptedGateway::new(store));
        controller.initialize().await;

        let err = controller
            .login("admin@college.edu", "wrong")
            .await
            .expect_err("rejected");

        assert_eq!(err.user_message(), "Invalid email or password");
        assert_eq!(controller.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn failed_login_keeps_the_signed_in_user() {
        let store = Arc::new(MemoryCredentialStore::new());
        let gateway = ScriptedGateway::new(store.clone())
            .accepting_login(user(Role::DeptAdmin), "first");
        let (controller, gateway) = controller(gateway);
        controller.initialize().await;
        let signed_in = controller.login("priya@college.edu", "pw").await.expect("login");

        *gateway.login.lock().expect("lock") = ApiResponse::failure("Invalid email or password");
        let err = controller
            .login("other@college.edu", "wrong")
            .await
            .expect_err("rejected");

        assert_eq!(err.user_message(), "Invalid email or password");
        assert_eq!(controller.state(), SessionState::Authenticated(signed_in));
        assert_eq!(store.read(), Some(BearerToken::new("first")));
    }

    #[tokio::test]
    async fn login_without_reason_uses_default_message() {
        let store = Arc::new(MemoryCredentialStore::new());
        let gateway = ScriptedGateway::new(store);
        *gateway.login.lock().expect("lock") = ApiResponse {
            success: false,
            data: None,
            error: None,
            message: None,
        };
        let (controller, _) = controller(gateway);

        let err = controller.login("a@b.c", "x").await.expect_err("rejected");
        assert_eq!(err.user_message(), "Login failed");
    }

    #[tokio::test]
    async fn success_without_identity_is_incomplete() {
        let store = Arc::new(MemoryCredentialStore::new());
        let gateway = ScriptedGateway::new(store);
        *gateway.login.lock().expect("lock") = ApiResponse::empty();
        let (controller, _) = controller(gateway);
        controller.initialize().await;

        let err = controller.login("a@b.c", "x").await.expect_err("incomplete");

        assert_eq!(err, AuthenticationError::IncompleteResponse);
        assert_eq!(controller.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn logout_is_unconditional_and_idempotent() {
        let store = Arc::new(MemoryCredentialStore::new());
        let (controller, _) = controller(
            ScriptedGateway::new(store.clone())
                .accepting_login(user(Role::Staff), "abc")
                .failing_logout(),
        );
        controller.initialize().await;
        controller.login("s@college.edu", "pw").await.expect("login");

        controller.logout().await;
        assert_eq!(controller.state(), SessionState::Anonymous);
        assert_eq!(store.read(), None);

        store.save(&BearerToken::new("leftover"));
        controller.logout().await;
        assert_eq!(controller.state(), SessionState::Anonymous);
        assert_eq!(store.read(), None);
    }

    #[tokio::test]
    async fn subscribers_observe_transitions() {
        let store = Arc::new(MemoryCredentialStore::new());
        let (controller, _) = controller(
            ScriptedGateway::new(store).accepting_login(user(Role::MainAdmin), "abc"),
        );
        let mut receiver = controller.subscribe();
        assert!(receiver.borrow_and_update().is_loading());

        controller.initialize().await;
        assert!(receiver.has_changed().expect("sender alive"));
        assert_eq!(*receiver.borrow_and_update(), SessionState::Anonymous);

        controller.login("a@b.c", "x").await.expect("login");
        let state = receiver.borrow_and_update().clone();
        assert_eq!(state.is_authenticated(), state.current_user().is_some());
        assert!(state.is_authenticated());
    }

    #[tokio::test]
    async fn settled_waits_for_initialization() {
        let store = Arc::new(MemoryCredentialStore::new());
        let (controller, _) = controller(ScriptedGateway::new(store));

        let (state, _) = tokio::join!(controller.settled(), controller.initialize());
        assert_eq!(state, SessionState::Anonymous);
    }
}
