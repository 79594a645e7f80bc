//! reqwest-backed gateway to the backend API.

use reqwest::{Method, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use std::sync::Arc;
use timetable_admin_core::{ChoiceFormId, Result, UserId};
use timetable_admin_platform_access::{BearerToken, CredentialStore, User};
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::envelope::{ApiResponse, normalize};
use crate::error::GatewayError;
use crate::gateway::BackendGateway;
use crate::types::{
    ChoiceForm, ChoiceFormList, ChoiceFormStatus, ChoicePreferences, ChoiceSubmissionList,
    ChoiceSubmissionRecord, Credentials, Department, GenerationOutcome, LoginPayload,
    NewChoiceForm, NewDepartment, NewUser, StaffRegistration, StaffRegistrationReceipt,
    StaffRegistrationRecord, StaffTimetable, TimetableStats, UserRegistrationReceipt, UserSummary,
    UserUpdate, VerifyPayload,
};

const HEALTH_PATH: &str = "/health";
const LOGIN_PATH: &str = "/auth/login";
const LOGOUT_PATH: &str = "/auth/logout";
const VERIFY_PATH: &str = "/auth/verify";
const DEPARTMENTS_PATH: &str = "/departments";
const USERS_PATH: &str = "/users";
const REGISTER_USER_PATH: &str = "/admin/register-user";
const REGISTER_STAFF_PATH: &str = "/admin/register-staff";
const STAFF_REGISTRATIONS_PATH: &str = "/admin/staff-registrations";
const TIMETABLE_STATS_PATH: &str = "/timetables/stats";
const GENERATE_TIMETABLE_PATH: &str = "/enhanced-admin/timetable/generate";
const CHOICE_FORMS_PATH: &str = "/enhanced-admin/choice-forms";
const AVAILABLE_CHOICE_FORMS_PATH: &str = "/enhanced-staff/choice-forms/available";
const STAFF_CHOICE_FORMS_PATH: &str = "/enhanced-staff/choice-forms";
const MY_SUBMISSIONS_PATH: &str = "/enhanced-staff/my-submissions";
const MY_TIMETABLE_PATH: &str = "/enhanced-staff/my-timetable";

/// Whether a request carries the stored bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Anonymous,
    Bearer,
}

/// Gateway speaking HTTP to the backend.
///
/// Cloning is cheap; clones share the connection pool and credential store.
#[derive(Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpGateway {
    /// Creates a gateway for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, GatewayError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder =
            builder.timeout(std::time::Duration::from_secs(config.request_timeout_seconds));

        let client = builder.build().map_err(|e| GatewayError::ClientBuild {
            details: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: config.normalized_base_url().to_string(),
            credentials,
        })
    }

    /// Returns the backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the credential store this gateway reads and writes.
    #[must_use]
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    fn request(&self, method: Method, path: &str, auth: Auth) -> RequestBuilder {
        let request = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match (auth, self.credentials.read()) {
            (Auth::Bearer, Some(token)) => request.bearer_auth(token.expose()),
            _ => request,
        }
    }

    async fn execute(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<(u16, Vec<u8>), GatewayError> {
        let response = request.send().await.map_err(|e| GatewayError::Transport {
            path: path.to_string(),
            details: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| GatewayError::Body {
            path: path.to_string(),
            details: e.to_string(),
        })?;

        Ok((status, body.to_vec()))
    }

    async fn call<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> ApiResponse<T> {
        match self.execute(path, request).await {
            Ok((status, body)) => {
                let response = normalize(status, &body);
                debug!(path, status, success = response.success, "backend call completed");
                response
            }
            Err(report) => {
                warn!(path, error = %report, "backend unreachable");
                ApiResponse::network_error()
            }
        }
    }

    /// Returns true if the backend answers its health check.
    #[instrument(skip(self))]
    pub async fn health(&self) -> bool {
        let request = self.request(Method::GET, HEALTH_PATH, Auth::Anonymous);
        match self.execute(HEALTH_PATH, request).await {
            Ok((status, _)) => (200..300).contains(&status),
            Err(report) => {
                warn!(error = %report, "health check failed");
                false
            }
        }
    }

    /// Lists all departments.
    #[instrument(skip(self))]
    pub async fn list_departments(&self) -> ApiResponse<Vec<Department>> {
        let request = self.request(Method::GET, DEPARTMENTS_PATH, Auth::Bearer);
        self.call(DEPARTMENTS_PATH, request).await
    }

    /// Creates a department. Requires a main administrator session.
    #[instrument(skip(self), fields(code = %department.code()))]
    pub async fn create_department(&self, department: &NewDepartment) -> ApiResponse<Department> {
        if !department.is_complete() {
            return ApiResponse::failure("Name and code are required");
        }
        let request = self
            .request(Method::POST, DEPARTMENTS_PATH, Auth::Bearer)
            .json(department);
        self.call(DEPARTMENTS_PATH, request).await
    }

    /// Lists every account known to the backend.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> ApiResponse<Vec<UserSummary>> {
        let request = self.request(Method::GET, USERS_PATH, Auth::Bearer);
        self.call(USERS_PATH, request).await
    }

    /// Creates an account of any role; the backend generates its login.
    #[instrument(skip(self, user), fields(role = %user.role))]
    pub async fn register_user(&self, user: &NewUser) -> ApiResponse<UserRegistrationReceipt> {
        let user = user.normalized();
        let missing = user.missing_fields();
        if !missing.is_empty() {
            return ApiResponse::failure(format!("Missing fields: {}", missing.join(", ")));
        }
        let request = self
            .request(Method::POST, REGISTER_USER_PATH, Auth::Bearer)
            .json(&user);
        self.call(REGISTER_USER_PATH, request).await
    }

    /// Applies a partial update to an account and returns the stored user.
    #[instrument(skip(self, update), fields(user_id = %id))]
    pub async fn update_user(&self, id: &UserId, update: &UserUpdate) -> ApiResponse<User> {
        if update.is_empty() {
            return ApiResponse::failure("Nothing to update");
        }
        let path = format!("{USERS_PATH}/{id}");
        let request = self.request(Method::PUT, &path, Auth::Bearer).json(update);
        self.call(&path, request).await
    }

    /// Registers a staff member; the backend generates their login.
    #[instrument(skip(self, registration), fields(staff_role = %registration.staff_role))]
    pub async fn register_staff(
        &self,
        registration: &StaffRegistration,
    ) -> ApiResponse<StaffRegistrationReceipt> {
        let registration = registration.normalized();
        let missing = registration.missing_fields();
        if !missing.is_empty() {
            return ApiResponse::failure(format!("Missing fields: {}", missing.join(", ")));
        }
        let request = self
            .request(Method::POST, REGISTER_STAFF_PATH, Auth::Bearer)
            .json(&registration);
        self.call(REGISTER_STAFF_PATH, request).await
    }

    /// Lists staff registrations, newest first.
    #[instrument(skip(self))]
    pub async fn list_staff_registrations(&self) -> ApiResponse<Vec<StaffRegistrationRecord>> {
        let request = self.request(Method::GET, STAFF_REGISTRATIONS_PATH, Auth::Bearer);
        self.call(STAFF_REGISTRATIONS_PATH, request).await
    }

    /// Returns timetable counters.
    #[instrument(skip(self))]
    pub async fn timetable_stats(&self) -> ApiResponse<TimetableStats> {
        let request = self.request(Method::GET, TIMETABLE_STATS_PATH, Auth::Bearer);
        self.call(TIMETABLE_STATS_PATH, request).await
    }

    /// Asks the backend to generate timetables for the caller's department.
    #[instrument(skip(self))]
    pub async fn generate_timetable(&self) -> ApiResponse<GenerationOutcome> {
        let request = self
            .request(Method::POST, GENERATE_TIMETABLE_PATH, Auth::Bearer)
            .json(&serde_json::json!({}));
        let response: ApiResponse<GenerationOutcome> =
            self.call(GENERATE_TIMETABLE_PATH, request).await;
        if let Some(outcome) = response.data.as_ref() {
            info!(
                timetables = outcome.timetable_count(),
                "timetable generation finished"
            );
        }
        response
    }

    /// Lists the choice forms of the caller's department, newest first.
    #[instrument(skip(self))]
    pub async fn list_choice_forms(&self) -> ApiResponse<Vec<ChoiceForm>> {
        let request = self.request(Method::GET, CHOICE_FORMS_PATH, Auth::Bearer);
        self.call::<ChoiceFormList>(CHOICE_FORMS_PATH, request)
            .await
            .map(|list| list.forms)
    }

    /// Creates a choice form for the caller's department. New forms start
    /// as drafts.
    #[instrument(skip(self, form), fields(title = %form.title()))]
    pub async fn create_choice_form(&self, form: &NewChoiceForm) -> ApiResponse<()> {
        let missing = form.missing_fields();
        if !missing.is_empty() {
            return ApiResponse::failure(format!("Missing fields: {}", missing.join(", ")));
        }
        let request = self
            .request(Method::POST, CHOICE_FORMS_PATH, Auth::Bearer)
            .json(form);
        self.call::<IgnoredAny>(CHOICE_FORMS_PATH, request)
            .await
            .map(|_| ())
    }

    /// Opens or closes a choice form.
    #[instrument(skip(self), fields(form_id = %id, status = %status))]
    pub async fn set_choice_form_status(
        &self,
        id: &ChoiceFormId,
        status: ChoiceFormStatus,
    ) -> ApiResponse<()> {
        let path = format!("{CHOICE_FORMS_PATH}/{id}/toggle");
        let request = self
            .request(Method::POST, &path, Auth::Bearer)
            .json(&serde_json::json!({ "status": status }));
        self.call::<IgnoredAny>(&path, request).await.map(|_| ())
    }

    /// Open choice forms the signed-in staff member can answer.
    #[instrument(skip(self))]
    pub async fn available_choice_forms(&self) -> ApiResponse<Vec<ChoiceForm>> {
        let request = self.request(Method::GET, AVAILABLE_CHOICE_FORMS_PATH, Auth::Bearer);
        self.call::<ChoiceFormList>(AVAILABLE_CHOICE_FORMS_PATH, request)
            .await
            .map(|list| list.forms)
    }

    /// Submits, or replaces, the caller's preferences for a form.
    #[instrument(skip(self, preferences), fields(form_id = %id))]
    pub async fn submit_choice_form(
        &self,
        id: &ChoiceFormId,
        preferences: &ChoicePreferences,
    ) -> ApiResponse<()> {
        if preferences.is_empty() {
            return ApiResponse::failure("Select at least one subject");
        }
        let path = format!("{STAFF_CHOICE_FORMS_PATH}/{id}/submit");
        let request = self
            .request(Method::POST, &path, Auth::Bearer)
            .json(preferences);
        let response = self.call::<IgnoredAny>(&path, request).await.map(|_| ());
        if response.success {
            info!(subjects = preferences.subjects().len(), "preferences submitted");
        }
        response
    }

    /// The caller's own submissions, newest first.
    #[instrument(skip(self))]
    pub async fn my_choice_submissions(&self) -> ApiResponse<Vec<ChoiceSubmissionRecord>> {
        let request = self.request(Method::GET, MY_SUBMISSIONS_PATH, Auth::Bearer);
        self.call::<ChoiceSubmissionList>(MY_SUBMISSIONS_PATH, request)
            .await
            .map(|list| list.submissions)
    }

    /// The caller's latest approved timetable.
    #[instrument(skip(self))]
    pub async fn my_timetable(&self) -> ApiResponse<StaffTimetable> {
        let request = self.request(Method::GET, MY_TIMETABLE_PATH, Auth::Bearer);
        self.call(MY_TIMETABLE_PATH, request).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl BackendGateway for HttpGateway {
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    async fn login(&self, credentials: &Credentials) -> ApiResponse<LoginPayload> {
        let request = self
            .request(Method::POST, LOGIN_PATH, Auth::Anonymous)
            .json(credentials);
        let response: ApiResponse<LoginPayload> = self.call(LOGIN_PATH, request).await;

        if response.success {
            match response.data.as_ref() {
                Some(payload) if !payload.token.is_empty() => {
                    self.credentials
                        .save(&BearerToken::new(payload.token.clone()));
                    info!(role = %payload.user.role(), "login accepted, token stored");
                }
                _ => warn!("login succeeded without a token"),
            }
        } else {
            debug!(error = response.error_or("unknown"), "login rejected");
        }

        response
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> ApiResponse<()> {
        let request = self.request(Method::POST, LOGOUT_PATH, Auth::Bearer);
        let response = self
            .call::<IgnoredAny>(LOGOUT_PATH, request)
            .await
            .map(|_| ());

        self.credentials.clear();

        if !response.success {
            warn!(
                error = response.error_or("unknown"),
                "remote logout failed, local token cleared anyway"
            );
        }
        response
    }

    #[instrument(skip(self))]
    async fn verify_token(&self) -> ApiResponse<VerifyPayload> {
        if self.credentials.read().is_none() {
            debug!("no stored token to verify");
            return ApiResponse::failure("no stored token");
        }
        let request = self.request(Method::GET, VERIFY_PATH, Auth::Bearer);
        self.call(VERIFY_PATH, request).await
    }
}
