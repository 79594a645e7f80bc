//! Request and response bodies exchanged with the backend.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use timetable_admin_core::{ChoiceFormId, DepartmentId, UserId};
use timetable_admin_platform_access::{Role, StaffRole, User};
use tracing::debug;

/// Login credentials, normalized on construction.
///
/// The email is trimmed and lower-cased and the password trimmed, so the
/// backend always receives the canonical form.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password: password.trim().to_string(),
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Payload of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginPayload {
    pub user: User,
    pub token: String,
}

/// Payload of a successful token verification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyPayload {
    pub user: User,
}

/// An academic department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub code: String,
}

/// Body for creating a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDepartment {
    name: String,
    code: String,
}

impl NewDepartment {
    /// Trims both fields and upper-cases the code.
    #[must_use]
    pub fn new(name: &str, code: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            code: code.trim().to_uppercase(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns true when both fields are filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.code.is_empty()
    }
}

/// Row of the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub department_name: Option<String>,
}

/// Onboarding request for a new staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRegistration {
    pub name: String,
    pub employee_id: String,
    pub college: String,
    pub faculty: String,
    pub campus: String,
    pub contact_number: String,
    pub email: String,
    pub staff_role: StaffRole,
}

impl StaffRegistration {
    /// Returns a copy with surrounding whitespace removed and the email
    /// lower-cased.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            employee_id: self.employee_id.trim().to_string(),
            college: self.college.trim().to_string(),
            faculty: self.faculty.trim().to_string(),
            campus: self.campus.trim().to_string(),
            contact_number: self.contact_number.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            staff_role: self.staff_role,
        }
    }

    /// Names of required fields that are blank.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("employee_id", &self.employee_id),
            ("college", &self.college),
            ("faculty", &self.faculty),
            ("campus", &self.campus),
            ("contact_number", &self.contact_number),
            ("email", &self.email),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Login generated by the backend for a newly registered staff member.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for StaffCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaffCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response to a staff registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StaffRegistrationReceipt {
    pub credentials: StaffCredentials,
}

/// Row of the staff registration list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRegistrationRecord {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub staff_role: Option<String>,
    #[serde(default)]
    pub registered: bool,
}

/// Aggregate timetable counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableStats {
    pub total: u64,
}

/// Result of asking the backend to generate timetables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerationOutcome {
    #[serde(default)]
    pub message: Option<String>,
    /// Generated timetables keyed by type, as produced by the backend.
    #[serde(default)]
    pub timetables: Option<serde_json::Value>,
}

impl GenerationOutcome {
    /// Number of timetable kinds the backend produced.
    #[must_use]
    pub fn timetable_count(&self) -> usize {
        match &self.timetables {
            Some(serde_json::Value::Object(map)) => map.len(),
            Some(serde_json::Value::Array(items)) => items.len(),
            _ => 0,
        }
    }
}

/// Account creation request issued by the main administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub employee_id: String,
    pub department: String,
    pub programme: String,
    /// Employment type, for example `full_time`.
    #[serde(rename = "type")]
    pub kind: String,
    pub role: Role,
    pub contact_number: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_role: Option<StaffRole>,
}

impl NewUser {
    /// Returns a copy with surrounding whitespace removed and the email
    /// lower-cased.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            employee_id: self.employee_id.trim().to_string(),
            department: self.department.trim().to_string(),
            programme: self.programme.trim().to_string(),
            kind: self.kind.trim().to_string(),
            role: self.role,
            contact_number: self.contact_number.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            staff_role: self.staff_role,
        }
    }

    /// Names of required fields that are blank.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("employee_id", &self.employee_id),
            ("department", &self.department),
            ("programme", &self.programme),
            ("type", &self.kind),
            ("contact_number", &self.contact_number),
            ("email", &self.email),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Response to an account creation: the stored user and its generated login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRegistrationReceipt {
    pub user: User,
    pub credentials: StaffCredentials,
}

/// Partial update of a user account. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    department_id: Option<DepartmentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    staff_role: Option<StaffRole>,
}

impl UserUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.trim().to_string());
        self
    }

    #[must_use]
    pub fn email(mut self, email: &str) -> Self {
        self.email = Some(email.trim().to_lowercase());
        self
    }

    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub fn department(mut self, id: impl Into<DepartmentId>) -> Self {
        self.department_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn contact_number(mut self, contact_number: &str) -> Self {
        self.contact_number = Some(contact_number.trim().to_string());
        self
    }

    #[must_use]
    pub fn staff_role(mut self, staff_role: StaffRole) -> Self {
        self.staff_role = Some(staff_role);
        self
    }

    /// Returns true when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Lifecycle of a subject choice form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceFormStatus {
    Draft,
    Open,
    Closed,
}

impl ChoiceFormStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Status the administrator's toggle moves the form to: open forms
    /// close, anything else opens.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Draft | Self::Closed => Self::Open,
        }
    }
}

impl fmt::Display for ChoiceFormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `true`/`false` as well as the `0`/`1` integers SQL rows carry.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Integer(i64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(flag)) => flag,
        Some(Flag::Integer(n)) => n != 0,
        None => false,
    })
}

/// A form collecting staff subject preferences for a department.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChoiceForm {
    pub id: ChoiceFormId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub open_date: String,
    pub close_date: String,
    pub status: ChoiceFormStatus,
    /// Present on the administrator's listing.
    #[serde(default)]
    pub submission_count: u64,
    /// Present on the staff listing.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub has_submitted: bool,
}

#[derive(Deserialize)]
pub(crate) struct ChoiceFormList {
    #[serde(default)]
    pub(crate) forms: Vec<ChoiceForm>,
}

/// Body for creating a choice form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewChoiceForm {
    title: String,
    description: String,
    open_date: String,
    close_date: String,
}

impl NewChoiceForm {
    #[must_use]
    pub fn new(title: &str, description: &str, open_date: &str, close_date: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            open_date: open_date.trim().to_string(),
            close_date: close_date.trim().to_string(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Names of required fields that are blank. The description is optional.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("open_date", &self.open_date),
            ("close_date", &self.close_date),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// A staff member's ranked subject preferences for one form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoicePreferences {
    subject_preferences: Vec<String>,
    additional_notes: String,
}

impl ChoicePreferences {
    /// Keeps the given order, dropping blank entries.
    #[must_use]
    pub fn new<'a>(subjects: impl IntoIterator<Item = &'a str>, notes: &str) -> Self {
        Self {
            subject_preferences: subjects
                .into_iter()
                .map(str::trim)
                .filter(|subject| !subject.is_empty())
                .map(str::to_string)
                .collect(),
            additional_notes: notes.trim().to_string(),
        }
    }

    /// Parses a comma-separated list, most preferred first.
    #[must_use]
    pub fn from_list(subjects: &str, notes: &str) -> Self {
        Self::new(subjects.split(','), notes)
    }

    #[must_use]
    pub fn subjects(&self) -> &[String] {
        &self.subject_preferences
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subject_preferences.is_empty()
    }
}

/// One of the signed-in staff member's submissions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChoiceSubmissionRecord {
    pub form_id: ChoiceFormId,
    pub form_title: String,
    #[serde(default)]
    pub form_status: Option<ChoiceFormStatus>,
    /// JSON-encoded list, as stored by the backend.
    #[serde(default)]
    subject_preferences: Option<String>,
    #[serde(default)]
    pub additional_notes: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
}

impl ChoiceSubmissionRecord {
    /// Decoded preference list. Entries may be subject codes or numeric ids.
    #[must_use]
    pub fn preferences(&self) -> Vec<String> {
        let Some(raw) = self.subject_preferences.as_deref() else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
            Ok(items) => items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::String(text) => text,
                    other => other.to_string(),
                })
                .collect(),
            Err(e) => {
                debug!(error = %e, "unreadable subject preferences");
                Vec::new()
            }
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct ChoiceSubmissionList {
    #[serde(default)]
    pub(crate) submissions: Vec<ChoiceSubmissionRecord>,
}

/// The signed-in staff member's latest approved timetable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StaffTimetable {
    #[serde(default)]
    timetable: serde_json::Value,
}

impl StaffTimetable {
    /// Returns true when no approved timetable exists yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.timetable {
            serde_json::Value::Object(map) => map.is_empty(),
            serde_json::Value::Array(items) => items.is_empty(),
            serde_json::Value::Null => true,
            _ => false,
        }
    }

    /// Top-level slots with their contents rendered as text.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        let render = |value: &serde_json::Value| match value {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        match &self.timetable {
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(slot, value)| (slot.clone(), render(value)))
                .collect(),
            serde_json::Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, value)| ((index + 1).to_string(), render(value)))
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_are_normalized() {
        let credentials = Credentials::new("  User@Example.com ", "  pw ");
        assert_eq!(credentials.email(), "user@example.com");
        assert_eq!(credentials.password(), "pw");

        let json = serde_json::to_value(&credentials).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"email": "user@example.com", "password": "pw"})
        );
    }

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = Credentials::new("a@b.c", "hunter2");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("a@b.c"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn new_department_uppercases_code() {
        let department = NewDepartment::new("  Computer Science ", " cse ");
        assert_eq!(department.name(), "Computer Science");
        assert_eq!(department.code(), "CSE");
        assert!(department.is_complete());
        assert!(!NewDepartment::new("Physics", "  ").is_complete());
    }

    #[test]
    fn staff_registration_reports_blank_fields() {
        let registration = StaffRegistration {
            name: "Latha".to_string(),
            employee_id: " ".to_string(),
            college: "Engineering".to_string(),
            faculty: "CSE".to_string(),
            campus: String::new(),
            contact_number: "9000000000".to_string(),
            email: " Latha@Example.EDU ".to_string(),
            staff_role: StaffRole::Professor,
        };

        assert_eq!(registration.missing_fields(), vec!["employee_id", "campus"]);
        assert_eq!(registration.normalized().email, "latha@example.edu");
    }

    #[test]
    fn staff_registration_serializes_staff_role_field() {
        let registration = StaffRegistration {
            name: "Latha".to_string(),
            employee_id: "E1".to_string(),
            college: "Engineering".to_string(),
            faculty: "CSE".to_string(),
            campus: "Main".to_string(),
            contact_number: "9000000000".to_string(),
            email: "latha@example.edu".to_string(),
            staff_role: StaffRole::ProfessorSg,
        };
        let json = serde_json::to_value(&registration).expect("serialize");
        assert_eq!(json["staff_role"], "professor_sg");
    }

    #[test]
    fn generation_outcome_counts_timetables() {
        let outcome: GenerationOutcome = serde_json::from_str(
            r#"{"success": true, "message": "Timetables generated successfully",
                "timetables": {"class": {}, "staff": {}, "room": {}}}"#,
        )
        .expect("deserialize");
        assert_eq!(outcome.timetable_count(), 3);
    }

    #[test]
    fn department_accepts_integer_id() {
        let department: Department =
            serde_json::from_str(r#"{"id": 3, "name": "Civil", "code": "CIV"}"#)
                .expect("deserialize");
        assert_eq!(department.id.as_str(), "3");
    }

    #[test]
    fn user_update_serializes_only_set_fields() {
        assert!(UserUpdate::new().is_empty());

        let update = UserUpdate::new().name(" Priya R ").staff_role(StaffRole::Hod);
        assert!(!update.is_empty());
        let json = serde_json::to_value(&update).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"name": "Priya R", "staff_role": "hod"})
        );
    }

    #[test]
    fn new_user_writes_kind_as_type() {
        let user = NewUser {
            name: "Arun".to_string(),
            employee_id: "E7".to_string(),
            department: "CSE".to_string(),
            programme: "B.Tech".to_string(),
            kind: "full_time".to_string(),
            role: Role::DeptAdmin,
            contact_number: " ".to_string(),
            email: "Arun@College.edu".to_string(),
            staff_role: None,
        };
        assert_eq!(user.missing_fields(), vec!["contact_number"]);

        let json = serde_json::to_value(user.normalized()).expect("serialize");
        assert_eq!(json["type"], "full_time");
        assert_eq!(json["role"], "dept_admin");
        assert_eq!(json["email"], "arun@college.edu");
        assert!(json.get("staff_role").is_none());
    }

    #[test]
    fn choice_form_reads_sql_flags() {
        let form: ChoiceForm = serde_json::from_str(
            r#"{"id": 4, "department_id": 1, "title": "Odd semester",
                "description": null, "open_date": "2026-01-05",
                "close_date": "2026-01-20", "status": "open",
                "created_by": 2, "has_submitted": 1}"#,
        )
        .expect("deserialize");
        assert_eq!(form.id.as_str(), "4");
        assert!(form.has_submitted);
        assert_eq!(form.submission_count, 0);
        assert_eq!(form.status.toggled(), ChoiceFormStatus::Closed);
        assert_eq!(ChoiceFormStatus::Draft.toggled(), ChoiceFormStatus::Open);
    }

    #[test]
    fn choice_preferences_drop_blank_entries() {
        let preferences = ChoicePreferences::from_list(" CS101, ,MA201 ,", " mornings ");
        assert_eq!(preferences.subjects(), ["CS101", "MA201"]);
        assert!(ChoicePreferences::from_list(" , ", "").is_empty());

        let json = serde_json::to_value(&preferences).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "subject_preferences": ["CS101", "MA201"],
                "additional_notes": "mornings"
            })
        );
    }

    #[test]
    fn new_choice_form_requires_title_and_dates() {
        let form = NewChoiceForm::new(" Even semester ", "", "2026-06-01", " ");
        assert_eq!(form.title(), "Even semester");
        assert_eq!(form.missing_fields(), vec!["close_date"]);
    }

    #[test]
    fn submission_decodes_stored_preferences() {
        let record: ChoiceSubmissionRecord = serde_json::from_str(
            r#"{"form_id": 4, "form_title": "Odd semester", "form_status": "closed",
                "subject_preferences": "[\"CS101\", 12]"}"#,
        )
        .expect("deserialize");
        assert_eq!(record.preferences(), vec!["CS101", "12"]);

        let garbled: ChoiceSubmissionRecord = serde_json::from_str(
            r#"{"form_id": 5, "form_title": "x", "subject_preferences": "not json"}"#,
        )
        .expect("deserialize");
        assert!(garbled.preferences().is_empty());
    }

    #[test]
    fn staff_timetable_entries() {
        let empty: StaffTimetable =
            serde_json::from_str(r#"{"success": true, "timetable": {}}"#).expect("deserialize");
        assert!(empty.is_empty());

        let timetable: StaffTimetable = serde_json::from_str(
            r#"{"timetable": {"Monday": "CS101 09:00", "Tuesday": {"p1": "MA201"}}}"#,
        )
        .expect("deserialize");
        assert!(!timetable.is_empty());
        assert_eq!(
            timetable.entries(),
            vec![
                ("Monday".to_string(), "CS101 09:00".to_string()),
                ("Tuesday".to_string(), r#"{"p1":"MA201"}"#.to_string()),
            ]
        );
    }
}
