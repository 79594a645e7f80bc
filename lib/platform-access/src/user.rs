//! Identity record for the signed-in account.
//!
//! A `User` is whatever the backend returns from login or token
//! verification. The client never creates users on its own; the
//! constructors here exist for reconstituting records and for tests.

use serde::{Deserialize, Deserializer, Serialize};
use timetable_admin_core::{DepartmentId, UserId};

use crate::role::{Role, StaffRole};

/// Identity of an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend-issued account id.
    id: UserId,
    /// Display name.
    name: String,
    /// Login email address.
    email: String,
    /// Access tier.
    role: Role,
    /// Department the account belongs to, if any.
    #[serde(default)]
    department_id: Option<DepartmentId>,
    /// Name of that department, when the backend joins it in.
    #[serde(default)]
    department_name: Option<String>,
    /// Academic position for staff accounts.
    #[serde(default, deserialize_with = "lenient_staff_role")]
    staff_role: Option<StaffRole>,
    /// Institutional employee number.
    #[serde(default)]
    employee_id: Option<String>,
    /// Subjects the staff member has picked in preference collection.
    #[serde(default)]
    subjects_selected: Vec<String>,
    /// Whether the subject choice has been frozen by an administrator.
    #[serde(default)]
    subjects_locked: bool,
}

/// Accepts any staff role string, mapping unrecognized positions to `None`.
///
/// The backend stores positions as free text, so an unknown one must not make
/// the whole identity unreadable.
fn lenient_staff_role<'de, D>(deserializer: D) -> Result<Option<StaffRole>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value.parse() {
        Ok(role) => Some(role),
        Err(_) => {
            tracing::debug!(staff_role = %value, "ignoring unrecognized staff role");
            None
        }
    }))
}

impl User {
    /// Creates a user with the required identity fields.
    #[must_use]
    pub fn new(
        id: impl Into<UserId>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            department_id: None,
            department_name: None,
            staff_role: None,
            employee_id: None,
            subjects_selected: Vec::new(),
            subjects_locked: false,
        }
    }

    /// Attaches a department reference.
    #[must_use]
    pub fn with_department(mut self, id: impl Into<DepartmentId>, name: Option<String>) -> Self {
        self.department_id = Some(id.into());
        self.department_name = name;
        self
    }

    /// Sets the staff position.
    #[must_use]
    pub fn with_staff_role(mut self, staff_role: StaffRole) -> Self {
        self.staff_role = Some(staff_role);
        self
    }

    /// Sets the employee number.
    #[must_use]
    pub fn with_employee_id(mut self, employee_id: impl Into<String>) -> Self {
        self.employee_id = Some(employee_id.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn department_id(&self) -> Option<&DepartmentId> {
        self.department_id.as_ref()
    }

    #[must_use]
    pub fn department_name(&self) -> Option<&str> {
        self.department_name.as_deref()
    }

    #[must_use]
    pub fn staff_role(&self) -> Option<StaffRole> {
        self.staff_role
    }

    #[must_use]
    pub fn employee_id(&self) -> Option<&str> {
        self.employee_id.as_deref()
    }

    #[must_use]
    pub fn subjects_selected(&self) -> &[String] {
        &self.subjects_selected
    }

    #[must_use]
    pub fn subjects_locked(&self) -> bool {
        self.subjects_locked
    }

    /// Returns true if this account holds the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}
