//! Role types for access control.
//!
//! Every account carries exactly one [`Role`]. Staff accounts may also carry a
//! [`StaffRole`] describing their academic position; it is informational only
//! and never consulted for access decisions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access tier attached to an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Institution-wide administrator.
    MainAdmin,
    /// Administrator scoped to a single department.
    DeptAdmin,
    /// Teaching staff member.
    Staff,
}

impl Role {
    /// All roles, in descending order of scope.
    pub const ALL: [Role; 3] = [Role::MainAdmin, Role::DeptAdmin, Role::Staff];

    /// Returns the wire name of this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MainAdmin => "main_admin",
            Self::DeptAdmin => "dept_admin",
            Self::Staff => "staff",
        }
    }

    /// Returns the path of the dashboard this role lands on after login.
    #[must_use]
    pub fn home_path(&self) -> &'static str {
        match self {
            Self::MainAdmin => "/main-admin",
            Self::DeptAdmin => "/dept-admin",
            Self::Staff => "/staff",
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::MainAdmin => "Main Administrator",
            Self::DeptAdmin => "Department Administrator",
            Self::Staff => "Staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.input)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ParseRoleError {
                input: s.to_string(),
            })
    }
}

/// Academic position of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Head of department.
    Hod,
    AssociateProfessor,
    AssistantProfessor,
    Professor,
    /// Professor (selection grade).
    ProfessorSg,
    /// Vice principal.
    Vp,
    Dean,
}

impl StaffRole {
    /// All staff roles accepted by the registration endpoint.
    pub const ALL: [StaffRole; 7] = [
        StaffRole::Hod,
        StaffRole::AssociateProfessor,
        StaffRole::AssistantProfessor,
        StaffRole::Professor,
        StaffRole::ProfessorSg,
        StaffRole::Vp,
        StaffRole::Dean,
    ];

    /// Returns the wire name of this staff role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hod => "hod",
            Self::AssociateProfessor => "associate_professor",
            Self::AssistantProfessor => "assistant_professor",
            Self::Professor => "professor",
            Self::ProfessorSg => "professor_sg",
            Self::Vp => "vp",
            Self::Dean => "dean",
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hod => "Head of Department",
            Self::AssociateProfessor => "Associate Professor",
            Self::AssistantProfessor => "Assistant Professor",
            Self::Professor => "Professor",
            Self::ProfessorSg => "Professor (SG)",
            Self::Vp => "Vice Principal",
            Self::Dean => "Dean",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ParseRoleError {
                input: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serialization_format() {
        let json = serde_json::to_string(&Role::MainAdmin).expect("serialize");
        assert_eq!(json, "\"main_admin\"");

        let json = serde_json::to_string(&Role::DeptAdmin).expect("serialize");
        assert_eq!(json, "\"dept_admin\"");

        let json = serde_json::to_string(&Role::Staff).expect("serialize");
        assert_eq!(json, "\"staff\"");
    }

    #[test]
    fn role_wire_names_match_serde() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).expect("serialize");
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }

    #[test]
    fn role_parses_from_wire_name() {
        assert_eq!("dept_admin".parse::<Role>(), Ok(Role::DeptAdmin));
        let err = "superuser".parse::<Role>().unwrap_err();
        assert!(err.to_string().contains("superuser"));
    }

    #[test]
    fn each_role_has_its_own_dashboard() {
        assert_eq!(Role::MainAdmin.home_path(), "/main-admin");
        assert_eq!(Role::DeptAdmin.home_path(), "/dept-admin");
        assert_eq!(Role::Staff.home_path(), "/staff");
    }

    #[test]
    fn unknown_role_fails_to_deserialize() {
        let result: Result<Role, _> = serde_json::from_str("\"admin\"");
        assert!(result.is_err());
    }

    #[test]
    fn staff_role_wire_names_match_serde() {
        for role in StaffRole::ALL {
            let json = serde_json::to_string(&role).expect("serialize");
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            assert_eq!(role.as_str().parse::<StaffRole>(), Ok(role));
        }
    }
}
