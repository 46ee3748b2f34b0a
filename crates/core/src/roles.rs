//! Role definitions and the course-management permission predicate.
//!
//! Roles are stored as plain text in the `users.role` column (constrained
//! by a CHECK in the migration) and carried in JWT claims as strings.
//! [`Role`] is the typed view used wherever a permission decision is made.

use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_INSTRUCTOR: &str = "instructor";
pub const ROLE_STUDENT: &str = "student";

/// All roles a user can hold, in descending order of privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Instructor,
    Student,
}

impl Role {
    /// Parse a stored role string. Returns `None` for unknown values so
    /// callers can decide between rejecting and defaulting.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            ROLE_ADMIN => Some(Self::Admin),
            ROLE_INSTRUCTOR => Some(Self::Instructor),
            ROLE_STUDENT => Some(Self::Student),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Instructor => ROLE_INSTRUCTOR,
            Self::Student => ROLE_STUDENT,
        }
    }

    /// Course-management permission: admins and instructors may mutate
    /// course content. There is no row-level ownership check -- any
    /// instructor may edit any course.
    pub fn can_manage_courses(self) -> bool {
        matches!(self, Self::Admin | Self::Instructor)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roles accepted by the course-management gate, used in 403 diagnostics.
pub const COURSE_MANAGER_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_INSTRUCTOR];
