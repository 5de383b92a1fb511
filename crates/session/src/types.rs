//! Identity types carried by a session
//!
//! Lightweight view of the user record the backend returns on login.
//! Only the fields needed for gating pages are kept.

use std::fmt;
use std::str::FromStr;

use learnloop_common::Route;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who the signed-in user is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    /// First word of the display name, used for greetings
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

/// Role for page access decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    /// Dashboard a user of this role lands on after login
    pub fn dashboard(&self) -> Route {
        match self {
            Role::Admin => Route::AdminDashboard,
            Role::Teacher => Route::TeacherDashboard,
            Role::Student => Route::StudentDashboard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// Check if this role can broadcast notifications
    pub fn can_notify(&self) -> bool {
        matches!(self, Role::Admin | Role::Teacher)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}
