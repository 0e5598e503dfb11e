//! Project-scoped member roles and the global access role
//!
//! A [`MemberRole`] governs what a user may do inside one project. The
//! [`AccessRole`] is project-independent and only gates cross-cutting
//! admin endpoints (user management).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a member within a single project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    /// Full control; exactly one per project at all times
    Owner,
    /// Project administration short of owner-only actions
    Admin,
    /// May work on issues and comments
    Developer,
    /// Read-only participant
    Viewer,
}

impl MemberRole {
    /// Whether this role is in the allowed set for an operation.
    pub fn is_allowed(self, allowed: &[MemberRole]) -> bool {
        allowed.contains(&self)
    }

    /// Stable string form used in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Admin => "ADMIN",
            Self::Developer => "DEVELOPER",
            Self::Viewer => "VIEWER",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OWNER" => Ok(Self::Owner),
            "ADMIN" => Ok(Self::Admin),
            "DEVELOPER" => Ok(Self::Developer),
            "VIEWER" => Ok(Self::Viewer),
            other => Err(format!("unknown member role: {other}")),
        }
    }
}

/// Roles permitted to modify issues (create, update, change status, delete).
pub const ISSUE_WRITERS: &[MemberRole] =
    &[MemberRole::Owner, MemberRole::Admin, MemberRole::Developer];

/// Roles permitted to read issues.
pub const ISSUE_READERS: &[MemberRole] = &[
    MemberRole::Owner,
    MemberRole::Admin,
    MemberRole::Developer,
    MemberRole::Viewer,
];

/// Roles permitted to manage members and project details.
pub const PROJECT_MANAGERS: &[MemberRole] = &[MemberRole::Owner, MemberRole::Admin];

/// Role permitted to delete the project.
pub const PROJECT_OWNER: &[MemberRole] = &[MemberRole::Owner];

/// Global, project-independent role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessRole {
    /// Regular account
    User,
    /// Global administrator
    Admin,
}

impl AccessRole {
    /// Stable string form used in storage and tokens.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for AccessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            other => Err(format!("unknown access role: {other}")),
        }
    }
}
