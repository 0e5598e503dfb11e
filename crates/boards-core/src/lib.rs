//! # Boards Core
//!
//! Domain model for the boards backend: project-scoped roles and the
//! policy checks built on them, issue keys, entity types and the error
//! taxonomy shared by every layer above.
//!
//! ## Modules
//!
//! - [`role`] - Member and access roles, role-set checks
//! - [`entity`] - Domain entities (user, project, member, issue, ...)
//! - [`issue`] - Issue enums and key formatting
//! - [`error`] - Error taxonomy
//! - [`config`] - Server configuration

#![warn(missing_docs)]

/// Module version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod entity;
pub mod error;
pub mod issue;
pub mod role;

pub use config::Config;
pub use entity::{Comment, Issue, Member, Notification, Project, User};
pub use error::{Error, Result};
pub use issue::{IssueKey, IssuePriority, IssueStatus, IssueType};
pub use role::{AccessRole, MemberRole};

/// Maximum length of a comment body, in characters.
pub const COMMENT_BODY_MAX: usize = 500;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
