//! Error taxonomy for the boards backend
//!
//! Every variant is a deterministic request-rejection error, surfaced to
//! the caller with a human-readable cause. Nothing here is retried.

use thiserror::Error;

/// Result type alias for boards operations
pub type Result<T> = std::result::Result<T, Error>;

/// Business-rule errors
#[derive(Error, Debug)]
pub enum Error {
    /// No user with the given id or email
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// No project with the given id, or caller has no visibility into it
    #[error("Project not found with ID: {0}")]
    ProjectNotFound(i64),

    /// No member record matching the lookup
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    /// No issue with the given id
    #[error("Issue not found with ID: {0}")]
    IssueNotFound(i64),

    /// No comment with the given id
    #[error("Comment not found with ID: {0}")]
    CommentNotFound(i64),

    /// No notification with the given id
    #[error("Notification not found with ID: {0}")]
    NotificationNotFound(i64),

    /// Email already registered
    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    /// Another project of the same user already uses this name
    #[error("Project name already exists for this user: {0}")]
    ProjectNameAlreadyExists(String),

    /// Another project of the same user already uses this key
    #[error("Project key already exists for this user: {0}")]
    ProjectKeyAlreadyExists(String),

    /// The user is already a member of the project
    #[error("Member already exists with email: {0}")]
    MemberAlreadyExists(String),

    /// Caller's role does not permit the action
    #[error("{0}")]
    Unauthorized(String),

    /// Password mismatch
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Request field failed a data-model constraint
    #[error("Validation error: {0}")]
    Validation(String),

    /// Underlying storage failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Create a member-not-found error for a member id
    pub fn member_not_found(id: i64) -> Self {
        Self::MemberNotFound(format!("no member with ID: {id}"))
    }

    /// Create an unauthorized error
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// True for the NotFound family
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ProjectNotFound(_)
                | Self::MemberNotFound(_)
                | Self::IssueNotFound(_)
                | Self::CommentNotFound(_)
                | Self::NotificationNotFound(_)
        )
    }

    /// True for the Conflict family
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists(_)
                | Self::ProjectNameAlreadyExists(_)
                | Self::ProjectKeyAlreadyExists(_)
                | Self::MemberAlreadyExists(_)
        )
    }
}
