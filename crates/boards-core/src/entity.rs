//! Domain entities
//!
//! Plain data carried between the persistence layer and the services.
//! Relationships are explicit foreign-key ids; nothing here fetches
//! lazily on access.

use crate::issue::{IssuePriority, IssueStatus, IssueType};
use crate::role::{AccessRole, MemberRole};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Row id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Globally unique email
    pub email: String,
    /// Password hash; never serialized out
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Optional company profile field
    pub company: Option<String>,
    /// Optional location profile field
    pub location: Option<String>,
    /// Profile picture bytes
    #[serde(skip)]
    pub picture: Option<Vec<u8>>,
    /// Global role
    pub access_role: AccessRole,
}

/// A project owning members and issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Row id
    pub id: i64,
    /// Name, unique among a participating user's projects
    pub name: String,
    /// Short code used as the issue-key prefix, unique likewise
    pub key: String,
    /// Icon bytes
    #[serde(skip)]
    pub icon: Option<Vec<u8>>,
}

/// A user's role-bearing participation record in one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Row id
    pub id: i64,
    /// The participating user
    pub user_id: i64,
    /// The project joined
    pub project_id: i64,
    /// Project-scoped role
    pub role: MemberRole,
    /// Date the membership was created
    pub joined_on: NaiveDate,
}

/// An issue within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Row id
    pub id: i64,
    /// Owning project
    pub project_id: i64,
    /// Human-readable key, `{projectKey}-{n}`
    pub key: String,
    /// Per-project sequence number, the `n` in the key
    pub key_number: i64,
    /// Title
    pub title: String,
    /// Free-form description
    pub description: Option<String>,
    /// Assigned member, if any
    pub assignee_member_id: Option<i64>,
    /// Kind of work
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Current status
    pub status: IssueStatus,
    /// Priority
    pub priority: IssuePriority,
    /// Creation timestamp
    pub created_on: DateTime<Utc>,
    /// Last update timestamp
    pub updated_on: Option<DateTime<Utc>>,
    /// Optional due date
    pub due_on: Option<NaiveDate>,
    /// Creating member; nulled when that member is removed
    pub created_by_member_id: Option<i64>,
}

/// A comment on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Row id
    pub id: i64,
    /// Owning issue
    pub issue_id: i64,
    /// Authoring member
    pub created_by_member_id: i64,
    /// Creation timestamp
    pub created_on: DateTime<Utc>,
    /// Last edit timestamp
    pub last_updated_on: Option<DateTime<Utc>>,
    /// Body, at most [`crate::COMMENT_BODY_MAX`] characters
    pub body: String,
}

/// Why a notification was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum NotificationType {
    AddedToProject,
    AssignedToIssue,
}

impl NotificationType {
    /// Stable string form used in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddedToProject => "ADDED_TO_PROJECT",
            Self::AssignedToIssue => "ASSIGNED_TO_ISSUE",
        }
    }
}

impl std::str::FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADDED_TO_PROJECT" => Ok(Self::AddedToProject),
            "ASSIGNED_TO_ISSUE" => Ok(Self::AssignedToIssue),
            other => Err(format!("unknown notification type: {other}")),
        }
    }
}

/// An event addressed from one member to another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Row id
    pub id: i64,
    /// Event kind
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// Sending member
    pub sender_member_id: i64,
    /// Receiving member
    pub receiver_member_id: i64,
    /// Related issue, for assignment events
    pub issue_id: Option<i64>,
    /// Related project
    pub project_id: Option<i64>,
    /// When the event happened
    pub timestamp: DateTime<Utc>,
    /// Whether the receiver has read it
    pub read: bool,
}
