//! Database row models
//!
//! Rows store enums as their stable string form; `into_domain`
//! conversions parse them back, failing with [`DbError::CorruptRow`]
//! when a stored value no longer maps to a known variant.

use crate::error::DbError;
use boards_core::entity::{
    Comment, Issue, Member, Notification, NotificationType, Project, User,
};
use boards_core::{AccessRole, IssuePriority, IssueStatus, IssueType, MemberRole};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

fn parse<T: std::str::FromStr<Err = String>>(value: &str) -> Result<T, DbError> {
    value.parse().map_err(DbError::CorruptRow)
}

/// Row in the `users` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub picture: Option<Vec<u8>>,
    pub access_role: String,
}

impl UserRow {
    /// Convert into the domain entity
    pub fn into_domain(self) -> Result<User, DbError> {
        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            company: self.company,
            location: self.location,
            picture: self.picture,
            access_role: parse::<AccessRole>(&self.access_role)?,
        })
    }
}

/// Row in the `projects` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub id: i64,
    pub name: String,
    pub key: String,
    pub icon: Option<Vec<u8>>,
}

impl ProjectRow {
    /// Convert into the domain entity
    pub fn into_domain(self) -> Project {
        Project {
            id: self.id,
            name: self.name,
            key: self.key,
            icon: self.icon,
        }
    }
}

/// Row in the `members` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MemberRow {
    pub id: i64,
    pub user_id: i64,
    pub project_id: i64,
    pub role: String,
    pub joined_on: NaiveDate,
}

impl MemberRow {
    /// Convert into the domain entity
    pub fn into_domain(self) -> Result<Member, DbError> {
        Ok(Member {
            id: self.id,
            user_id: self.user_id,
            project_id: self.project_id,
            role: parse::<MemberRole>(&self.role)?,
            joined_on: self.joined_on,
        })
    }
}

/// Row in the `issues` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IssueRow {
    pub id: i64,
    pub project_id: i64,
    pub key: String,
    pub key_number: i64,
    pub title: String,
    pub description: Option<String>,
    pub assignee_member_id: Option<i64>,
    pub issue_type: String,
    pub status: String,
    pub priority: String,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
    pub due_on: Option<NaiveDate>,
    pub created_by_member_id: Option<i64>,
}

impl IssueRow {
    /// Convert into the domain entity
    pub fn into_domain(self) -> Result<Issue, DbError> {
        Ok(Issue {
            id: self.id,
            project_id: self.project_id,
            key: self.key,
            key_number: self.key_number,
            title: self.title,
            description: self.description,
            assignee_member_id: self.assignee_member_id,
            issue_type: parse::<IssueType>(&self.issue_type)?,
            status: parse::<IssueStatus>(&self.status)?,
            priority: parse::<IssuePriority>(&self.priority)?,
            created_on: self.created_on,
            updated_on: self.updated_on,
            due_on: self.due_on,
            created_by_member_id: self.created_by_member_id,
        })
    }
}

/// Row in the `comments` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentRow {
    pub id: i64,
    pub issue_id: i64,
    pub created_by_member_id: i64,
    pub created_on: DateTime<Utc>,
    pub last_updated_on: Option<DateTime<Utc>>,
    pub body: String,
}

impl CommentRow {
    /// Convert into the domain entity
    pub fn into_domain(self) -> Comment {
        Comment {
            id: self.id,
            issue_id: self.issue_id,
            created_by_member_id: self.created_by_member_id,
            created_on: self.created_on,
            last_updated_on: self.last_updated_on,
            body: self.body,
        }
    }
}

/// Row in the `notifications` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationRow {
    pub id: i64,
    pub notification_type: String,
    pub sender_member_id: i64,
    pub receiver_member_id: i64,
    pub issue_id: Option<i64>,
    pub project_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

impl NotificationRow {
    /// Convert into the domain entity
    pub fn into_domain(self) -> Result<Notification, DbError> {
        Ok(Notification {
            id: self.id,
            notification_type: parse::<NotificationType>(&self.notification_type)?,
            sender_member_id: self.sender_member_id,
            receiver_member_id: self.receiver_member_id,
            issue_id: self.issue_id,
            project_id: self.project_id,
            timestamp: self.timestamp,
            read: self.read,
        })
    }
}
