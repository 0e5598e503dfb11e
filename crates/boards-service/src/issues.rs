//! Issue lifecycle
//!
//! Keys are allocated as `{projectKey}-{max+1}` with the lookup and the
//! insert on one transaction. Numbers are never reused: deleted issues
//! leave gaps.

use crate::auth::db_err;
use crate::authorize::assert_member_is_authorized;
use crate::caller::Caller;
use crate::notify::{self, NotificationTransport, Outbound};
use boards_core::entity::{Issue, NotificationType};
use boards_core::role::{ISSUE_READERS, ISSUE_WRITERS};
use boards_core::{Error, IssueKey, IssuePriority, IssueStatus, IssueType, Result};
use boards_db::models::IssueRow;
use boards_db::repo::{issues, members, notifications, projects};
use boards_db::DbPool;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use sqlx::SqliteConnection;
use std::sync::Arc;
use tracing::info;

/// Request to create an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIssue {
    /// Title
    pub title: String,
    /// Free-form description
    pub description: Option<String>,
    /// Member to assign, if any
    pub assignee_member_id: Option<i64>,
    /// Kind of work
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Initial status
    pub status: IssueStatus,
    /// Priority
    pub priority: IssuePriority,
    /// Optional due date
    pub due_on: Option<NaiveDate>,
}

/// Request to update an issue; every field is overwritten.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateIssue {
    /// Title
    pub title: String,
    /// Free-form description
    pub description: Option<String>,
    /// Member to assign; `None` clears the assignee
    pub assignee_member_id: Option<i64>,
    /// Kind of work
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Status
    pub status: IssueStatus,
    /// Priority
    pub priority: IssuePriority,
    /// Optional due date
    pub due_on: Option<NaiveDate>,
}

/// Issue lifecycle operations.
#[derive(Clone)]
pub struct IssueService {
    pool: DbPool,
    transport: Arc<dyn NotificationTransport>,
}

impl IssueService {
    /// Create the service.
    pub fn new(pool: DbPool, transport: Arc<dyn NotificationTransport>) -> Self {
        Self { pool, transport }
    }

    /// Create an issue with a freshly allocated key.
    pub async fn create_issue(
        &self,
        caller: &Caller,
        project_id: i64,
        request: CreateIssue,
    ) -> Result<Issue> {
        let mut tx = self.pool.begin().await?;

        let project = projects::find_by_id(&mut tx, project_id)
            .await?
            .ok_or(Error::ProjectNotFound(project_id))?;

        let assignee = match request.assignee_member_id {
            Some(member_id) => Some(resolve_assignee(&mut tx, member_id, project_id).await?),
            None => None,
        };

        let creator =
            assert_member_is_authorized(&mut tx, caller, project_id, ISSUE_WRITERS).await?;

        let latest = issues::max_key_number(&mut tx, project_id).await?;
        let key = IssueKey::next(&project.key, latest);

        let row = IssueRow {
            id: 0,
            project_id,
            key: key.to_string(),
            key_number: key.number,
            title: request.title,
            description: request.description,
            assignee_member_id: assignee,
            issue_type: request.issue_type.as_str().to_string(),
            status: request.status.as_str().to_string(),
            priority: request.priority.as_str().to_string(),
            created_on: Utc::now(),
            updated_on: None,
            due_on: request.due_on,
            created_by_member_id: Some(creator.id),
        };
        let issue_id = issues::insert(&mut tx, &row).await?;

        let mut outbound: Vec<Outbound> = Vec::new();
        if let Some(assignee_id) = assignee {
            if assignee_id != creator.id {
                let event = notify::record(
                    &mut tx,
                    NotificationType::AssignedToIssue,
                    creator.id,
                    assignee_id,
                    Some(project_id),
                    Some(issue_id),
                )
                .await?;
                outbound.push(event);
            }
        }

        let issue = issues::find_by_id(&mut tx, issue_id)
            .await?
            .ok_or(Error::IssueNotFound(issue_id))?
            .into_domain()?;

        tx.commit().await.map_err(db_err)?;
        notify::publish_all(self.transport.as_ref(), &outbound).await;

        info!(issue_id, key = %issue.key, "issue created");
        Ok(issue)
    }

    /// List the issues of a project. Any participant role may read.
    pub async fn get_issues_by_project(
        &self,
        caller: &Caller,
        project_id: i64,
    ) -> Result<Vec<Issue>> {
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        assert_member_is_authorized(&mut conn, caller, project_id, ISSUE_READERS).await?;
        if projects::find_by_id(&mut conn, project_id).await?.is_none() {
            return Err(Error::ProjectNotFound(project_id));
        }
        let rows = issues::list_by_project(&mut conn, project_id).await?;
        rows.into_iter()
            .map(|r| r.into_domain().map_err(Into::into))
            .collect()
    }

    /// Get one issue.
    pub async fn get_issue(
        &self,
        caller: &Caller,
        project_id: i64,
        issue_id: i64,
    ) -> Result<Issue> {
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        assert_member_is_authorized(&mut conn, caller, project_id, ISSUE_READERS).await?;
        let row = issues::find_by_id(&mut conn, issue_id)
            .await?
            .ok_or(Error::IssueNotFound(issue_id))?;
        Ok(row.into_domain()?)
    }

    /// Overwrite an issue's fields. An assignment notification goes out
    /// only when the assignee actually changed and is not the updater.
    pub async fn update_issue(
        &self,
        caller: &Caller,
        project_id: i64,
        issue_id: i64,
        request: UpdateIssue,
    ) -> Result<Issue> {
        let mut tx = self.pool.begin().await?;

        let updater =
            assert_member_is_authorized(&mut tx, caller, project_id, ISSUE_WRITERS).await?;

        let mut issue = issues::find_by_id(&mut tx, issue_id)
            .await?
            .ok_or(Error::IssueNotFound(issue_id))?;

        let previous_assignee = issue.assignee_member_id;

        issue.title = request.title;
        issue.description = request.description;
        issue.issue_type = request.issue_type.as_str().to_string();
        issue.status = request.status.as_str().to_string();
        issue.priority = request.priority.as_str().to_string();
        issue.due_on = request.due_on;
        issue.updated_on = Some(Utc::now());

        let mut outbound: Vec<Outbound> = Vec::new();
        match request.assignee_member_id {
            None => issue.assignee_member_id = None,
            Some(member_id) => {
                let assignee = resolve_assignee(&mut tx, member_id, project_id).await?;
                if previous_assignee != Some(assignee) {
                    issue.assignee_member_id = Some(assignee);

                    if assignee != updater.id {
                        let event = notify::record(
                            &mut tx,
                            NotificationType::AssignedToIssue,
                            updater.id,
                            assignee,
                            Some(project_id),
                            Some(issue_id),
                        )
                        .await?;
                        outbound.push(event);
                    }
                }
            }
        }

        issues::update(&mut tx, &issue).await?;
        let updated = issues::find_by_id(&mut tx, issue_id)
            .await?
            .ok_or(Error::IssueNotFound(issue_id))?
            .into_domain()?;

        tx.commit().await.map_err(db_err)?;
        notify::publish_all(self.transport.as_ref(), &outbound).await;
        Ok(updated)
    }

    /// Set the status field. Any status may move to any other.
    pub async fn update_status(
        &self,
        caller: &Caller,
        project_id: i64,
        issue_id: i64,
        status: IssueStatus,
    ) -> Result<Issue> {
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        assert_member_is_authorized(&mut conn, caller, project_id, ISSUE_WRITERS).await?;

        if issues::find_by_id(&mut conn, issue_id).await?.is_none() {
            return Err(Error::IssueNotFound(issue_id));
        }
        issues::update_status(&mut conn, issue_id, status.as_str()).await?;

        let row = issues::find_by_id(&mut conn, issue_id)
            .await?
            .ok_or(Error::IssueNotFound(issue_id))?;
        Ok(row.into_domain()?)
    }

    /// Delete an issue with its notifications and comments.
    pub async fn delete_issue(
        &self,
        caller: &Caller,
        project_id: i64,
        issue_id: i64,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        assert_member_is_authorized(&mut tx, caller, project_id, ISSUE_WRITERS).await?;

        notifications::delete_by_issue(&mut tx, issue_id).await?;
        issues::delete(&mut tx, issue_id).await?;

        tx.commit().await.map_err(db_err)?;
        info!(issue_id, "issue deleted");
        Ok(())
    }
}

/// An assignee must be a member of the same project.
async fn resolve_assignee(
    conn: &mut SqliteConnection,
    member_id: i64,
    project_id: i64,
) -> Result<i64> {
    let member = members::find_by_id_and_project(conn, member_id, project_id)
        .await?
        .ok_or_else(|| Error::member_not_found(member_id))?;
    Ok(member.id)
}
