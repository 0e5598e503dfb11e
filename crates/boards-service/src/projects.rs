//! Project lifecycle
//!
//! Creation, invites, detail/icon updates and deletion. Name and key
//! uniqueness is scoped to the projects a user participates in, not
//! global.

use crate::auth::db_err;
use crate::authorize::assert_member_is_authorized;
use crate::caller::Caller;
use crate::notify::{self, NotificationTransport, Outbound};
use boards_core::entity::{Member, NotificationType, Project};
use boards_core::role::{PROJECT_MANAGERS, PROJECT_OWNER};
use boards_core::{Error, MemberRole, Result};
use boards_db::repo::{members, notifications, projects, users};
use boards_db::DbPool;
use chrono::Utc;
use serde::Deserialize;
use sqlx::SqliteConnection;
use std::sync::Arc;
use tracing::info;

/// One entry in a create/invite member list.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberInvite {
    /// Email of the user to add
    pub email: String,
    /// Role to grant; OWNER is never accepted here
    pub role: MemberRole,
}

/// Request to create a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    /// Project name
    pub name: String,
    /// Issue-key prefix
    pub key: String,
    /// Members to invite alongside the creator
    #[serde(default)]
    pub members: Vec<MemberInvite>,
    /// Optional icon bytes
    #[serde(skip)]
    pub icon: Option<Vec<u8>>,
}

/// Project lifecycle operations.
#[derive(Clone)]
pub struct ProjectService {
    pool: DbPool,
    transport: Arc<dyn NotificationTransport>,
}

impl ProjectService {
    /// Create the service.
    pub fn new(pool: DbPool, transport: Arc<dyn NotificationTransport>) -> Self {
        Self { pool, transport }
    }

    /// Create a project. The caller becomes its OWNER member; everyone in
    /// the invite list is added with the requested (non-OWNER) role and
    /// notified.
    pub async fn create_project(&self, caller: &Caller, request: CreateProject) -> Result<Project> {
        let mut tx = self.pool.begin().await?;

        handle_duplicate_project(&mut tx, caller, &request.name, &request.key, None).await?;

        let creator_user = users::find_by_id(&mut tx, caller.user_id)
            .await?
            .ok_or_else(|| Error::UserNotFound(caller.user_id.to_string()))?
            .into_domain()?;

        let project_id = projects::insert(
            &mut tx,
            &request.name,
            &request.key,
            request.icon.as_deref(),
        )
        .await?;

        let today = Utc::now().date_naive();
        let creator_member_id = members::insert(
            &mut tx,
            creator_user.id,
            project_id,
            MemberRole::Owner.as_str(),
            today,
        )
        .await?;

        let mut outbound = Vec::new();
        for invite in &request.members {
            let member_id = add_invitee(&mut tx, project_id, invite).await?;
            let event = notify::record(
                &mut tx,
                NotificationType::AddedToProject,
                creator_member_id,
                member_id,
                Some(project_id),
                None,
            )
            .await?;
            outbound.push(event);
        }

        let project = projects::find_by_id(&mut tx, project_id)
            .await?
            .ok_or(Error::ProjectNotFound(project_id))?
            .into_domain();

        tx.commit().await.map_err(db_err)?;
        notify::publish_all(self.transport.as_ref(), &outbound).await;

        info!(project_id, "project created");
        Ok(project)
    }

    /// Invite users into an existing project.
    pub async fn invite_users(
        &self,
        caller: &Caller,
        project_id: i64,
        invites: &[MemberInvite],
    ) -> Result<Vec<Member>> {
        let mut tx = self.pool.begin().await?;

        if projects::find_by_id(&mut tx, project_id).await?.is_none() {
            return Err(Error::ProjectNotFound(project_id));
        }

        let inviter =
            assert_member_is_authorized(&mut tx, caller, project_id, PROJECT_MANAGERS).await?;

        let mut added = Vec::new();
        let mut outbound: Vec<Outbound> = Vec::new();
        for invite in invites {
            let member_id = add_invitee(&mut tx, project_id, invite).await?;
            let event = notify::record(
                &mut tx,
                NotificationType::AddedToProject,
                inviter.id,
                member_id,
                Some(project_id),
                None,
            )
            .await?;
            outbound.push(event);

            let member = members::find_by_id(&mut tx, member_id)
                .await?
                .ok_or_else(|| Error::member_not_found(member_id))?
                .into_domain()?;
            added.push(member);
        }

        tx.commit().await.map_err(db_err)?;
        notify::publish_all(self.transport.as_ref(), &outbound).await;
        Ok(added)
    }

    /// List the projects a user participates in. Callers may only list
    /// their own.
    pub async fn get_projects_by_user(&self, caller: &Caller, user_id: i64) -> Result<Vec<Project>> {
        if caller.user_id != user_id {
            return Err(Error::unauthorized(
                "Authenticated user is only authorized to get their own projects.",
            ));
        }
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        if users::find_by_id(&mut conn, user_id).await?.is_none() {
            return Err(Error::UserNotFound(user_id.to_string()));
        }
        let rows = projects::list_by_user(&mut conn, user_id).await?;
        Ok(rows.into_iter().map(|r| r.into_domain()).collect())
    }

    /// Get a project visible to the caller. Non-participants get the same
    /// answer as for a project that does not exist.
    pub async fn get_project(&self, caller: &Caller, project_id: i64) -> Result<Project> {
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        let row = projects::find_by_id(&mut conn, project_id)
            .await?
            .ok_or(Error::ProjectNotFound(project_id))?;

        let membership =
            members::find_by_user_and_project(&mut conn, caller.user_id, project_id).await?;
        if membership.is_none() {
            return Err(Error::ProjectNotFound(project_id));
        }
        Ok(row.into_domain())
    }

    /// Update name and key, enforcing per-user uniqueness.
    pub async fn update_project_details(
        &self,
        caller: &Caller,
        project_id: i64,
        name: &str,
        key: &str,
    ) -> Result<Project> {
        let mut tx = self.pool.begin().await?;

        handle_duplicate_project(&mut tx, caller, name, key, Some(project_id)).await?;

        if projects::find_by_id(&mut tx, project_id).await?.is_none() {
            return Err(Error::ProjectNotFound(project_id));
        }
        assert_member_is_authorized(&mut tx, caller, project_id, PROJECT_MANAGERS).await?;

        projects::update_details(&mut tx, project_id, name, key).await?;
        let updated = projects::find_by_id(&mut tx, project_id)
            .await?
            .ok_or(Error::ProjectNotFound(project_id))?
            .into_domain();

        tx.commit().await.map_err(db_err)?;
        Ok(updated)
    }

    /// Replace the project icon, returning the stored bytes.
    pub async fn update_project_icon(
        &self,
        caller: &Caller,
        project_id: i64,
        icon: Vec<u8>,
    ) -> Result<Vec<u8>> {
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        if projects::find_by_id(&mut conn, project_id).await?.is_none() {
            return Err(Error::ProjectNotFound(project_id));
        }
        assert_member_is_authorized(&mut conn, caller, project_id, PROJECT_MANAGERS).await?;
        projects::update_icon(&mut conn, project_id, Some(&icon)).await?;
        Ok(icon)
    }

    /// Clear the project icon.
    pub async fn delete_project_icon(&self, caller: &Caller, project_id: i64) -> Result<()> {
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        if projects::find_by_id(&mut conn, project_id).await?.is_none() {
            return Err(Error::ProjectNotFound(project_id));
        }
        assert_member_is_authorized(&mut conn, caller, project_id, PROJECT_MANAGERS).await?;
        projects::update_icon(&mut conn, project_id, None).await?;
        Ok(())
    }

    /// Delete a project. Owner only; notifications for the project go
    /// first, then the project with everything it owns.
    pub async fn delete_project(&self, caller: &Caller, project_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        assert_member_is_authorized(&mut tx, caller, project_id, PROJECT_OWNER).await?;

        notifications::delete_by_project(&mut tx, project_id).await?;
        projects::delete(&mut tx, project_id).await?;

        tx.commit().await.map_err(db_err)?;
        info!(project_id, "project deleted");
        Ok(())
    }
}

/// Resolve and insert one invitee. Rejects OWNER grants, unknown emails
/// and users who already participate.
async fn add_invitee(
    conn: &mut SqliteConnection,
    project_id: i64,
    invite: &MemberInvite,
) -> Result<i64> {
    if invite.role == MemberRole::Owner {
        return Err(Error::unauthorized(format!(
            "Member with email: {} can't be invited as Owner.",
            invite.email
        )));
    }

    let user = users::find_by_email(conn, &invite.email)
        .await?
        .ok_or_else(|| Error::UserNotFound(invite.email.clone()))?;

    if members::find_by_user_and_project(conn, user.id, project_id)
        .await?
        .is_some()
    {
        return Err(Error::MemberAlreadyExists(invite.email.clone()));
    }

    let id = members::insert(
        conn,
        user.id,
        project_id,
        invite.role.as_str(),
        Utc::now().date_naive(),
    )
    .await?;
    Ok(id)
}

/// Per-user duplicate check: fail when any project the caller participates
/// in shares the name or key. Name collisions win over key collisions.
async fn handle_duplicate_project(
    conn: &mut SqliteConnection,
    caller: &Caller,
    name: &str,
    key: &str,
    exclude_id: Option<i64>,
) -> Result<()> {
    let existing =
        projects::find_duplicate(conn, name, key, caller.user_id, exclude_id).await?;

    if let Some(project) = existing {
        if project.name == name {
            return Err(Error::ProjectNameAlreadyExists(name.to_string()));
        }
        if project.key == key {
            return Err(Error::ProjectKeyAlreadyExists(key.to_string()));
        }
    }
    Ok(())
}
