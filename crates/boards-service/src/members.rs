//! Member lifecycle
//!
//! Removal and role changes carry the strictest policy in the system:
//! admins cannot touch the owner or each other, the owner cannot walk
//! away while others remain, and removing the last member takes the
//! project down with it.

use crate::auth::db_err;
use crate::authorize::assert_member_is_authorized;
use crate::caller::Caller;
use boards_core::entity::Member;
use boards_core::role::PROJECT_MANAGERS;
use boards_core::{Error, MemberRole, Result};
use boards_db::repo::{comments, issues, members, notifications, projects};
use boards_db::DbPool;
use tracing::info;

/// Member lifecycle operations.
#[derive(Clone)]
pub struct MemberService {
    pool: DbPool,
}

impl MemberService {
    /// Create the service.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get one member record.
    pub async fn get_member(&self, id: i64) -> Result<Member> {
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        let row = members::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| Error::member_not_found(id))?;
        Ok(row.into_domain()?)
    }

    /// List the members of a project.
    pub async fn get_members_by_project(&self, project_id: i64) -> Result<Vec<Member>> {
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        if projects::find_by_id(&mut conn, project_id).await?.is_none() {
            return Err(Error::ProjectNotFound(project_id));
        }
        let rows = members::list_by_project(&mut conn, project_id).await?;
        rows.into_iter()
            .map(|r| r.into_domain().map_err(Into::into))
            .collect()
    }

    /// Get the caller's own membership record for a project.
    pub async fn get_current_member(&self, user_id: i64, project_id: i64) -> Result<Member> {
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;
        let row = members::find_by_user_and_project(&mut conn, user_id, project_id)
            .await?
            .ok_or_else(|| {
                Error::MemberNotFound(format!(
                    "no membership for user {user_id} in project {project_id}"
                ))
            })?;
        Ok(row.into_domain()?)
    }

    /// Remove a member, cascading their footprint, and delete the project
    /// when they were its last member.
    ///
    /// Self-removal is open to every role except an owner leaving other
    /// members behind. Removing someone else requires OWNER or ADMIN, and
    /// an admin may remove neither the owner nor another admin.
    pub async fn remove_member(&self, caller: &Caller, member_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let target = members::find_by_id(&mut tx, member_id)
            .await?
            .ok_or_else(|| Error::member_not_found(member_id))?
            .into_domain()?;

        let project_id = target.project_id;
        let member_count = members::count_by_project(&mut tx, project_id).await?;

        if caller.user_id != target.user_id {
            let remover =
                assert_member_is_authorized(&mut tx, caller, project_id, PROJECT_MANAGERS)
                    .await?;

            if remover.role == MemberRole::Admin {
                if target.role == MemberRole::Admin {
                    return Err(Error::unauthorized("Admins can't remove other Admins."));
                }
                if target.role == MemberRole::Owner {
                    return Err(Error::unauthorized("Admins can't remove the Owner."));
                }
            }
        } else if target.role == MemberRole::Owner && member_count != 1 {
            return Err(Error::unauthorized(
                "Owner must reassign their role to another member before leaving the project",
            ));
        }

        // Ordered cascade: comments, notifications, issue references, row.
        comments::delete_by_author(&mut tx, member_id).await?;
        notifications::delete_by_member(&mut tx, member_id).await?;
        issues::null_member_refs(&mut tx, member_id).await?;
        members::delete(&mut tx, member_id).await?;

        if member_count == 1 {
            notifications::delete_by_project(&mut tx, project_id).await?;
            projects::delete(&mut tx, project_id).await?;
            info!(project_id, "last member left; project deleted");
        }

        tx.commit().await.map_err(db_err)?;
        info!(member_id, project_id, "member removed");
        Ok(())
    }

    /// Change a member's role.
    ///
    /// When the acting owner requests OWNER for someone, the acting owner
    /// is demoted to ADMIN instead and the target keeps its prior role.
    /// This mirrors the long-standing behavior of the system; exactly one
    /// owner exists at all times because no second OWNER is ever written.
    pub async fn update_member_role(
        &self,
        caller: &Caller,
        member_id: i64,
        new_role: MemberRole,
    ) -> Result<Member> {
        let mut tx = self.pool.begin().await?;

        let target = members::find_by_id(&mut tx, member_id)
            .await?
            .ok_or_else(|| Error::member_not_found(member_id))?
            .into_domain()?;

        let updater =
            assert_member_is_authorized(&mut tx, caller, target.project_id, PROJECT_MANAGERS)
                .await?;

        if updater.role == MemberRole::Admin {
            if target.role == MemberRole::Admin {
                return Err(Error::unauthorized(
                    "Admins can't change the role of other Admins.",
                ));
            }
            if target.role == MemberRole::Owner {
                return Err(Error::unauthorized("Admins can't change the Owner's role."));
            }
        }

        if updater.role == MemberRole::Owner && new_role == MemberRole::Owner {
            members::update_role(&mut tx, updater.id, MemberRole::Admin.as_str()).await?;
        } else {
            members::update_role(&mut tx, target.id, new_role.as_str()).await?;
        }

        let updated = members::find_by_id(&mut tx, target.id)
            .await?
            .ok_or_else(|| Error::member_not_found(target.id))?
            .into_domain()?;

        tx.commit().await.map_err(db_err)?;
        Ok(updated)
    }
}
