//! Membership role-check primitive
//!
//! Called at the start of every state-mutating project, issue, member or
//! comment operation with the role set appropriate to that operation.

use crate::caller::Caller;
use boards_core::entity::Member;
use boards_core::{Error, MemberRole, Result};
use boards_db::repo::members;
use sqlx::SqliteConnection;

/// Resolve the caller's member record for the project and check its role.
///
/// Fails with [`Error::MemberNotFound`] when the caller does not
/// participate in the project at all, and [`Error::Unauthorized`] when
/// the caller's role is not in `allowed_roles`. Returns the caller's own
/// member record for attribution (comment author, notification sender).
/// No side effects.
pub async fn assert_member_is_authorized(
    conn: &mut SqliteConnection,
    caller: &Caller,
    project_id: i64,
    allowed_roles: &[MemberRole],
) -> Result<Member> {
    let row = members::find_by_user_and_project(conn, caller.user_id, project_id)
        .await
        .map_err(boards_core::Error::from)?;

    let member = row
        .ok_or_else(|| {
            Error::MemberNotFound(format!(
                "Authenticated user is not a member of project with ID: {project_id}"
            ))
        })?
        .into_domain()?;

    if !member.role.is_allowed(allowed_roles) {
        return Err(Error::unauthorized(format!(
            "{} is unauthorized to perform this action.",
            member.role
        )));
    }
    Ok(member)
}

/// Resolve the caller's member record without any role restriction.
///
/// Used where membership alone grants access (comments, reads scoped to
/// participants).
pub async fn assert_is_member(
    conn: &mut SqliteConnection,
    caller: &Caller,
    project_id: i64,
    who: &str,
) -> Result<Member> {
    let row = members::find_by_user_and_project(conn, caller.user_id, project_id)
        .await
        .map_err(boards_core::Error::from)?;

    row.ok_or_else(|| {
        Error::MemberNotFound(format!(
            "{who} is not a member of project with ID: {project_id}"
        ))
    })?
    .into_domain()
    .map_err(Into::into)
}
