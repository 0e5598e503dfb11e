//! Member endpoints

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use boards_core::entity::Member;
use boards_core::MemberRole;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: MemberRole,
}

/// `GET /members/:memberId`
pub async fn get_member(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(member_id): Path<i64>,
) -> ApiResult<Json<Member>> {
    Ok(Json(state.members.get_member(member_id).await?))
}

/// `DELETE /members/:memberId`
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(member_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.members.remove_member(&auth.caller, member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /members/:memberId`
pub async fn update_member_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(member_id): Path<i64>,
    Json(request): Json<UpdateRoleRequest>,
) -> ApiResult<Json<Member>> {
    let member = state
        .members
        .update_member_role(&auth.caller, member_id, request.role)
        .await?;
    Ok(Json(member))
}

/// `GET /projects/:projectId/members`
pub async fn get_members_by_project(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<Vec<Member>>> {
    Ok(Json(state.members.get_members_by_project(project_id).await?))
}

/// `GET /projects/:projectId/members/:userId`
pub async fn get_current_member(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((project_id, user_id)): Path<(i64, i64)>,
) -> ApiResult<Json<Member>> {
    Ok(Json(
        state.members.get_current_member(user_id, project_id).await?,
    ))
}
