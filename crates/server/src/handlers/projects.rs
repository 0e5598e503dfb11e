//! Project endpoints

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use boards_core::entity::{Member, Project};
use boards_service::projects::{CreateProject, MemberInvite};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    #[serde(rename = "userId")]
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDetailsRequest {
    pub name: String,
    pub key: String,
}

/// `POST /projects`
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateProject>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let project = state.projects.create_project(&auth.caller, request).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// `GET /projects?userId=`
pub async fn get_projects_by_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<UserIdQuery>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = state
        .projects
        .get_projects_by_user(&auth.caller, query.user_id)
        .await?;
    Ok(Json(projects))
}

/// `GET /projects/:id`
pub async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Project>> {
    Ok(Json(state.projects.get_project(&auth.caller, id).await?))
}

/// `PATCH /projects/:id`
pub async fn update_project_details(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateDetailsRequest>,
) -> ApiResult<Json<Project>> {
    let project = state
        .projects
        .update_project_details(&auth.caller, id, &request.name, &request.key)
        .await?;
    Ok(Json(project))
}

/// `PATCH /projects/:id/icon` — raw image bytes in, stored bytes out.
pub async fn update_project_icon(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    body: Bytes,
) -> ApiResult<Bytes> {
    let stored = state
        .projects
        .update_project_icon(&auth.caller, id, body.to_vec())
        .await?;
    Ok(Bytes::from(stored))
}

/// `DELETE /projects/:id/icon`
pub async fn delete_project_icon(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.projects.delete_project_icon(&auth.caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /projects/:id`
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.projects.delete_project(&auth.caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /projects/:id/members` — invite users into the project.
pub async fn invite_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(invites): Json<Vec<MemberInvite>>,
) -> ApiResult<Json<Vec<Member>>> {
    let members = state
        .projects
        .invite_users(&auth.caller, id, &invites)
        .await?;
    Ok(Json(members))
}
