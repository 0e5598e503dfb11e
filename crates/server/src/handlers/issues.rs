//! Issue endpoints

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use boards_core::entity::Issue;
use boards_core::IssueStatus;
use boards_service::issues::{CreateIssue, UpdateIssue};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: IssueStatus,
}

/// `POST /projects/:projectId/issues`
pub async fn create_issue(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<i64>,
    Json(request): Json<CreateIssue>,
) -> ApiResult<(StatusCode, Json<Issue>)> {
    let issue = state
        .issues
        .create_issue(&auth.caller, project_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(issue)))
}

/// `GET /projects/:projectId/issues`
pub async fn get_issues_by_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<Vec<Issue>>> {
    Ok(Json(
        state
            .issues
            .get_issues_by_project(&auth.caller, project_id)
            .await?,
    ))
}

/// `GET /projects/:projectId/issues/:issueId`
pub async fn get_issue(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, issue_id)): Path<(i64, i64)>,
) -> ApiResult<Json<Issue>> {
    Ok(Json(
        state
            .issues
            .get_issue(&auth.caller, project_id, issue_id)
            .await?,
    ))
}

/// `PUT /projects/:projectId/issues/:issueId`
pub async fn update_issue(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, issue_id)): Path<(i64, i64)>,
    Json(request): Json<UpdateIssue>,
) -> ApiResult<Json<Issue>> {
    let issue = state
        .issues
        .update_issue(&auth.caller, project_id, issue_id, request)
        .await?;
    Ok(Json(issue))
}

/// `PATCH /projects/:projectId/issues/:issueId/status`
pub async fn update_issue_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, issue_id)): Path<(i64, i64)>,
    Json(request): Json<UpdateStatusRequest>,
) -> ApiResult<Json<Issue>> {
    let issue = state
        .issues
        .update_status(&auth.caller, project_id, issue_id, request.status)
        .await?;
    Ok(Json(issue))
}

/// `DELETE /projects/:projectId/issues/:issueId`
pub async fn delete_issue(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, issue_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    state
        .issues
        .delete_issue(&auth.caller, project_id, issue_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
