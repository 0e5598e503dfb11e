//! Comment endpoints

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use boards_core::entity::Comment;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CommentBodyRequest {
    pub body: String,
}

/// `POST /projects/:projectId/issues/:issueId/comments`
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, issue_id)): Path<(i64, i64)>,
    Json(request): Json<CommentBodyRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    let comment = state
        .comments
        .create_comment(&auth.caller, project_id, issue_id, &request.body)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// `GET /projects/:projectId/issues/:issueId/comments`
pub async fn get_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, issue_id)): Path<(i64, i64)>,
) -> ApiResult<Json<Vec<Comment>>> {
    Ok(Json(
        state
            .comments
            .get_comments(&auth.caller, project_id, issue_id)
            .await?,
    ))
}

/// `PATCH /projects/:projectId/issues/:issueId/comments/:commentId`
pub async fn edit_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, _issue_id, comment_id)): Path<(i64, i64, i64)>,
    Json(request): Json<CommentBodyRequest>,
) -> ApiResult<Json<Comment>> {
    let comment = state
        .comments
        .edit_comment(&auth.caller, project_id, comment_id, &request.body)
        .await?;
    Ok(Json(comment))
}

/// `DELETE /projects/:projectId/issues/:issueId/comments/:commentId`
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((project_id, _issue_id, comment_id)): Path<(i64, i64, i64)>,
) -> ApiResult<StatusCode> {
    state
        .comments
        .delete_comment(&auth.caller, project_id, comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
