//! Notification inbox endpoints

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use boards_core::entity::Notification;

/// `GET /users/:userId/notifications`
pub async fn get_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<Notification>>> {
    Ok(Json(
        state
            .notifications
            .get_notifications(&auth.caller, user_id)
            .await?,
    ))
}

/// `PATCH /users/:userId/notifications/:notificationId`
pub async fn toggle_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((user_id, notification_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    state
        .notifications
        .toggle_read(&auth.caller, user_id, notification_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /users/:userId/notifications/:notificationId`
pub async fn delete_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((user_id, notification_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    state
        .notifications
        .delete_notification(&auth.caller, user_id, notification_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /users/:userId/notifications`
pub async fn delete_all_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state
        .notifications
        .delete_all_notifications(&auth.caller, user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
