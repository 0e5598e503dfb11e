//! User account endpoints

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::handlers::auth::AccessTokenResponse;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use boards_core::entity::User;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDetailsRequest {
    pub name: String,
    pub company: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEmailRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// `GET /users`
pub async fn get_all_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.users.get_all_users().await?))
}

/// `GET /users/:id`
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.users.get_user(id).await?))
}

/// `GET /users/email?email=`
pub async fn get_user_by_email(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.users.get_user_by_email(&query.email).await?))
}

/// `DELETE /users/:id`
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.users.delete_user(&auth.caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /users/:id`
pub async fn update_user_details(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateDetailsRequest>,
) -> ApiResult<Json<User>> {
    let user = state
        .users
        .update_user_details(
            &auth.caller,
            id,
            &request.name,
            request.company.as_deref(),
            request.location.as_deref(),
        )
        .await?;
    Ok(Json(user))
}

/// `PATCH /users/:id/email` — a successful change invalidates the old
/// token's subject, so a fresh token comes back with the response.
pub async fn update_user_email(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateEmailRequest>,
) -> ApiResult<Json<AccessTokenResponse>> {
    let user = state
        .users
        .update_user_email(&auth.caller, id, &request.email)
        .await?;
    let access_token = state.tokens.issue(&user)?;
    Ok(Json(AccessTokenResponse { access_token }))
}

/// `PATCH /users/:id/password`
pub async fn update_user_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePasswordRequest>,
) -> ApiResult<StatusCode> {
    state
        .users
        .update_user_password(
            &auth.caller,
            id,
            &request.current_password,
            &request.new_password,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /users/:id/picture` — raw image bytes in, stored bytes out.
pub async fn update_user_picture(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    body: Bytes,
) -> ApiResult<Bytes> {
    let stored = state
        .users
        .update_user_picture(&auth.caller, id, body.to_vec())
        .await?;
    Ok(Bytes::from(stored))
}

/// `DELETE /users/:id/picture`
pub async fn delete_user_picture(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.users.delete_user_picture(&auth.caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
