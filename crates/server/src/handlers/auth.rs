//! Signup and login

use crate::error::ApiResult;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The only thing either auth endpoint returns.
#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// `POST /auth/signup`
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<AccessTokenResponse>)> {
    let user = state
        .auth
        .signup(&request.name, &request.email, &request.password)
        .await?;
    let access_token = state.tokens.issue(&user)?;
    Ok((StatusCode::CREATED, Json(AccessTokenResponse { access_token })))
}

/// `POST /auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<AccessTokenResponse>> {
    let user = state.auth.login(&request.email, &request.password).await?;
    let access_token = state.tokens.issue(&user)?;
    Ok(Json(AccessTokenResponse { access_token }))
}
