//! Bearer-token extractor
//!
//! Every protected handler takes an [`AuthUser`], which resolves the
//! `Authorization: Bearer` header into the explicit caller identity the
//! service layer expects.

use crate::error::ApiError;
use crate::state::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use boards_core::Error;
use boards_service::Caller;

/// The authenticated caller of a request, plus the email baked into the
/// token for handlers that need it.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Identity passed into every service call
    pub caller: Caller,
    /// Email the token was issued for
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError(Error::InvalidCredentials))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(ApiError(Error::InvalidCredentials))?;

        let claims = state.tokens.verify(token)?;
        let access_role = claims
            .role
            .parse()
            .map_err(|_| ApiError(Error::InvalidCredentials))?;

        Ok(AuthUser {
            caller: Caller::new(claims.uid, access_role),
            email: claims.sub,
        })
    }
}
