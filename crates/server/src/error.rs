//! Error → HTTP status mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use boards_core::Error;
use serde_json::json;
use tracing::error;

/// Result alias for handler functions.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Business error carried out of a handler.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            e if e.is_not_found() => (StatusCode::NOT_FOUND, self.0.to_string()),
            e if e.is_conflict() => (StatusCode::CONFLICT, self.0.to_string()),
            Error::Unauthorized(_) => (StatusCode::FORBIDDEN, self.0.to_string()),
            Error::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            Error::Validation(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            Error::Storage(cause) => {
                error!(%cause, "request failed on storage");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: Error) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(Error::ProjectNotFound(1)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(Error::EmailAlreadyExists("a@b.c".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(Error::unauthorized("nope")),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(Error::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(Error::validation("too long")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(Error::storage("disk on fire")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
