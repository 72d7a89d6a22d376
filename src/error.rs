use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Errors surfaced by the HTTP handlers. Every variant renders as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Username or email already taken.
    #[error("Username or email already exists")]
    Conflict,

    /// Unknown email or wrong password; the two are deliberately not told apart.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Body is not JSON or lacks a required field.
    #[error("Invalid request body")]
    BadRequest,

    /// Missing, malformed, forged or expired bearer token.
    #[error("Unauthorized")]
    Unauthorized,

    /// Anything the caller cannot fix. The message is fixed per operation.
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Conflict | ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Unwraps a JSON body, turning axum's plain-text rejection into [`ApiError::BadRequest`].
/// The rejection detail only goes to the log.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            warn!(status = %rejection.status(), reason = %rejection.body_text(), "rejected request body");
            Err(ApiError::BadRequest)
        }
    }
}
