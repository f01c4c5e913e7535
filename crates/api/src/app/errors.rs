use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use photoreport_auth::{AuthError, ErrorKind};
use photoreport_core::DomainError;

/// Handler/middleware failure rendered as `{"error": <code>, "message": <text>}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(err) => auth_error_to_response(err),
            ApiError::Domain(err) => domain_error_to_response(err),
        }
    }
}

pub fn auth_error_to_response(err: AuthError) -> Response {
    let status = match err.kind() {
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::Internal => {
            error!(error = %err, "authentication pipeline failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    json_error(status, err.code(), err.to_string())
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "INVALID_ID", msg),
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "ENTITY_NOT_FOUND", msg),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "CONFLICT", msg),
        DomainError::Unauthorized => json_error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Unauthorized"),
        DomainError::Unavailable(msg) => {
            error!(error = %msg, "store unavailable");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR", "Internal Server Error")
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
