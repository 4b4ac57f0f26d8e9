// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::middleware::response::status_text;

/// Message returned for every unexpected failure. Details only go to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "something went wrong. Please try again later";

/// HTTP API error rendered as `{statusCode, statusText, error}` or, for
/// request validation, `{statusCode, statusText, errors: [...]}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    Validation(Vec<String>),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-safe message
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::Conflict(msg) => msg.clone(),
            ApiError::Validation(errors) => errors.join(", "),
            ApiError::InternalServerError => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn to_json(&self) -> Value {
        let status = self.status_code();
        match self {
            ApiError::Validation(errors) => json!({
                "statusCode": status.as_u16(),
                "statusText": status_text(status),
                "errors": errors,
            }),
            _ => json!({
                "statusCode": status.as_u16(),
                "statusText": status_text(status),
                "error": self.message(),
            }),
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation(errors: Vec<String>) -> Self {
        ApiError::Validation(errors)
    }

    /// Body could not be bound as a JSON object
    pub fn unbindable_body() -> Self {
        ApiError::Validation(vec!["content-type must be application/json".to_string()])
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
