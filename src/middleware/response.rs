use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::error::ApiError;

/// Upper-case, underscore separated reason phrase (`INTERNAL_SERVER_ERROR`)
pub fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_uppercase()
        .replace(' ', "_")
}

/// Wrapper for API responses that adds the `{statusCode, statusText, data}` envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with 200 status
    pub fn ok(data: T) -> Self {
        Self::with_status(data, StatusCode::OK)
    }

    /// Create a 201 Created response
    pub fn created(data: T) -> Self {
        Self::with_status(data, StatusCode::CREATED)
    }

    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self { data, status_code }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return ApiError::InternalServerError.into_response();
            }
        };

        let envelope = json!({
            "statusCode": self.status_code.as_u16(),
            "statusText": status_text(self.status_code),
            "data": data
        });

        (self.status_code, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_texts() {
        assert_eq!(status_text(StatusCode::OK), "OK");
        assert_eq!(status_text(StatusCode::CREATED), "CREATED");
        assert_eq!(status_text(StatusCode::BAD_REQUEST), "BAD_REQUEST");
        assert_eq!(status_text(StatusCode::UNAUTHORIZED), "UNAUTHORIZED");
        assert_eq!(status_text(StatusCode::FORBIDDEN), "FORBIDDEN");
        assert_eq!(status_text(StatusCode::CONFLICT), "CONFLICT");
        assert_eq!(status_text(StatusCode::INTERNAL_SERVER_ERROR), "INTERNAL_SERVER_ERROR");
    }

    #[tokio::test]
    async fn wraps_data() {
        let response = ApiResponse::created("customer sign up successfully").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({
                "statusCode": 201,
                "statusText": "CREATED",
                "data": "customer sign up successfully"
            })
        );
    }

    #[tokio::test]
    async fn null_data_is_kept() {
        let response = ApiResponse::created(()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body.get("data").unwrap().is_null());
    }
}
