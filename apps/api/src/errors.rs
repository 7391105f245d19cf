use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Backend authentication failed: {0}")]
    BackendAuth(String),

    #[error("Backend quota exceeded: {0}")]
    BackendQuota(String),

    #[error("Enhancement failed: {0}")]
    Enhancement(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// `Json` extractor whose rejections (bad syntax, missing or unknown fields)
/// are reported as `VALIDATION_ERROR` bodies.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Auth(msg) => AppError::BackendAuth(msg),
            LlmError::QuotaExceeded(msg) => AppError::BackendQuota(msg),
            other => AppError::Enhancement(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::BackendAuth(msg) => {
                tracing::error!("Backend auth failure: {msg}");
                (
                    StatusCode::UNAUTHORIZED,
                    "AI_AUTH_ERROR",
                    "The AI service is not configured correctly".to_string(),
                )
            }
            AppError::BackendQuota(msg) => {
                tracing::warn!("Backend quota exhausted: {msg}");
                (
                    StatusCode::PAYMENT_REQUIRED,
                    "AI_QUOTA_EXCEEDED",
                    "The AI service has run out of credits. Please try again later".to_string(),
                )
            }
            AppError::Enhancement(msg) => {
                tracing::error!("Enhancement error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ENHANCEMENT_ERROR",
                    "Enhancement failed, please try again".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_auth_maps_to_401() {
        let err: AppError = LlmError::Auth("invalid x-api-key".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_llm_quota_maps_to_402() {
        let err: AppError = LlmError::QuotaExceeded("Insufficient Balance".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::PAYMENT_REQUIRED);
    }

    #[test]
    fn test_other_llm_errors_map_to_500() {
        let err: AppError = LlmError::EmptyContent.into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = AppError::Validation("text cannot be empty".to_string());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_json_rejection_maps_to_validation_error() {
        use axum::{body::Body, http::Request};

        #[derive(serde::Deserialize)]
        struct Payload {
            #[allow(dead_code)]
            text: String,
        }

        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let err = match AppJson::<Payload>::from_request(request, &()).await {
            Err(err) => err,
            Ok(_) => panic!("missing field must be rejected"),
        };
        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("text")));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
