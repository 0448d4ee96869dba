use advisor::AdvisorError;
use axum::extract::rejection::JsonRejection;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use mavuno_core::{CoreError, FieldError};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Validation(Vec<FieldError>),
    NotConfigured(String),
    RateLimited(Option<u64>),
    Upstream(String),
    Internal(String),
}

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut retry_after = None;
        let mut details = None;

        let (status, error_type, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            AppError::Validation(errors) => {
                let message = errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                details = Some(errors);
                (StatusCode::BAD_REQUEST, "validation_error", message)
            }
            AppError::NotConfigured(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "not_configured", msg)
            }
            AppError::RateLimited(after) => {
                retry_after = after;
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "rate_limited",
                    "The AI service is busy. Please try again shortly.".to_string(),
                )
            }
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "upstream_error", msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        });

        match retry_after {
            Some(secs) => (status, [(header::RETRY_AFTER, secs.to_string())], body).into_response(),
            None => (status, body).into_response(),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownCounty(_) | CoreError::UnknownCrop(_) => {
                AppError::NotFound(err.to_string())
            }
            CoreError::Validation(errors) => AppError::Validation(errors),
        }
    }
}

/// A body that does not deserialize is reported like any other form error.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::Validation(vec![FieldError::new("body", rejection.body_text())])
    }
}

impl From<AdvisorError> for AppError {
    fn from(err: AdvisorError) -> Self {
        match err {
            AdvisorError::MissingApiKey => AppError::NotConfigured(err.to_string()),
            AdvisorError::RateLimited { retry_after } => AppError::RateLimited(retry_after),
            AdvisorError::Serialization(e) => {
                tracing::error!("Failed to encode model request: {:?}", e);
                AppError::Internal("Failed to encode model request".to_string())
            }
            other => {
                tracing::error!("Advisor error: {:?}", other);
                AppError::Upstream(other.to_string())
            }
        }
    }
}
