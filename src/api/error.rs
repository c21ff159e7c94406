//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::RelayError;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Additional detail, only for unexpected failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints return `Result<T, ApiError>` for consistent error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Provider credential missing at startup (500)
    #[error("API key not configured")]
    MissingCredentials,

    /// Provider call failed; detail is logged, never returned (500)
    #[error("AI service temporarily unavailable")]
    ServiceUnavailable,

    /// Bad request / validation error (400)
    #[error("{0}")]
    BadRequest(String),

    /// Unexpected failure, including unreadable request bodies (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// No route matched (404)
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::MissingCredentials => "missing_credentials",
            ApiError::ServiceUnavailable => "service_unavailable",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Internal(_) => "internal_error",
            ApiError::NotFound(_) => "not_found",
        }
    }

    fn body(&self) -> ErrorResponse {
        let (error, details) = match self {
            ApiError::Internal(msg) => ("Internal server error".to_string(), Some(msg.clone())),
            ApiError::NotFound(path) => ("Not found".to_string(), Some(path.clone())),
            other => (other.to_string(), None),
        };

        ErrorResponse {
            error,
            details,
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MissingCredentials | ApiError::ServiceUnavailable | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        tracing::error!(
            error_type = self.error_type(),
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(self.body())
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::MissingCredentials => ApiError::MissingCredentials,
            RelayError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            RelayError::Provider(_) => ApiError::ServiceUnavailable,
        }
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Internal(err.to_string()).into()
}

/// JSON extractor config that routes unreadable or oversized bodies through [`ApiError`]
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(json_error_handler)
}
