use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use thiserror::Error;

use super::dto::ErrorBody;
use crate::domain::DomainError;

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON in request body.";
pub const MISSING_CONTENT_TYPE_MESSAGE: &str =
    "Expected request with `Content-Type: application/json`.";

/// Errors surfaced by the HTTP relay, rendered as `{ "error", "details"? }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    Upstream {
        message: String,
        details: Option<Value>,
    },

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidInput(msg) | DomainError::InvalidFormat(msg) => {
                ApiError::BadRequest(msg)
            }
            DomainError::Provider { message, details } => ApiError::Upstream { message, details },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.status();
        let body = match self {
            ApiError::Upstream { message, details } => ErrorBody {
                error: message,
                details: Some(details.unwrap_or(Value::Null)),
            },
            other => ErrorBody {
                error: other.to_string(),
                details: None,
            },
        };
        (code, Json(body)).into_response()
    }
}
