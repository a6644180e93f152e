//! HTTP error responses.
//!
//! Every failure leaves the API as
//! `{"error": {"code": "...", "message": "...", "details": {...}?}}`.

use std::collections::BTreeMap;

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::ForumError;

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed request (400).
    BadRequest,
    /// No valid bearer token (401).
    Unauthorized,
    /// Authenticated but not allowed (403).
    Forbidden,
    /// Missing or deleted resource (404).
    NotFound,
    /// Uniqueness violation (409).
    Conflict,
    /// Field-level validation failure (422).
    ValidationError,
    /// Anything the caller cannot fix (500).
    InternalError,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<&ForumError> for ErrorCode {
    fn from(err: &ForumError) -> Self {
        match err {
            ForumError::Unauthorized => ErrorCode::Unauthorized,
            ForumError::Forbidden(_) => ErrorCode::Forbidden,
            ForumError::NotFound(_) => ErrorCode::NotFound,
            ForumError::Conflict(_) => ErrorCode::Conflict,
            ForumError::Validation(_) => ErrorCode::ValidationError,
            ForumError::Database(_)
            | ForumError::Token(_)
            | ForumError::Password(_)
            | ForumError::Io(_)
            | ForumError::Config(_) => ErrorCode::InternalError,
        }
    }
}

type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: ErrorCode,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a FieldErrors>,
}

/// Error returned by handlers and extractors.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<FieldErrors>,
}

impl ApiError {
    /// Create an error with a code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// The error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The client-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// 401 Unauthorized.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// 500 Internal Server Error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// 422 with one entry per failing field.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("Invalid value for {}", field),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        Self {
            code: ErrorCode::ValidationError,
            message: "Validation failed".to_string(),
            details: Some(details),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: &self.message,
                details: self.details.as_ref(),
            },
        };
        let mut response = (self.code.status_code(), Json(body)).into_response();
        if self.code == ErrorCode::Unauthorized {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<ForumError> for ApiError {
    fn from(err: ForumError) -> Self {
        let code = ErrorCode::from(&err);
        match err {
            ForumError::Unauthorized => ApiError::unauthorized("Authentication required"),
            ForumError::Forbidden(msg) | ForumError::Validation(msg) => ApiError::new(code, msg),
            e @ (ForumError::NotFound(_) | ForumError::Conflict(_)) => {
                ApiError::new(code, e.to_string())
            }
            other => {
                tracing::error!(error = %other, "request failed with internal error");
                ApiError::internal("An internal error occurred")
            }
        }
    }
}
