use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use crate::domain::{search::SearchError, AuditError, ReviewError};

/// Machine-readable reason attached to some error responses so the
/// caseworker UI can show a specific message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MalformedDateOfBirth,
    InvalidTransition,
    NotAssignee,
    NoFlaggedSections,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: Option<ErrorCode>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidArgument(_) => Self::bad_request(err.to_string()),
            SearchError::MalformedDate { .. } => {
                Self::bad_request(err.to_string()).with_code(ErrorCode::MalformedDateOfBirth)
            }
            SearchError::NotFound(_) => Self::not_found(err.to_string()),
            SearchError::Backend { .. } | SearchError::Gateway(_) => {
                tracing::error!("Record gateway error: {}", err);
                Self::bad_gateway(err.to_string())
            }
            SearchError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                Self::internal("search failed")
            }
        }
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::NotFound(_) => Self::not_found(err.to_string()),
            ReviewError::InvalidTransition { .. } => {
                Self::conflict(err.to_string()).with_code(ErrorCode::InvalidTransition)
            }
            ReviewError::NotAssignee { .. } => {
                Self::forbidden(err.to_string()).with_code(ErrorCode::NotAssignee)
            }
            ReviewError::NoFlaggedSections => {
                Self::bad_request(err.to_string()).with_code(ErrorCode::NoFlaggedSections)
            }
            ReviewError::Stale(_) => {
                Self::conflict(err.to_string()).with_code(ErrorCode::InvalidTransition)
            }
            ReviewError::Store(message) => {
                tracing::error!("Review store error: {}", message);
                Self::internal("review failed")
            }
        }
    }
}

impl From<AuditError> for ApiError {
    fn from(err: AuditError) -> Self {
        tracing::error!("Audit log error: {:?}", err);
        Self::internal("audit log unavailable")
    }
}
