//! HTTP error mapping.

use crate::records::services::{ErrorClass, RecordServiceError};
use crate::templates::TemplateError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A record service rejected the operation.
    #[error(transparent)]
    Service(#[from] RecordServiceError),

    /// A template request failed validation.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The request body, path, or query could not be decoded.
    #[error("{0}")]
    Malformed(String),
}

impl ApiError {
    /// Classifies the error for the response body.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Service(err) => err.class(),
            Self::Template(_) | Self::Malformed(_) => ErrorClass::Validation,
        }
    }

    /// Returns the HTTP status for the error class.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.class() {
            ErrorClass::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorClass::NotFound => StatusCode::NOT_FOUND,
            ErrorClass::Conflict => StatusCode::CONFLICT,
            ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let class = self.class();
        let detail = if class == ErrorClass::Internal {
            error!(error = %self, "request failed");
            "internal server error".to_owned()
        } else {
            self.to_string()
        };
        let body = Json(json!({ "error": class.as_str(), "detail": detail }));
        (self.status(), body).into_response()
    }
}
