//! Error responses for the task HTTP surface.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::identity::ports::IdentityError;
use crate::task::{domain::TaskDomainError, services::TaskAccessError};

/// Errors surfaced by HTTP handlers.
///
/// Storage and identity backend failures are logged where they are
/// converted; the response body never carries their cause.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller input failed field validation.
    #[error(transparent)]
    Validation(TaskDomainError),

    /// The request body or query string could not be decoded.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// No usable bearer credential accompanied the request.
    #[error("{0}")]
    Unauthorized(&'static str),

    /// The task is not in the caller's visible set, or the id is not a task
    /// id at all.
    #[error("not found")]
    NotFound,

    /// The requested listing page lies beyond the last page.
    #[error("invalid page")]
    InvalidPage,

    /// An infrastructure failure occurred.
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound | Self::InvalidPage => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match self {
            Self::Validation(err) => {
                let mut fields = Map::new();
                fields.insert(
                    err.field().unwrap_or("detail").to_owned(),
                    json!([err.to_string()]),
                );
                Value::Object(fields)
            }
            Self::MalformedRequest(reason) => json!({ "detail": reason }),
            other => json!({ "detail": other.to_string() }),
        }
    }
}

impl From<TaskAccessError> for ApiError {
    fn from(err: TaskAccessError) -> Self {
        match err {
            TaskAccessError::Validation(domain) => Self::Validation(domain),
            TaskAccessError::NotFound(_) => Self::NotFound,
            TaskAccessError::Repository(source) => {
                tracing::error!(error = %source, "task repository failure");
                Self::Internal
            }
        }
    }
}

impl From<TaskDomainError> for ApiError {
    fn from(err: TaskDomainError) -> Self {
        Self::Validation(err)
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidCredentials => Self::Unauthorized("invalid token"),
            IdentityError::Backend(source) => {
                tracing::error!(error = %source, "identity provider failure");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(self.body())).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
