//! Custom error types for the API service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::validation::ValidationError;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Body or path parameter could not be decoded
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// A field broke a validation rule
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The email is already registered
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The addressed user does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store failure; `context` is the message shown to clients
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: DatabaseError,
    },

    /// Failure outside the store, such as password hashing
    #[error("Internal server error")]
    InternalServerError,
}

impl ApiError {
    /// Wrap a store error with the message clients should see
    pub fn store(context: &'static str) -> impl FnOnce(DatabaseError) -> ApiError {
        move |source| ApiError::Store { context, source }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) | ApiError::Validation(_) | ApiError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store { .. } | ApiError::InternalServerError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            ApiError::MalformedRequest(msg) | ApiError::Conflict(msg) | ApiError::NotFound(msg) => {
                msg
            }
            ApiError::Validation(err) => err.to_string(),
            ApiError::Store { context, source } => {
                error!(error = %source, "{}", context);
                context.to_string()
            }
            ApiError::InternalServerError => "Internal server error".to_string(),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
