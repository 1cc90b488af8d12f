//! Error types for the catalog server

use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Machine-readable error codes carried in the generic error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 3,
    BadValue = 18,
    NoSuchData = 20,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Form input failed one or more field rules. `echo` is the unsaved
    /// entity as it was constructed from the input.
    #[error("Validation failed for {entity}: {errors:?}")]
    Validation {
        entity: &'static str,
        echo: Value,
        errors: BTreeMap<String, String>,
    },

    /// Delete refused because other records still reference the entity
    #[error("Cannot delete {entity}: {message}")]
    HasDependents {
        entity: &'static str,
        message: String,
    },

    #[error("Conflict on {field}: {message}")]
    Conflict {
        field: &'static str,
        message: String,
    },

    /// Request body that is not JSON or does not fit the form
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation { .. }
            | AppError::HasDependents { .. }
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Store(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Form and guard failures answer in the entity envelope
        let (code, message) = match self {
            AppError::Validation { entity, echo, errors } => {
                return (status, Json(json!({ entity: echo, "error": errors }))).into_response();
            }
            AppError::HasDependents { entity, message } => {
                tracing::warn!("Delete of {} refused: {}", entity, message);
                return (status, Json(json!({ "error": { entity: message } }))).into_response();
            }
            AppError::Conflict { field, message } => {
                return (status, Json(json!({ "error": { field: message } }))).into_response();
            }
            AppError::NotFound(msg) => (ErrorCode::NoSuchData, msg),
            AppError::BadRequest(msg) => (ErrorCode::BadValue, msg),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (ErrorCode::DbFailure, "Database error".to_string())
            }
            AppError::Store(msg) => {
                tracing::error!("Store error: {}", msg);
                (ErrorCode::BadValue, "Store error".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (ErrorCode::Failure, "Internal server error".to_string())
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
