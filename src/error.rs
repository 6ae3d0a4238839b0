// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::DatabaseError;

/// Fixed client message for every authentication failure
pub const NOT_LOGGED_IN: &str = "You are not logged in";

/// Fixed client message for every body that fails its shape
pub const INPUTS_NOT_CORRECT: &str = "Inputs are not correct";

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 403 Forbidden
    Forbidden(String),

    // 411 Length Required (shape validation failures)
    LengthRequired(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::LengthRequired(_) => StatusCode::LENGTH_REQUIRED,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Forbidden(msg) => msg,
            ApiError::LengthRequired(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::LengthRequired(_) => "INVALID_INPUT",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

impl ApiError {
    /// Authentication failure; the message never varies by cause
    pub fn not_logged_in() -> Self {
        ApiError::Forbidden(NOT_LOGGED_IN.to_string())
    }

    /// Shape validation failure; the message never varies by cause
    pub fn invalid_input() -> Self {
        ApiError::LengthRequired(INPUTS_NOT_CORRECT.to_string())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

/// Message returned for every store failure
pub const STORE_FAILURE: &str = "An error occurred while processing your request";

// Store failures are one class for clients; the cause only reaches the logs.
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match &err {
            DatabaseError::NotFound(msg) => tracing::warn!("Store miss: {}", msg),
            DatabaseError::Sqlx(sqlx::Error::PoolTimedOut) | DatabaseError::Sqlx(sqlx::Error::Io(_)) => {
                tracing::error!("Database unavailable: {}", err)
            }
            other => tracing::error!("Store error: {}", other),
        }
        ApiError::internal_server_error(STORE_FAILURE)
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
