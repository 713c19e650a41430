//! Response types for the Time-Tracking & Compliance Engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let (status, code) = match &error {
            EngineError::EmployeeNotFound { .. } => (StatusCode::NOT_FOUND, "EMPLOYEE_NOT_FOUND"),
            EngineError::EntryNotFound { .. } => (StatusCode::NOT_FOUND, "ENTRY_NOT_FOUND"),
            EngineError::BreakNotFound { .. } => (StatusCode::NOT_FOUND, "BREAK_NOT_FOUND"),
            EngineError::AlertNotFound { .. } => (StatusCode::NOT_FOUND, "ALERT_NOT_FOUND"),
            EngineError::ViolationNotFound { .. } => {
                (StatusCode::NOT_FOUND, "VIOLATION_NOT_FOUND")
            }
            EngineError::ActiveEntryExists { .. } => (StatusCode::CONFLICT, "ALREADY_CLOCKED_IN"),
            EngineError::NotClockedIn { .. } => (StatusCode::CONFLICT, "NOT_CLOCKED_IN"),
            EngineError::NotOnBreak { .. } => (StatusCode::CONFLICT, "NOT_ON_BREAK"),
            EngineError::BreakAlreadyActive { .. } => {
                (StatusCode::CONFLICT, "BREAK_ALREADY_ACTIVE")
            }
            EngineError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            EngineError::SettingsNotFound { .. } | EngineError::SettingsParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SETTINGS_ERROR")
            }
            EngineError::StoreError { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
        };
        ApiErrorResponse {
            status,
            error: ApiError::new(code, error.to_string()),
        }
    }
}
