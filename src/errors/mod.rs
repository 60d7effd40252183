//! Error handling module for the G2L backend.
//!
//! Provides the session error taxonomy with mapping to HTTP status codes and response envelopes.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const MISSING_INPUT: &str = "MISSING_INPUT";
    pub const INVALID_SOURCE: &str = "INVALID_SOURCE";
    pub const GENERATION_FAILURE: &str = "GENERATION_FAILURE";
    pub const UNSUPPORTED_SYNTHESIS: &str = "UNSUPPORTED_SYNTHESIS";
    pub const BUSY: &str = "BUSY";
    pub const INPUT_LOCKED: &str = "INPUT_LOCKED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INVALID_STATE: &str = "INVALID_STATE";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Message shown when no source channel carries content.
pub const MISSING_INPUT_MESSAGE: &str = "Please provide a source: a URL, a PDF, or a description.";

/// Message shown when a non-narrative source cannot become an app.
pub const UNSUPPORTED_SYNTHESIS_MESSAGE: &str = "This topic is not sequential. Only narrative topics from PDFs or text can be turned into RPGs in this demo.";

/// Application error type.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// No source provided
    MissingInput,
    /// Malformed URL or non-PDF file, rejected before any external call
    InvalidSource(String),
    /// An external generation call failed
    GenerationFailure(String),
    /// Non-narrative content paired with a source that cannot produce an app
    UnsupportedSynthesis,
    /// A generation request is already in flight
    Busy,
    /// Another input channel already carries content
    InputLocked(String),
    /// Resource not found
    NotFound(String),
    /// Validation error
    Validation(String),
    /// Operation not valid for the current view
    InvalidState(String),
    /// Durable storage error
    Storage(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingInput => StatusCode::BAD_REQUEST,
            AppError::InvalidSource(_) => StatusCode::BAD_REQUEST,
            AppError::GenerationFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::UnsupportedSynthesis => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Busy => StatusCode::CONFLICT,
            AppError::InputLocked(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidState(_) => StatusCode::CONFLICT,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingInput => codes::MISSING_INPUT,
            AppError::InvalidSource(_) => codes::INVALID_SOURCE,
            AppError::GenerationFailure(_) => codes::GENERATION_FAILURE,
            AppError::UnsupportedSynthesis => codes::UNSUPPORTED_SYNTHESIS,
            AppError::Busy => codes::BUSY,
            AppError::InputLocked(_) => codes::INPUT_LOCKED,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::InvalidState(_) => codes::INVALID_STATE,
            AppError::Storage(_) => codes::STORAGE_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::MissingInput => MISSING_INPUT_MESSAGE.to_string(),
            AppError::InvalidSource(msg) => msg.clone(),
            AppError::GenerationFailure(msg) => msg.clone(),
            AppError::UnsupportedSynthesis => UNSUPPORTED_SYNTHESIS_MESSAGE.to_string(),
            AppError::Busy => "A generation request is already in progress".to_string(),
            AppError::InputLocked(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidState(msg) => msg.clone(),
            AppError::Storage(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
        }
    }

    /// Text shown inline under the generate button.
    ///
    /// Generation failures are prefixed; the other input errors already read as user guidance.
    pub fn inline_message(&self) -> String {
        match self {
            AppError::GenerationFailure(msg) if msg.trim().is_empty() => {
                "An unknown error occurred.".to_string()
            }
            AppError::GenerationFailure(msg) => format!("An error occurred: {}", msg),
            other => other.message(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Storage(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Internal(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Generative API transport error: {:?}", err);
        AppError::GenerationFailure(format!("Generative API request failed: {}", err))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        let details = match error {
            AppError::GenerationFailure(_)
            | AppError::MissingInput
            | AppError::InvalidSource(_)
            | AppError::UnsupportedSynthesis => {
                Some(serde_json::json!({ "inputError": error.inline_message() }))
            }
            _ => None,
        };

        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                details,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
