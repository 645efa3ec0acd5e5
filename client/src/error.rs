//! Client error handling
//!
//! Unifies HTTP, storage and calculation failures into one error type, and
//! maps backend error responses onto it.

use nutri_clinic_shared::errors::CalculationError;
use nutri_clinic_shared::types::ErrorResponse;
use reqwest::StatusCode;
use thiserror::Error;

/// Client error type
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Calculation(#[from] CalculationError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Build an error from a non-success response status and body
    ///
    /// The body is read as the backend's `{ "error": { ... } }` envelope when
    /// possible, otherwise used verbatim.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|r| r.error.message)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    body.trim().to_string()
                }
            });

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether the session should be dropped after this error
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_) | ClientError::NotLoggedIn)
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
