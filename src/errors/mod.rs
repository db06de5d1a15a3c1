//! Error handling for the back-office.
//!
//! Action handlers surface errors as a header-only HTMX signal (`HX-Error-Message`, 422).
//! Page builders surface them through [`PageError`] as a JSON envelope with the mapped status.

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Header the drawer script reads on non-2xx responses.
pub const HX_ERROR_MESSAGE: HeaderName = HeaderName::from_static("hx-error-message");

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INVALID_FORM: &str = "INVALID_FORM";
    pub const INVALID_STATUS: &str = "INVALID_STATUS";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const BACKEND_ERROR: &str = "BACKEND_ERROR";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Authentication required
    Unauthorized(String),
    /// Record not found ("Role not found")
    NotFound(String),
    /// Request body or query could not be parsed
    InvalidForm(String),
    /// Status outside active/inactive
    InvalidStatus(String),
    /// Missing or conflicting field ("Role ID is required")
    Validation(String),
    /// A store call failed ("Failed to delete role")
    Backend(String),
    /// Database error
    Database(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Form payload could not be decoded.
    pub fn invalid_form() -> Self {
        AppError::InvalidForm("Invalid form data".to_string())
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidForm(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::InvalidForm(_) => codes::INVALID_FORM,
            AppError::InvalidStatus(_) => codes::INVALID_STATUS,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Backend(_) => codes::BACKEND_ERROR,
            AppError::Database(_) => codes::DATABASE_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the user-facing message.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::InvalidForm(msg)
            | AppError::InvalidStatus(msg)
            | AppError::Validation(msg)
            | AppError::Backend(msg)
            | AppError::Database(msg)
            | AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Internal(format!("JSON error: {}", err))
    }
}

/// Header-only error signal for drawer forms and row actions.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.message();
        let value = HeaderValue::from_str(&message)
            .unwrap_or_else(|_| HeaderValue::from_static("Request failed"));

        let mut response = StatusCode::UNPROCESSABLE_ENTITY.into_response();
        response.headers_mut().insert(HX_ERROR_MESSAGE, value);
        response
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
            },
        }
    }
}

/// Wrapper for errors raised while assembling a full page or table partial.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let body = ErrorResponse::new(&self.0);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_is_header_only_422() {
        let response = AppError::InvalidStatus("Invalid status".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.headers().get(HX_ERROR_MESSAGE).unwrap(),
            "Invalid status"
        );
    }

    #[test]
    fn test_unencodable_message_falls_back() {
        let response = AppError::Backend("line\nbreak".to_string()).into_response();

        assert_eq!(
            response.headers().get(HX_ERROR_MESSAGE).unwrap(),
            "Request failed"
        );
    }

    #[test]
    fn test_page_error_uses_mapped_status() {
        let response = PageError(AppError::NotFound("role not found".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = PageError(AppError::Backend("failed".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_display_includes_code() {
        let err = AppError::Validation("Role ID is required".to_string());
        assert_eq!(err.to_string(), "VALIDATION_ERROR: Role ID is required");
    }
}
