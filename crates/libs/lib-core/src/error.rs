//! # Centralized Error Handling
//!
//! [`AppError`] is the one error type that reaches the request boundary.
//! Everything below it (DAO, hasher, token issuer) is translated into one of
//! these kinds first.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx)
//!    - [`InvalidInput`](AppError::InvalidInput) → 400 Bad Request
//!    - [`InvalidCredentials`](AppError::InvalidCredentials) → 401 Unauthorized
//!    - [`ExpiredToken`](AppError::ExpiredToken) / [`InvalidToken`](AppError::InvalidToken) → 401 Unauthorized
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!    - [`DuplicateEmail`](AppError::DuplicateEmail) → 409 Conflict
//!
//! 2. **Server Errors** (5xx)
//!    - [`AccountCreationFailed`](AppError::AccountCreationFailed) → 500
//!    - [`Config`](AppError::Config) → 500
//!    - [`Internal`](AppError::Internal) → 500
//!
//! Responses carry `{"error": <message>, "code": <kind>}`. Server-side detail
//! is logged and never sent to the caller.

use crate::dto::ErrorResponse;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lib_auth::{PwdError, TokenError};
use thiserror::Error;

/// Message for request bodies that are not the expected JSON document.
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Signup with an email that already belongs to an account.
    #[error("Email already in use")]
    DuplicateEmail,

    /// The account row could not be written (constraint race or datastore fault).
    #[error("Account creation failed")]
    AccountCreationFailed,

    /// Unknown email or wrong password. Callers cannot tell which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid token")]
    InvalidToken,

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input (validation error).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::ExpiredToken | AppError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::AccountCreationFailed | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable, user-facing message for this error kind.
    pub fn user_message(&self) -> String {
        match self {
            AppError::DuplicateEmail => "Email already in use".to_string(),
            AppError::AccountCreationFailed => "Error creating account".to_string(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::ExpiredToken => "Token expired".to_string(),
            AppError::InvalidToken => "Invalid token".to_string(),
            AppError::NotFound(msg) | AppError::InvalidInput(msg) => msg.clone(),
            AppError::Config(_) | AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }

    /// Machine-readable error code sent alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DuplicateEmail => "DuplicateEmail",
            AppError::AccountCreationFailed => "AccountCreationFailed",
            AppError::InvalidCredentials => "InvalidCredentials",
            AppError::ExpiredToken => "ExpiredToken",
            AppError::InvalidToken => "InvalidToken",
            AppError::NotFound(_) => "NotFound",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Config(_) => "Config",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Json(ErrorResponse {
            error: self.user_message(),
            code: self.code().to_string(),
        });

        (status, body).into_response()
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AppError::ExpiredToken,
            TokenError::Invalid => AppError::InvalidToken,
            TokenError::Encode(msg) => AppError::Internal(msg),
        }
    }
}

/// Malformed JSON, missing fields, or a wrong content type. Parser detail
/// is logged, never echoed.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::InvalidInput(INVALID_BODY_MESSAGE.to_string())
    }
}

impl From<PwdError> for AppError {
    fn from(err: PwdError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
