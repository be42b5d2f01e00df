//! # Authentication Handlers
//!
//! HTTP endpoints for account signup and login.
//!
//! - `POST /api/v1/auth/signup` → 201 `{"token": ...}`
//! - `POST /api/v1/auth/login` → 200 `{"token": ...}`
//!
//! Handlers only validate request shape; the business rules live in
//! [`AuthService`]. Every failure is an [`AppError`] rendered as
//! `{"error", "code"}`, including bodies that fail to parse (400
//! `InvalidInput`).
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{Router, routing::post};
//! use lib_web::handlers::auth::{signup, login};
//! use lib_web::AppState;
//!
//! fn routes() -> Router<AppState> {
//!     Router::new()
//!         .route("/signup", post(signup))
//!         .route("/login", post(login))
//! }
//! ```

use crate::services::AuthService;
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
};
use lib_core::{
    dto::{LoginRequest, SignupRequest, TokenResponse},
    AppError, Result,
};
use lib_utils::{validate_email, validate_not_empty};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Signup handler - creates a new account.
///
/// # Validation
///
/// - Username must not be blank
/// - Email must be syntactically valid
///
/// # Errors
///
/// - `400 InvalidInput` - unparsable body or validation failed
/// - `409 DuplicateEmail` - email already registered
/// - `500 AccountCreationFailed` - the account row could not be written
#[instrument(skip_all)]
pub async fn signup(
    State(auth): State<Arc<AuthService>>,
    payload: std::result::Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    let Json(req) = payload?;
    info!("[SIGNUP] New account signup request: {} <{}>", req.username, req.email);

    validate_not_empty(&req.username, "Username").map_err(invalid_input)?;
    validate_email(&req.email).map_err(invalid_input)?;

    let token = auth.signup(&req.username, &req.email, &req.password).await?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// Login handler - authenticates an existing account.
///
/// Unknown email and wrong password both answer `401 InvalidCredentials`.
#[instrument(skip_all)]
pub async fn login(
    State(auth): State<Arc<AuthService>>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>> {
    let Json(req) = payload?;
    info!("[LOGIN] Login attempt: {}", req.email);

    let token = auth.login(&req.email, &req.password).await?;

    Ok(Json(TokenResponse { token }))
}

fn invalid_input(message: String) -> AppError {
    warn!("[VALIDATION] {}", message);
    AppError::InvalidInput(message)
}

#[cfg(test)]
mod tests;
