//! # HTTP Request Handlers
//!
//! Axum handlers grouped by feature. Handlers extract state and JSON bodies,
//! validate input, and delegate to [`crate::services`].
//!
//! - **[`auth`]**: account signup and login
//!   - `POST /api/v1/auth/signup`
//!   - `POST /api/v1/auth/login`
//!
//! Handlers return `lib_core::Result<T>`; `AppError` renders itself as the
//! error response.

pub mod auth;
