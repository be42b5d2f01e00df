//! # Services Layer
//!
//! Business logic between the HTTP handlers and the data layer:
//!
//! ```text
//! Handlers (HTTP) → Services (Business Logic) → Repository → DAO → SQLite
//! ```
//!
//! Services return `Result<T, AppError>`; nothing below them reaches the
//! request boundary untranslated.
//!
//! - [`auth`] - account signup and login

pub mod auth;

pub use auth::AuthService;
