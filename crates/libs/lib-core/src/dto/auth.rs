//! # Authentication Data Transfer Objects
//!
//! Request and response structures for the authentication endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/v1/auth/signup` - [`SignupRequest`] -> [`TokenResponse`] (201)
//! - `POST /api/v1/auth/login` - [`LoginRequest`] -> [`TokenResponse`] (200)
//!
//! Failures on either endpoint return [`ErrorResponse`].
//!
//! ## Wire Format
//!
//! ```text
//! POST /api/v1/auth/signup
//! Content-Type: application/json
//!
//! { "username": "ann", "email": "ann@x.com", "password": "p@ss1" }
//! ```
//!
//! Response:
//! ```text
//! { "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." }
//! ```
//!
//! The token is opaque to callers; send it back as a bearer credential.

use serde::{Deserialize, Serialize};

/// Signup request for new account registration.
///
/// `password` is plaintext over TLS and is hashed before anything is stored.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Login request with email and password.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Successful signup or login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: String,
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Human-readable message, stable per error kind
    pub error: String,
    /// Error kind, e.g. `InvalidCredentials`
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_wire_format() {
        let json = r#"{"username":"ann","email":"ann@x.com","password":"p@ss1"}"#;
        let req: SignupRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.username, "ann");
        assert_eq!(req.email, "ann@x.com");
        assert_eq!(req.password, "p@ss1");
    }

    #[test]
    fn test_login_request_missing_password_rejected() {
        let json = r#"{"email":"ann@x.com"}"#;
        assert!(serde_json::from_str::<LoginRequest>(json).is_err());
    }

    #[test]
    fn test_debug_hides_password() {
        let req = LoginRequest {
            email: "ann@x.com".to_string(),
            password: "p@ss1".to_string(),
        };
        assert!(!format!("{:?}", req).contains("p@ss1"));
    }
}
