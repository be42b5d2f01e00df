//! # Authentication Library
//!
//! Password hashing and signed, expiring identity tokens.

pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use pwd::{hash_password, verify_password, verify_password_dummy, PwdError};
pub use token::{AccountClaims, TokenError, TokenIssuer};
