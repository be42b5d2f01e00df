//! # Core Library
//!
//! Configuration, error taxonomy, DTOs, entities, and the generic data-access
//! layer (DAO + Repository).

pub mod config;
pub mod error;
pub mod model;
pub mod dto;

/// Test database helpers; enabled for dependents by the `test-utils` feature.
#[cfg(any(test, feature = "test-utils"))]
pub mod _dev_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::store::{DbPool, create_pool, run_migrations};
