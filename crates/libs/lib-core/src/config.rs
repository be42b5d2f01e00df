//! # Application Configuration
//!
//! Configuration loaded from environment variables once at startup.
//!
//! There is no global accessor: build a [`Config`] in `main`, validate it,
//! and hand it to whatever needs it (token issuer, pool, app state).
//!
//! ```rust,no_run
//! use lib_core::Config;
//!
//! fn main() -> lib_core::Result<()> {
//!     let config = Config::from_env()?;
//!     config.validate()?;
//!     // ... pass `config` into the server
//!     Ok(())
//! }
//! ```

use crate::error::{AppError, Result};
use chrono::Duration;
use lib_utils::{get_env, get_env_or, get_env_parse_or};

/// Default token lifetime in seconds (one hour).
pub const DEFAULT_JWT_EXPIRATION_SECS: i64 = 3600;

/// Upper bound for token lifetime in seconds (30 days).
pub const MAX_JWT_EXPIRATION_SECS: i64 = 30 * 24 * 3600;

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for token signing and verification
    ///
    /// **Must be at least 32 characters long.**
    pub jwt_secret: String,

    /// Token validity period in seconds
    ///
    /// Valid range: 1 second to 30 days.
    pub jwt_expiration_secs: i64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"***REDACTED***")
            .field("jwt_expiration_secs", &self.jwt_expiration_secs)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// * `DATABASE_URL` - defaults to `sqlite:data/accounts.db`
    /// * `JWT_SECRET` - required
    /// * `JWT_EXPIRATION_SECS` - defaults to 3600
    pub fn from_env() -> Result<Self> {
        let database_url = get_env_or("DATABASE_URL", "sqlite:data/accounts.db");

        let jwt_secret = get_env("JWT_SECRET")?;

        let jwt_expiration_secs =
            get_env_parse_or("JWT_EXPIRATION_SECS", DEFAULT_JWT_EXPIRATION_SECS)?;

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_secs,
        })
    }

    /// Validate configuration values against security rules.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < 32 {
            return Err(AppError::Config(
                "JWT_SECRET must be at least 32 characters long".to_string(),
            ));
        }

        if !(1..=MAX_JWT_EXPIRATION_SECS).contains(&self.jwt_expiration_secs) {
            return Err(AppError::Config(format!(
                "JWT_EXPIRATION_SECS must be between 1 and {}",
                MAX_JWT_EXPIRATION_SECS
            )));
        }

        Ok(())
    }

    /// Token lifetime as a duration.
    pub fn token_ttl(&self) -> Duration {
        Duration::seconds(self.jwt_expiration_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret-key-must-be-at-least-32-characters-long!".to_string(),
            jwt_expiration_secs: 3600,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
        assert_eq!(config().token_ttl(), Duration::hours(1));
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = Config {
            jwt_secret: "short".to_string(),
            ..config()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_expiration_bounds() {
        for secs in [0, -5, MAX_JWT_EXPIRATION_SECS + 1] {
            let config = Config {
                jwt_expiration_secs: secs,
                ..config()
            };
            assert!(config.validate().is_err(), "accepted {secs}");
        }
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("test-secret-key"));
        assert!(rendered.contains("REDACTED"));
    }
}
