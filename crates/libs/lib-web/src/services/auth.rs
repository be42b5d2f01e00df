//! # Auth Service
//!
//! Signup and login over the account repository, the password hasher, and
//! the token issuer.
//!
//! ## Signup
//!
//! 1. Email already registered → [`AppError::DuplicateEmail`]
//! 2. Hash the password
//! 3. Insert the account; any failure → [`AppError::AccountCreationFailed`]
//! 4. Issue a token carrying [`AccountClaims`]
//!
//! The lookup in step 1 is only a fast path. Two concurrent signups can both
//! pass it; the unique index on `accounts.email` decides which insert wins,
//! and the loser gets `AccountCreationFailed`.
//!
//! ## Login
//!
//! Unknown email and wrong password both yield
//! [`AppError::InvalidCredentials`], and both run one full password
//! verification, so neither the answer nor its timing reveals which emails
//! are registered.
//!
//! Argon2 work runs on the blocking thread pool.
//!
//! Each success is also written to the activity log. That write is
//! best-effort and never fails the operation.

use chrono::Duration;
use lib_auth::{hash_password, verify_password_dummy, AccountClaims, TokenIssuer};
use lib_core::model::{
    AccountForCreate, AccountRepository, ActivityLogForCreate, ActivityLogRepository,
};
use lib_core::{AppError, Config, DbPool, Result};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Account signup and login.
pub struct AuthService {
    accounts: AccountRepository,
    activity: ActivityLogRepository,
    tokens: TokenIssuer,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(
        accounts: AccountRepository,
        activity: ActivityLogRepository,
        tokens: TokenIssuer,
        token_ttl: Duration,
    ) -> Self {
        Self {
            accounts,
            activity,
            tokens,
            token_ttl,
        }
    }

    /// SQLite-backed service using the key and lifetime from `config`.
    pub fn from_pool(pool: DbPool, config: &Config) -> Self {
        Self::new(
            AccountRepository::sqlite(pool.clone()),
            ActivityLogRepository::sqlite(pool),
            TokenIssuer::new(&config.jwt_secret),
            config.token_ttl(),
        )
    }

    /// The issuer used to sign this service's tokens.
    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Register a new account and return a token for it.
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> Result<String> {
        if self.accounts.find_by_email(email).await.is_some() {
            warn!("[SIGNUP] Email already registered: {}", email);
            return Err(AppError::DuplicateEmail);
        }

        debug!("[SIGNUP] Hashing password...");
        let password = password.to_string();
        let password_hash = run_blocking(move || hash_password(&password)).await??;

        let data = AccountForCreate::new(username.to_string(), email.to_string(), password_hash);
        let account = self.accounts.insert_one(data).await.ok_or_else(|| {
            warn!("[SIGNUP] Account insert failed for: {}", email);
            AppError::AccountCreationFailed
        })?;

        let token = self.issue(account.id)?;

        info!("[SIGNUP] Account created: {} ({})", account.id, account.username);
        self.record_activity(account.id, "signup", "Account created").await;

        Ok(token)
    }

    /// Authenticate by email and password and return a fresh token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let account = self.accounts.find_by_email(email).await;

        let password = password.to_string();
        let (account, verified) = run_blocking(move || {
            let verified = match &account {
                Some(account) => account.verify_password(&password),
                None => verify_password_dummy(&password),
            };
            (account, verified)
        })
        .await?;

        let account = match account {
            Some(account) if verified => account,
            Some(account) => {
                warn!("[LOGIN] Wrong password for account: {}", account.id);
                return Err(AppError::InvalidCredentials);
            }
            None => {
                warn!("[LOGIN] Unknown email: {}", email);
                return Err(AppError::InvalidCredentials);
            }
        };

        let token = self.issue(account.id)?;

        info!("[LOGIN] Account authenticated: {}", account.id);
        self.record_activity(account.id, "login", "Logged in").await;

        Ok(token)
    }

    fn issue(&self, account_id: Uuid) -> Result<String> {
        Ok(self.tokens.issue(&AccountClaims { account_id }, self.token_ttl)?)
    }

    async fn record_activity(&self, account_id: Uuid, action: &str, description: &str) {
        let entry = ActivityLogForCreate::new(account_id, action, description);
        if self.activity.insert_one(entry).await.is_none() {
            warn!("[ACTIVITY] Could not record '{}' for account {}", action, account_id);
        }
    }
}

/// Run CPU-heavy work off the async worker threads.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("blocking task failed: {e}")))
}
