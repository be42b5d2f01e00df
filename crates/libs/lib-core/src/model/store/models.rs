//! Entity types persisted through the generic DAO.

use crate::model::entity::{Entity, FieldValue};
use chrono::{DateTime, Utc};
use lib_utils::now_utc;
use sqlx::FromRow;
use uuid::Uuid;

// region: --- Account

/// A registered account.
///
/// The password hash is not part of the public surface: it can only be
/// checked with [`Account::verify_password`].
#[derive(Clone, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Check a plaintext password against the stored hash.
    pub fn verify_password(&self, password: &str) -> bool {
        lib_auth::verify_password(password, &self.password_hash)
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"***REDACTED***")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Data for creating a new account.
///
/// Carries the password **hash**; hash before building this.
#[derive(Clone)]
pub struct AccountForCreate {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl AccountForCreate {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            username,
            email,
            password_hash,
        }
    }
}

/// Data for updating an existing account.
///
/// Only `Some` fields are applied.
#[derive(Clone, Default)]
pub struct AccountForUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl AccountForUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    pub fn email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    pub fn password_hash(mut self, password_hash: String) -> Self {
        self.password_hash = Some(password_hash);
        self
    }
}

impl Entity for Account {
    type ForCreate = AccountForCreate;
    type ForUpdate = AccountForUpdate;

    const NAME: &'static str = "Account";
    const TABLE: &'static str = "accounts";
    const COLUMNS: &'static [&'static str] =
        &["id", "username", "email", "password_hash", "created_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_create(data: AccountForCreate) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            created_at: now_utc(),
        }
    }

    fn merge(&mut self, patch: AccountForUpdate) {
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(password_hash) = patch.password_hash {
            self.password_hash = password_hash;
        }
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.username.clone().into(),
            self.email.clone().into(),
            self.password_hash.clone().into(),
            self.created_at.into(),
        ]
    }
}

// endregion: --- Account

// region: --- ActivityLog

/// An audit entry for something an account did.
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct ActivityLog {
    pub id: Uuid,
    pub account_id: Uuid,
    pub action: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ActivityLogForCreate {
    pub account_id: Uuid,
    pub action: String,
    pub description: String,
}

impl ActivityLogForCreate {
    pub fn new(account_id: Uuid, action: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            account_id,
            action: action.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActivityLogForUpdate {
    pub description: Option<String>,
}

impl Entity for ActivityLog {
    type ForCreate = ActivityLogForCreate;
    type ForUpdate = ActivityLogForUpdate;

    const NAME: &'static str = "ActivityLog";
    const TABLE: &'static str = "activity_logs";
    const COLUMNS: &'static [&'static str] =
        &["id", "account_id", "action", "description", "created_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_create(data: ActivityLogForCreate) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id: data.account_id,
            action: data.action,
            description: data.description,
            created_at: now_utc(),
        }
    }

    fn merge(&mut self, patch: ActivityLogForUpdate) {
        if let Some(description) = patch.description {
            self.description = description;
        }
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            self.id.into(),
            self.account_id.into(),
            self.action.clone().into(),
            self.description.clone().into(),
            self.created_at.into(),
        ]
    }
}

// endregion: --- ActivityLog
