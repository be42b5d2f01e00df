//! # Generic Data Access Object
//!
//! Six CRUD operations over any [`Entity`], with datastore failures absorbed
//! into `Option` / `bool` results.
//!
//! Every operation runs in its own transaction: committed on success, rolled
//! back on every failure path, so a failed call leaves the store as it found
//! it. Failures are logged here and never surface as errors:
//!
//! | Failure | Result | Log level |
//! |---|---|---|
//! | no such row | absent / `false` | `debug` |
//! | constraint violation (unique, foreign key, not null) | absent | `warn` |
//! | filter matched several rows in `find_one_or_none` | absent | `error` |
//! | unknown filter column, connection or SQL fault | absent / empty / `false` | `error` |
//!
//! ## Example
//!
//! ```rust,no_run
//! use lib_core::model::{Account, Dao, Filter, SqliteDao};
//! # async fn example(pool: lib_core::DbPool) {
//! let dao = SqliteDao::<Account>::new(pool);
//! let ann = dao.find_one_or_none(Filter::by("email", "ann@x.com")).await;
//! # }
//! ```

use super::entity::{Entity, Filter, ID_COLUMN};
use super::store::DbPool;
use async_trait::async_trait;
use sqlx::{error::ErrorKind, QueryBuilder, Sqlite, SqliteConnection, Transaction};
use std::marker::PhantomData;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Uniform persistence surface for one entity type.
#[async_trait]
pub trait Dao<E: Entity>: Send + Sync {
    /// Record with this id, if any.
    async fn find_by_id(&self, id: Uuid) -> Option<E>;

    /// The single record matching `filter`.
    ///
    /// More than one match is treated as a failure: the result is absent and
    /// the ambiguity is logged. No row is picked arbitrarily.
    async fn find_one_or_none(&self, filter: Filter) -> Option<E>;

    /// Every record matching `filter`, in no particular order.
    async fn find_all(&self, filter: Filter) -> Vec<E>;

    /// Build a record from `data`, store it, and return it with its generated id.
    async fn insert_one(&self, data: E::ForCreate) -> Option<E>;

    /// Merge `patch` into the record with `id` and return the merged record.
    async fn update_one(&self, id: Uuid, patch: E::ForUpdate) -> Option<E>;

    /// `true` only when the record existed and its removal was committed.
    async fn delete_one(&self, id: Uuid) -> bool;
}

// region: --- Error

/// Why a DAO call failed. Logged by the DAO, never returned to callers.
#[derive(Debug, thiserror::Error)]
pub enum DaoError {
    #[error("record not found")]
    NotFound,

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("filter matched {0} rows, expected at most one")]
    Ambiguous(u64),

    #[error("unknown column in filter: {0}")]
    UnknownColumn(&'static str),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for DaoError {
    fn from(err: sqlx::Error) -> Self {
        let constraint = match &err {
            sqlx::Error::Database(db_err) => matches!(
                db_err.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            )
            .then(|| db_err.message().to_string()),
            _ => None,
        };

        match constraint {
            Some(message) => DaoError::ConstraintViolation(message),
            None if matches!(err, sqlx::Error::RowNotFound) => DaoError::NotFound,
            None => DaoError::Database(err),
        }
    }
}

// endregion: --- Error

// region: --- SqliteDao

/// [`Dao`] backed by SQLite through `sqlx`.
pub struct SqliteDao<E> {
    pool: DbPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for SqliteDao<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> SqliteDao<E> {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    // -- Transaction boundary

    async fn begin(&self) -> Result<Transaction<'static, Sqlite>, DaoError> {
        Ok(self.pool.begin().await?)
    }

    /// Commit on success, roll back on failure.
    async fn finish<T>(
        tx: Transaction<'static, Sqlite>,
        result: Result<T, DaoError>,
    ) -> Result<T, DaoError> {
        match result {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("[DAO] {} rollback failed: {}", E::NAME, rollback_err);
                }
                Err(err)
            }
        }
    }

    /// Turn a failed call into an absent result, logging why.
    fn absorb<T>(op: &'static str, result: Result<T, DaoError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(DaoError::NotFound) => {
                debug!("[DAO] {} {}: not found", E::NAME, op);
                None
            }
            Err(err @ DaoError::ConstraintViolation(_)) => {
                warn!("[DAO] {} {} rejected: {}", E::NAME, op, err);
                None
            }
            Err(err) => {
                error!("[DAO] {} {} failed: {}", E::NAME, op, err);
                None
            }
        }
    }

    // -- Statements (run inside an open transaction)

    async fn select(
        conn: &mut SqliteConnection,
        filter: &Filter,
        limit: Option<i64>,
    ) -> Result<Vec<E>, DaoError> {
        if let Some(column) = filter.unknown_column::<E>() {
            return Err(DaoError::UnknownColumn(column));
        }

        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM {}",
            E::COLUMNS.join(", "),
            E::TABLE
        ));

        for (i, (column, value)) in filter.conditions().iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            qb.push(*column);
            qb.push(" = ");
            value.clone().push_bind(&mut qb);
        }

        if let Some(limit) = limit {
            qb.push(" LIMIT ");
            qb.push_bind(limit);
        }

        Ok(qb.build_query_as::<E>().fetch_all(&mut *conn).await?)
    }

    async fn select_one(conn: &mut SqliteConnection, filter: &Filter) -> Result<Option<E>, DaoError> {
        // Two rows are enough to detect ambiguity.
        let mut rows = Self::select(conn, filter, Some(2)).await?;
        if rows.len() > 1 {
            return Err(DaoError::Ambiguous(rows.len() as u64));
        }
        Ok(rows.pop())
    }

    async fn insert(conn: &mut SqliteConnection, record: &E) -> Result<E, DaoError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "INSERT INTO {} ({}) VALUES (",
            E::TABLE,
            E::COLUMNS.join(", ")
        ));
        for (i, value) in record.values().into_iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            value.push_bind(&mut qb);
        }
        qb.push(")");
        qb.build().execute(&mut *conn).await?;

        // Read back what the store actually holds.
        Self::select_one(conn, &Filter::by(ID_COLUMN, record.id()))
            .await?
            .ok_or(DaoError::NotFound)
    }

    async fn update(conn: &mut SqliteConnection, id: Uuid, patch: E::ForUpdate) -> Result<E, DaoError> {
        let mut record = Self::select_one(conn, &Filter::by(ID_COLUMN, id))
            .await?
            .ok_or(DaoError::NotFound)?;
        record.merge(patch);

        let mut qb = QueryBuilder::<Sqlite>::new(format!("UPDATE {} SET ", E::TABLE));
        let assignments = E::COLUMNS
            .iter()
            .zip(record.values())
            .filter(|(column, _)| **column != ID_COLUMN);
        for (i, (column, value)) in assignments.enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(*column);
            qb.push(" = ");
            value.push_bind(&mut qb);
        }
        qb.push(format!(" WHERE {} = ", ID_COLUMN));
        qb.push_bind(id);
        qb.build().execute(&mut *conn).await?;

        Ok(record)
    }

    async fn delete(conn: &mut SqliteConnection, id: Uuid) -> Result<(), DaoError> {
        let mut qb =
            QueryBuilder::<Sqlite>::new(format!("DELETE FROM {} WHERE {} = ", E::TABLE, ID_COLUMN));
        qb.push_bind(id);
        let result = qb.build().execute(&mut *conn).await?;

        match result.rows_affected() {
            0 => Err(DaoError::NotFound),
            1 => Ok(()),
            n => Err(DaoError::Ambiguous(n)),
        }
    }

    // -- Transactional wrappers

    async fn try_find_one(&self, filter: &Filter) -> Result<Option<E>, DaoError> {
        let mut tx = self.begin().await?;
        let result = Self::select_one(&mut *tx, filter).await;
        Self::finish(tx, result).await
    }

    async fn try_find_all(&self, filter: &Filter) -> Result<Vec<E>, DaoError> {
        let mut tx = self.begin().await?;
        let result = Self::select(&mut *tx, filter, None).await;
        Self::finish(tx, result).await
    }

    async fn try_insert(&self, data: E::ForCreate) -> Result<E, DaoError> {
        let record = E::from_create(data);
        let mut tx = self.begin().await?;
        let result = Self::insert(&mut *tx, &record).await;
        Self::finish(tx, result).await
    }

    async fn try_update(&self, id: Uuid, patch: E::ForUpdate) -> Result<E, DaoError> {
        let mut tx = self.begin().await?;
        let result = Self::update(&mut *tx, id, patch).await;
        Self::finish(tx, result).await
    }

    async fn try_delete(&self, id: Uuid) -> Result<(), DaoError> {
        let mut tx = self.begin().await?;
        let result = Self::delete(&mut *tx, id).await;
        Self::finish(tx, result).await
    }
}

#[async_trait]
impl<E: Entity> Dao<E> for SqliteDao<E> {
    async fn find_by_id(&self, id: Uuid) -> Option<E> {
        let result = self.try_find_one(&Filter::by(ID_COLUMN, id)).await;
        Self::absorb("find_by_id", result).flatten()
    }

    async fn find_one_or_none(&self, filter: Filter) -> Option<E> {
        let result = self.try_find_one(&filter).await;
        Self::absorb("find_one_or_none", result).flatten()
    }

    async fn find_all(&self, filter: Filter) -> Vec<E> {
        let result = self.try_find_all(&filter).await;
        Self::absorb("find_all", result).unwrap_or_default()
    }

    async fn insert_one(&self, data: E::ForCreate) -> Option<E> {
        let record = Self::absorb("insert_one", self.try_insert(data).await)?;
        info!("[DAO] Inserted new {} with ID: {}", E::NAME, record.id());
        Some(record)
    }

    async fn update_one(&self, id: Uuid, patch: E::ForUpdate) -> Option<E> {
        let record = Self::absorb("update_one", self.try_update(id, patch).await)?;
        info!("[DAO] Updated {} with ID: {}", E::NAME, id);
        Some(record)
    }

    async fn delete_one(&self, id: Uuid) -> bool {
        let deleted = Self::absorb("delete_one", self.try_delete(id).await).is_some();
        if deleted {
            info!("[DAO] Deleted {} with ID: {}", E::NAME, id);
        }
        deleted
    }
}

// endregion: --- SqliteDao
