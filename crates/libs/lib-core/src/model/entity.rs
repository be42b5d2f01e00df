//! # Entity Contract
//!
//! What the generic DAO needs to know about a record type, and nothing more.
//!
//! An entity has a unique `id`, is built from a creation intent
//! ([`Entity::ForCreate`]), and merges an update patch
//! ([`Entity::ForUpdate`]). Its table and columns are declared as constants
//! so the DAO can build SQL without knowing any entity-specific field.

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, FromRow, QueryBuilder, Sqlite};
use uuid::Uuid;

/// Name of the primary-key column every entity table carries.
pub const ID_COLUMN: &str = "id";

/// A record type the generic DAO can persist.
pub trait Entity: for<'r> FromRow<'r, SqliteRow> + Clone + Send + Sync + Unpin + 'static {
    /// Creation intent; turned into a full record by [`Entity::from_create`].
    type ForCreate: Send + 'static;
    /// Update patch; applied by [`Entity::merge`].
    type ForUpdate: Send + 'static;

    /// Human-readable entity name, used in logs.
    const NAME: &'static str;
    /// Table name.
    const TABLE: &'static str;
    /// All columns, in the order [`Entity::values`] returns them. Must include [`ID_COLUMN`].
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> Uuid;

    /// Build a complete record, assigning identity and creation time.
    fn from_create(data: Self::ForCreate) -> Self;

    /// Apply an update patch. Must not change `id` or creation time.
    fn merge(&mut self, patch: Self::ForUpdate);

    /// Column values, aligned with [`Entity::COLUMNS`].
    fn values(&self) -> Vec<FieldValue>;
}

/// A single bindable column value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Uuid(Uuid),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Append this value to a query as a bind parameter.
    pub(crate) fn push_bind(self, qb: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            FieldValue::Uuid(v) => qb.push_bind(v),
            FieldValue::Text(v) => qb.push_bind(v),
            FieldValue::Timestamp(v) => qb.push_bind(v),
        };
    }
}

impl From<Uuid> for FieldValue {
    fn from(v: Uuid) -> Self {
        FieldValue::Uuid(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(v)
    }
}

/// Conjunction of `column = value` conditions. Empty matches every row.
///
/// ```rust
/// use lib_core::model::Filter;
///
/// let filter = Filter::by("email", "ann@x.com");
/// assert_eq!(filter.conditions().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(&'static str, FieldValue)>,
}

impl Filter {
    /// Filter matching every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter with a single `column = value` condition.
    pub fn by(column: &'static str, value: impl Into<FieldValue>) -> Self {
        Self::new().and(column, value)
    }

    /// Add a `column = value` condition.
    pub fn and(mut self, column: &'static str, value: impl Into<FieldValue>) -> Self {
        self.conditions.push((column, value.into()));
        self
    }

    pub fn conditions(&self) -> &[(&'static str, FieldValue)] {
        &self.conditions
    }

    /// First column not declared by `E`, if any.
    pub(crate) fn unknown_column<E: Entity>(&self) -> Option<&'static str> {
        self.conditions
            .iter()
            .map(|(column, _)| *column)
            .find(|column| !E::COLUMNS.contains(column))
    }
}
