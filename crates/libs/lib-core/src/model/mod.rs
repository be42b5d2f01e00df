//! # Model Layer
//!
//! Entities and the generic data-access stack:
//!
//! - [`entity`]: the [`Entity`] contract, field values, and filters
//! - [`dao`]: the [`Dao`] trait and its SQLite implementation
//! - [`repository`]: [`Repository`], an entity-bound wrapper over a DAO
//! - [`store`]: connection pool, migrations, and the concrete entities

// region: --- Modules
pub mod dao;
pub mod entity;
pub mod repository;
pub mod store;
// endregion: --- Modules

// region: --- Re-exports
pub use dao::{Dao, DaoError, SqliteDao};
pub use entity::{Entity, FieldValue, Filter};
pub use repository::{AccountRepository, ActivityLogRepository, Repository};
pub use store::models::{
    Account, AccountForCreate, AccountForUpdate, ActivityLog, ActivityLogForCreate,
    ActivityLogForUpdate,
};
// endregion: --- Re-exports
