//! Helpers for tests: an in-memory, fully migrated database.

use crate::model::store::DbPool;
use sqlx::sqlite::SqlitePoolOptions;

/// Fresh in-memory SQLite database with all migrations applied.
///
/// Each connection to `sqlite::memory:` is its own database, so the pool is
/// pinned to a single connection that is never recycled.
pub async fn init_test_db() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("../../../migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    pool
}
