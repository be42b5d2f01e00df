//! # Database Store
//!
//! Connection pool, migrations, and the concrete entity types.

// region: --- Modules
pub mod models;
// endregion: --- Modules

// region: --- Types and Functions
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::path::Path;
use tracing::info;

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Create a new SQLite connection pool, creating the database file if missing.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Run the SQL migrations found in `migrations_path`.
pub async fn run_migrations(pool: &DbPool, migrations_path: &Path) -> anyhow::Result<()> {
    info!("Running database migrations from: {}", migrations_path.display());
    let migrator = Migrator::new(migrations_path).await?;
    migrator.run(pool).await?;
    Ok(())
}
// endregion: --- Types and Functions
