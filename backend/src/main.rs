//! # Account API
//!
//! Thin entry point that delegates to lib-web for server setup.
//!
//! Environment (a `.env` file is honoured):
//!
//! - `BIND_ADDRESS` - listen address, default `127.0.0.1:8000`
//! - `ALLOWED_ORIGINS` - comma-separated CORS origins
//! - `LOG_LEVEL`, `DATABASE_URL`, `JWT_SECRET`, `JWT_EXPIRATION_SECS`

use lib_utils::get_env_or;
use lib_web::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before LOG_LEVEL is read
    dotenvy::dotenv().ok();

    let defaults = ServerConfig::default();
    let allowed_origins = match std::env::var("ALLOWED_ORIGINS") {
        Ok(origins) => origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect(),
        Err(_) => defaults.allowed_origins,
    };

    let config = ServerConfig {
        bind_address: get_env_or("BIND_ADDRESS", &defaults.bind_address),
        allowed_origins,
        migrations_path: "migrations".into(),
    };

    start_server(config).await
}
